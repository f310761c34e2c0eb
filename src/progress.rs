//! Progress reporting for batch visualization
//!
//! Structured per-document progress lines and an end-of-run summary,
//! gated by a verbosity ladder.

use std::time::Instant;

/// Output verbosity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// No output
    Quiet,
    /// Normal output (summary only)
    #[default]
    Normal,
    /// Verbose output (per-document lines)
    Verbose,
    /// Very verbose (per-page detail via log output)
    VeryVerbose,
}

impl OutputMode {
    /// Create OutputMode from verbosity level
    pub fn from_verbosity(level: u8) -> Self {
        match level {
            0 => OutputMode::Normal,
            1 => OutputMode::Verbose,
            _ => OutputMode::VeryVerbose,
        }
    }

    /// Check if output should be shown at this mode
    pub fn should_show(&self, required: OutputMode) -> bool {
        use OutputMode::*;
        match (self, required) {
            (Quiet, _) => false,
            (Normal, Quiet | Normal) => true,
            (Verbose, Quiet | Normal | Verbose) => true,
            (VeryVerbose, _) => true,
            _ => false,
        }
    }
}

/// Progress tracker for a visualization batch
#[derive(Debug)]
pub struct ProgressTracker {
    /// Total number of documents in the batch
    pub total_documents: usize,
    /// Current document number (1-based)
    pub current_document: usize,
    /// Start time of the current document
    start_time: Instant,
    /// Output mode
    output_mode: OutputMode,
}

impl ProgressTracker {
    /// Create a new progress tracker
    pub fn new(total_documents: usize, output_mode: OutputMode) -> Self {
        Self {
            total_documents,
            current_document: 0,
            start_time: Instant::now(),
            output_mode,
        }
    }

    /// Start processing a document
    pub fn start_document(&mut self, number: usize, name: &str) {
        self.current_document = number;
        self.start_time = Instant::now();
        if self.output_mode.should_show(OutputMode::Verbose) {
            println!(
                "[{}/{}] Visualizing: {}",
                number, self.total_documents, name
            );
        }
    }

    /// Report a completed document
    pub fn complete_document(&mut self, pages: usize, boxes: usize) {
        if self.output_mode.should_show(OutputMode::Verbose) {
            println!(
                "    Completed: {} pages, {} boxes, {:.2}s",
                pages,
                boxes,
                self.start_time.elapsed().as_secs_f64()
            );
        }
    }

    /// Elapsed time for the current document, in seconds
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    /// Print the end-of-run summary
    pub fn print_summary(
        total_documents: usize,
        ok_count: usize,
        skip_count: usize,
        error_count: usize,
    ) {
        println!();
        println!("{}", "=".repeat(60));
        println!("Visualization Summary");
        println!("{}", "=".repeat(60));
        println!("  Total documents: {}", total_documents);
        println!("  Succeeded:       {}", ok_count);
        println!("  Skipped:         {}", skip_count);
        println!("  Errors:          {}", error_count);
        println!("{}", "=".repeat(60));
    }
}
