//! docviz-pdf - Visualize document-layout analysis results
//!
//! CLI entry point

use clap::Parser;
use docviz_pdf::{
    collect_documents, exit_codes,
    // CLI
    Cli, Commands, InfoArgs, VisualizeArgs,
    // Config
    CliOverrides, Config,
    // Pipeline
    VizPipeline,
    // Progress tracking
    OutputMode, ProgressTracker,
};
use tracing_subscriber::filter::LevelFilter;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Visualize(args) => run_visualize(&args),
        Commands::Info(args) => run_info(&args),
    };

    std::process::exit(match result {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_codes::GENERAL_ERROR
        }
    });
}

// ============ Visualize Command ============

fn run_visualize(args: &VisualizeArgs) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(args.verbose, args.quiet);

    // Validate input path
    if !args.results.exists() {
        eprintln!(
            "Error: Results path does not exist: {}",
            args.results.display()
        );
        std::process::exit(exit_codes::INPUT_NOT_FOUND);
    }
    if let Some(pdf) = &args.pdf {
        if !pdf.exists() {
            eprintln!("Error: PDF does not exist: {}", pdf.display());
            std::process::exit(exit_codes::INPUT_NOT_FOUND);
        }
    }

    // Collect converted documents from the results path
    let collected = collect_documents(&args.results)?;
    if collected.documents.is_empty() {
        eprintln!("Error: No converted documents found in results path");
        std::process::exit(exit_codes::INPUT_NOT_FOUND);
    }

    // Load config file if specified, otherwise use default locations
    let file_config = match &args.config {
        Some(config_path) => match Config::load_from_path(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Warning: Failed to load config file: {}", e);
                Config::default()
            }
        },
        None => Config::load().unwrap_or_default(),
    };

    // Merge config file with CLI arguments (CLI takes precedence)
    let config = file_config.merge_with_cli(&create_cli_overrides(args));
    let pipeline = VizPipeline::new(config);

    if pipeline.config().show_page_image && args.pdf.is_none() {
        eprintln!("Error: --pdf is required unless --no-page-image is set");
        std::process::exit(exit_codes::INPUT_NOT_FOUND);
    }

    let output_mode = if args.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::from_verbosity(args.verbose)
    };
    let mut progress = ProgressTracker::new(collected.documents.len(), output_mode);

    // Track processing results; archive members that failed to load count
    // as skipped in the summary
    let mut ok_count = 0usize;
    let skip_count = collected.skipped;
    let mut error_count = 0usize;

    for (idx, source) in collected.documents.iter().enumerate() {
        progress.start_document(idx + 1, &source.name);

        match pipeline.visualize_document(
            &source.name,
            &source.doc,
            args.pdf.as_deref(),
            &args.output,
        ) {
            Ok(result) => {
                ok_count += 1;
                progress.complete_document(result.pages_rendered, result.boxes_drawn);
            }
            Err(e) => {
                eprintln!("Error visualizing {}: {}", source.name, e);
                error_count += 1;
            }
        }
    }

    if !args.quiet {
        ProgressTracker::print_summary(
            collected.documents.len(),
            ok_count,
            skip_count,
            error_count,
        );
    }

    if error_count > 0 {
        return Err(format!("{} document(s) failed to visualize", error_count).into());
    }

    Ok(())
}

// ============ Helper Functions ============

/// Initialize the tracing subscriber from the verbosity flags
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::ERROR
    } else {
        match verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            _ => LevelFilter::DEBUG,
        }
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
}

/// Create CLI overrides from VisualizeArgs
///
/// Only override config file values when the CLI explicitly sets a
/// non-default value, so config files can provide defaults that clap
/// defaults do not clobber.
fn create_cli_overrides(args: &VisualizeArgs) -> CliOverrides {
    let mut overrides = CliOverrides::new();

    const DEFAULT_RESOLUTION: u32 = 72;
    const DEFAULT_COLUMNS: usize = 3;
    const DEFAULT_RENDER_TIMEOUT: u64 = 60;

    if args.resolution != DEFAULT_RESOLUTION {
        overrides.resolution = Some(args.resolution);
    }
    if args.columns != DEFAULT_COLUMNS {
        overrides.columns = Some(args.columns);
    }
    if args.no_page_image {
        overrides.show_page_image = Some(false);
    }
    if args.render_timeout != DEFAULT_RENDER_TIMEOUT {
        overrides.render_timeout_secs = Some(args.render_timeout);
    }

    overrides
}

// ============ Info Command ============

fn run_info(args: &InfoArgs) -> Result<(), Box<dyn std::error::Error>> {
    println!("docviz-pdf v{}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("System Information:");
    println!("  Platform: {}", std::env::consts::OS);
    println!("  Arch: {}", std::env::consts::ARCH);

    println!();
    println!("Rasterization Tools:");
    check_tool_with_version(docviz_pdf::render::RASTERIZER_TOOL, "Poppler", &["-v"]);

    println!();
    println!("Config File Locations:");
    println!("  Local: ./docviz.toml");
    if let Some(config_dir) = dirs::config_dir() {
        println!("  User:  {}", config_dir.join("docviz/config.toml").display());
    }

    if args.styles {
        let config = Config::default();
        println!();
        println!("Default Styles:");
        let mut labels: Vec<&str> = config.styles.labels().collect();
        labels.sort_unstable();
        for label in labels {
            let style = config.styles.style_for(label);
            println!(
                "  {:18} fill {:?}  outline {:?}",
                label, style.fill.0, style.outline.0
            );
        }
    }

    Ok(())
}

fn check_tool_with_version(cmd: &str, name: &str, version_args: &[&str]) {
    match which::which(cmd) {
        Ok(path) => {
            if let Ok(output) = std::process::Command::new(&path).args(version_args).output() {
                // pdftoppm prints its version on stderr
                let stdout = String::from_utf8_lossy(&output.stdout);
                let stderr = String::from_utf8_lossy(&output.stderr);
                let first_line = stdout
                    .lines()
                    .chain(stderr.lines())
                    .next()
                    .unwrap_or("")
                    .trim();
                if !first_line.is_empty() && first_line.len() < 80 {
                    println!("  {}: {} ({})", name, first_line, path.display());
                } else {
                    println!("  {}: {} (found)", name, path.display());
                }
            } else {
                println!("  {}: {} (found)", name, path.display());
            }
        }
        Err(_) => println!("  {}: Not found", name),
    }
}
