//! Command-line interface definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// docviz - layout-analysis visualization for converted PDF documents
#[derive(Debug, Parser)]
#[command(name = "docviz", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render layout bounding boxes onto page images and write HTML reports
    Visualize(VisualizeArgs),
    /// Show version and external tool availability
    Info(InfoArgs),
}

/// Arguments for the `visualize` command
#[derive(Debug, Args)]
pub struct VisualizeArgs {
    /// Converted-document results: a directory of json*.zip archives,
    /// a single .zip archive, or a bare .json document
    #[arg(short, long)]
    pub results: PathBuf,

    /// Source PDF used as the page background
    #[arg(short, long)]
    pub pdf: Option<PathBuf>,

    /// Output directory for the HTML reports
    #[arg(short, long, default_value = "docviz-out")]
    pub output: PathBuf,

    /// Draw boxes on a blank white canvas instead of the rasterized PDF page
    #[arg(long)]
    pub no_page_image: bool,

    /// Rasterization resolution in DPI
    #[arg(long, default_value_t = 72)]
    pub resolution: u32,

    /// Number of columns in the report table
    #[arg(long, default_value_t = 3)]
    pub columns: usize,

    /// Bounded wait for the external rasterizer, in seconds
    #[arg(long, default_value_t = 60)]
    pub render_timeout: u64,

    /// Config file path (defaults to ./docviz.toml, then the user config dir)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output (-v: per-document, -vv: per-page detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the end-of-run summary
    #[arg(short, long)]
    pub quiet: bool,
}

impl VisualizeArgs {
    /// Whether the rasterized PDF page should back the overlay
    pub fn show_page_image(&self) -> bool {
        !self.no_page_image
    }
}

/// Arguments for the `info` command
#[derive(Debug, Args)]
pub struct InfoArgs {
    /// Also print the default style palette
    #[arg(long)]
    pub styles: bool,
}
