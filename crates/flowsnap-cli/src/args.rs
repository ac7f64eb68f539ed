//! Command-line argument definitions.

use clap::Parser;

/// Resolve helper-line snapping for one drag frame
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the frame JSON file
    #[arg(help = "Path to the frame JSON file")]
    pub input: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Write an SVG overlay of the frame to this path
    #[arg(long)]
    pub svg: Option<String>,

    /// Treat the frame as the pointer release (final snap, no guides)
    #[arg(long)]
    pub release: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
