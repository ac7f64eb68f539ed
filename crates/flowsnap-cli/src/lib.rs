//! CLI logic for FlowSnap.
//!
//! Reads one drag frame, runs it through the alignment engine and reports
//! the corrected position and guide lines.

mod args;
mod config;
mod error;
mod frame;

pub use args::Args;
pub use config::{load_config, parse_config};
pub use error::{CliError, CliResult};
pub use frame::{DEFAULT_CANVAS, FrameInput, FrameOutput, placed_entities};

use std::fs;

use flowsnap_render::{GuideRenderContext, GuideRenderer, SvgRenderer};
use log::info;

/// Process the frame named by `args`, writing the SVG overlay if requested.
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Malformed frame JSON or configuration TOML
/// - Invalid configuration values
/// - SVG rendering errors
pub fn execute(args: &Args) -> CliResult<FrameOutput> {
    let config = load_config(args.config.as_deref())?;

    let source = fs::read_to_string(&args.input).map_err(|e| CliError::io(&args.input, e))?;
    let frame: FrameInput = serde_json::from_str(&source)?;
    info!(
        "Processing drag of {} at ({}, {})",
        frame.dragged_id, frame.candidate.x, frame.candidate.y
    );

    let snapshot = frame.snapshot(&config);
    let output = frame.process(&snapshot, &config, args.release);

    if let Some(path) = &args.svg {
        let entities = placed_entities(&snapshot, &frame.dragged_id, output.position);
        let ctx = GuideRenderContext::new(&entities, &output.guides, frame.canvas)
            .with_viewport(frame.viewport)
            .with_dragged(Some(&frame.dragged_id));
        let mut renderer = SvgRenderer::new();
        renderer.build_scene(&ctx)?;
        fs::write(path, renderer.svg()).map_err(|e| CliError::io(path, e))?;
        info!("SVG overlay written to {path}");
    }

    Ok(output)
}

/// Run the CLI, printing the frame output as JSON on stdout.
pub fn run(args: &Args) -> CliResult<()> {
    let output = execute(args)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
