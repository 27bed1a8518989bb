//! Replay a saved drawing into a PNG image.

use clap::Parser;
use examink_core::{CanvasConfig, ContainerMetrics, DrawingData, DrawingError};
use examink_render::{DrawingSession, RasterSurface, RenderError};
use std::path::PathBuf;
use thiserror::Error;

/// Container width used when none is given on the command line.
pub const DEFAULT_REPLAY_WIDTH: f64 = 800.0;

/// Errors from the replay command.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Drawing(#[from] DrawingError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Render a saved drawing to PNG.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "examink-replay", about = "Render a saved drawing to PNG")]
pub struct ReplayArgs {
    /// Drawing JSON file.
    pub input: PathBuf,
    /// PNG file to write.
    pub output: PathBuf,
    /// Container width in drawing units.
    #[arg(default_value_t = DEFAULT_REPLAY_WIDTH, value_parser = positive_width)]
    pub width: f64,
}

fn positive_width(raw: &str) -> Result<f64, String> {
    match raw.parse::<f64>() {
        Ok(width) if width.is_finite() && width > 0.0 => Ok(width),
        _ => Err(format!("{raw:?} is not a positive width")),
    }
}

/// Render drawing JSON at `width` and encode the result as PNG.
pub fn render_png(json: &str, width: f64) -> Result<Vec<u8>, ReplayError> {
    let data = DrawingData::from_json(json)?;
    log::debug!("Replaying {} strokes at width {}", data.len(), width);
    let session = DrawingSession::mount(
        RasterSurface::new(),
        CanvasConfig::default(),
        ContainerMetrics::new(width, 1.0),
        Some(data),
    );
    Ok(session.surface().to_png()?)
}

/// Read the input file, render it, and write the PNG.
pub fn run(args: &ReplayArgs) -> Result<(), ReplayError> {
    let json = std::fs::read_to_string(&args.input)?;
    let png = render_png(&json, args.width)?;
    std::fs::write(&args.output, &png)?;
    log::info!(
        "Wrote {} ({} bytes)",
        args.output.display(),
        png.len()
    );
    Ok(())
}
