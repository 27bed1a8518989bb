//! Drawing surface abstraction.

use kurbo::BezPath;
use peniko::Color;
use thiserror::Error;

/// Render errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Cannot allocate a {0}x{1} surface")]
    Allocation(u32, u32),
    #[error("PNG encoding failed: {0}")]
    Encoding(String),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// How newly stroked pixels combine with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeMode {
    /// Paint over existing content.
    #[default]
    PaintOver,
    /// Remove existing content wherever the stroke covers it.
    Erase,
}

/// Paint parameters for one stroked path. Joins and caps are always round.
#[derive(Debug, Clone, Copy)]
pub struct StrokeStyle {
    pub color: Color,
    /// Line width in drawing units.
    pub width: f64,
}

impl StrokeStyle {
    pub fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }

    /// Color as straight-alpha RGBA8.
    pub fn rgba8(&self) -> [u8; 4] {
        let c = self.color.to_rgba8();
        [c.r, c.g, c.b, c.a]
    }
}

/// A bitmap the render engine paints into.
///
/// Coordinates passed to a surface are in drawing units; the surface maps them
/// to device pixels with the scale it was last resized with. The surface is a
/// disposable view: resizing discards its pixels.
pub trait Surface {
    /// Reallocate the backing bitmap. Previous content is lost.
    fn resize(&mut self, pixel_width: u32, pixel_height: u32, scale: f64);

    /// Backing bitmap size in device pixels.
    fn pixel_size(&self) -> (u32, u32);

    /// Replace every pixel with an opaque background.
    fn clear(&mut self, background: Color);

    /// Select the composite mode for subsequent strokes.
    fn set_composite_mode(&mut self, mode: CompositeMode);

    /// Stroke `path` with round joins and caps.
    fn stroke_path(&mut self, path: &BezPath, style: &StrokeStyle);
}
