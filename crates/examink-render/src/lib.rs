//! ExamInk Render Library
//!
//! Render engine and surface abstraction for the exam drawing canvas, plus the
//! [`DrawingSession`] that ties stroke capture, rendering and resizing together.
//! The default raster surface uses tiny-skia so everything can run headlessly.

pub mod engine;
mod recording;
mod session;
mod surface;

#[cfg(feature = "raster")]
mod raster;

pub use engine::{draw_stroke, render, render_with_preview};
pub use recording::{RecordingSurface, SurfaceOp};
pub use session::{ChangeCallback, DrawingSession};
pub use surface::{CompositeMode, RenderError, RenderResult, StrokeStyle, Surface};

#[cfg(feature = "raster")]
pub use raster::RasterSurface;
