//! ExamInk Web
//!
//! WebAssembly bindings that mount the drawing session on an HTML canvas.
//! Everything but the style helpers is only compiled for `wasm32`.

mod style;

#[cfg(target_arch = "wasm32")]
mod bindings;
#[cfg(target_arch = "wasm32")]
mod canvas_surface;
#[cfg(target_arch = "wasm32")]
mod events;

pub use style::{composite_operation, css_rgba};

#[cfg(target_arch = "wasm32")]
pub use bindings::DrawingCanvas;
#[cfg(target_arch = "wasm32")]
pub use canvas_surface::CanvasSurface;
#[cfg(target_arch = "wasm32")]
pub use events::pointer_input;
