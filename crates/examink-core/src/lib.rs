//! ExamInk Core Library
//!
//! Platform-agnostic data model and input logic for the exam drawing canvas:
//! strokes, pointer geometry, tool selection and stroke capture.

pub mod answers;
pub mod color;
pub mod config;
pub mod geometry;
pub mod stroke;
pub mod tools;

pub use answers::{AnswerMode, AnswerStore, QuestionAnswer};
pub use config::{CanvasConfig, ContainerMetrics, SurfaceLayout};
pub use geometry::{CanvasMetrics, PointerInput, resolve_point};
pub use kurbo::Point;
pub use stroke::{DrawingData, DrawingError, Stroke, StrokeKind};
pub use tools::{CaptureUpdate, ToolKind, ToolManager, ToolSettings, ToolState};
