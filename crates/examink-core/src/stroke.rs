//! Stroke model: the authoritative record of everything drawn on a canvas.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when decoding or encoding drawing data.
#[derive(Debug, Error)]
pub enum DrawingError {
    #[error("Invalid drawing data: {0}")]
    Json(#[from] serde_json::Error),
}

/// How a stroke is interpreted when rendered.
///
/// Serialized under the `type` key. Drawings saved before shape tools existed
/// carry no kind at all and decode as [`StrokeKind::Freehand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeKind {
    /// Connected path through every sampled point.
    #[default]
    #[serde(rename = "pen", alias = "freehand")]
    Freehand,
    /// Freehand path that removes pixels instead of painting them.
    Eraser,
    /// Straight segment from anchor to release point.
    Line,
    /// Axis-aligned rectangle with the two points as opposite corners.
    Rectangle,
    /// Circle centered on the anchor, passing through the release point.
    Circle,
}

impl StrokeKind {
    /// Shapes are defined by exactly two points: anchor and current position.
    pub fn is_shape(self) -> bool {
        matches!(self, StrokeKind::Line | StrokeKind::Rectangle | StrokeKind::Circle)
    }

    /// Freehand and eraser strokes record the full sampled path.
    pub fn is_path(self) -> bool {
        !self.is_shape()
    }
}

/// One completed drawing action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Points in capture order.
    pub points: Vec<Point>,
    /// CSS color string, kept verbatim. Ignored for eraser strokes.
    pub color: String,
    /// Stroke thickness in drawing units.
    pub width: f64,
    #[serde(rename = "type", default)]
    pub kind: StrokeKind,
}

impl Stroke {
    /// Create a stroke of the given kind.
    pub fn new(kind: StrokeKind, points: Vec<Point>, color: impl Into<String>, width: f64) -> Self {
        Self {
            points,
            color: color.into(),
            width,
            kind,
        }
    }

    /// Create a freehand stroke.
    pub fn freehand(points: Vec<Point>, color: impl Into<String>, width: f64) -> Self {
        Self::new(StrokeKind::Freehand, points, color, width)
    }

    /// Create a two-point shape stroke.
    pub fn shape(kind: StrokeKind, anchor: Point, end: Point, color: impl Into<String>, width: f64) -> Self {
        Self::new(kind, vec![anchor, end], color, width)
    }

    /// Whether this stroke has nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The anchor/end pair of a shape stroke, if it has one.
    pub fn endpoints(&self) -> Option<(Point, Point)> {
        match self.points.as_slice() {
            [start, end, ..] => Some((*start, *end)),
            _ => None,
        }
    }
}

/// The externally visible drawing state: an ordered list of strokes.
///
/// Later strokes paint over earlier ones; list order is the only z-order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawingData {
    #[serde(default)]
    pub strokes: Vec<Stroke>,
}

impl DrawingData {
    /// Create an empty drawing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a drawing from existing strokes.
    pub fn from_strokes(strokes: Vec<Stroke>) -> Self {
        Self { strokes }
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Append a committed stroke.
    pub fn push(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    /// Remove and return the most recent stroke.
    pub fn pop(&mut self) -> Option<Stroke> {
        self.strokes.pop()
    }

    /// Remove every stroke.
    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, DrawingError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self, DrawingError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<Vec<Stroke>> for DrawingData {
    fn from(strokes: Vec<Stroke>) -> Self {
        Self::from_strokes(strokes)
    }
}
