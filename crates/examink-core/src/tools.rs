//! Tool selection and the press → move → release capture state machine.

use crate::color::DEFAULT_COLOR;
use crate::stroke::{Stroke, StrokeKind};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Thinnest pen the toolbar allows.
pub const MIN_PEN_WIDTH: f64 = 1.0;
/// Thickest pen the toolbar allows.
pub const MAX_PEN_WIDTH: f64 = 10.0;
/// Pen width before the user changes it.
pub const DEFAULT_PEN_WIDTH: f64 = 2.0;
/// Freehand and eraser strokes with fewer points are discarded on release.
pub const MIN_FREEHAND_POINTS: usize = 2;

/// Available drawing tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Pen,
    Eraser,
    Line,
    Rectangle,
    Circle,
}

impl ToolKind {
    pub const ALL: [ToolKind; 5] = [
        ToolKind::Pen,
        ToolKind::Eraser,
        ToolKind::Line,
        ToolKind::Rectangle,
        ToolKind::Circle,
    ];

    /// The kind of stroke this tool produces.
    pub fn stroke_kind(self) -> StrokeKind {
        match self {
            ToolKind::Pen => StrokeKind::Freehand,
            ToolKind::Eraser => StrokeKind::Eraser,
            ToolKind::Line => StrokeKind::Line,
            ToolKind::Rectangle => StrokeKind::Rectangle,
            ToolKind::Circle => StrokeKind::Circle,
        }
    }

    pub fn is_shape(self) -> bool {
        self.stroke_kind().is_shape()
    }

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Pen => "pen",
            ToolKind::Eraser => "eraser",
            ToolKind::Line => "line",
            ToolKind::Rectangle => "rectangle",
            ToolKind::Circle => "circle",
        }
    }

    /// Look up a tool by its toolbar name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }
}

/// Tool, color and width applied to the next captured stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSettings {
    pub tool: ToolKind,
    pub color: String,
    pub width: f64,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            tool: ToolKind::default(),
            color: DEFAULT_COLOR.to_string(),
            width: DEFAULT_PEN_WIDTH,
        }
    }
}

impl ToolSettings {
    /// Build a stroke with these settings.
    fn stroke(&self, points: Vec<Point>) -> Stroke {
        Stroke::new(self.tool.stroke_kind(), points, self.color.clone(), self.width)
    }
}

/// State of a capture.
#[derive(Debug, Clone, Default)]
pub enum ToolState {
    /// No pointer is pressed on the surface.
    #[default]
    Idle,
    /// A stroke is being captured.
    Capturing {
        /// Where the pointer went down.
        anchor: Point,
        /// Live point buffer. Shapes hold `[anchor, current]`.
        points: Vec<Point>,
        /// Settings frozen at pointer-down.
        settings: ToolSettings,
    },
}

/// What the surface should show in response to a pointer move.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureUpdate {
    /// Nothing is being captured.
    Ignored,
    /// Draw only the newest segment of a freehand or eraser path.
    /// The stroke holds exactly the two segment endpoints.
    Segment(Stroke),
    /// Repaint committed strokes, then draw this in-progress shape on top.
    Preview(Stroke),
}

/// Owns the current tool settings and the in-progress stroke.
#[derive(Debug, Clone)]
pub struct ToolManager {
    settings: ToolSettings,
    state: ToolState,
    supports_shapes: bool,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ToolManager {
    /// Create a tool manager. Shape tools are only selectable when `supports_shapes` is set.
    pub fn new(supports_shapes: bool) -> Self {
        Self {
            settings: ToolSettings::default(),
            state: ToolState::Idle,
            supports_shapes,
        }
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn current_tool(&self) -> ToolKind {
        self.settings.tool
    }

    pub fn state(&self) -> &ToolState {
        &self.state
    }

    /// Select the tool for the next stroke. Returns false if the tool is unavailable.
    pub fn set_tool(&mut self, tool: ToolKind) -> bool {
        if tool.is_shape() && !self.supports_shapes {
            log::debug!("Shape tool {} unavailable on this canvas", tool.name());
            return false;
        }
        self.settings.tool = tool;
        true
    }

    /// Set the color for the next stroke.
    pub fn set_color(&mut self, color: impl Into<String>) {
        self.settings.color = color.into();
    }

    /// Set the width for the next stroke, clamped to the pen range.
    pub fn set_width(&mut self, width: f64) {
        if width.is_finite() {
            self.settings.width = width.clamp(MIN_PEN_WIDTH, MAX_PEN_WIDTH);
        }
    }

    /// Begin capturing a stroke at `point`.
    pub fn begin(&mut self, point: Point) {
        let settings = self.settings.clone();
        let points = if settings.tool.is_shape() {
            vec![point, point]
        } else {
            vec![point]
        };
        log::trace!("Capture started with {} at {:?}", settings.tool.name(), point);
        self.state = ToolState::Capturing {
            anchor: point,
            points,
            settings,
        };
    }

    /// Feed a pointer move into the capture.
    pub fn update(&mut self, point: Point) -> CaptureUpdate {
        let ToolState::Capturing {
            anchor,
            points,
            settings,
        } = &mut self.state
        else {
            return CaptureUpdate::Ignored;
        };

        if settings.tool.is_shape() {
            *points = vec![*anchor, point];
            CaptureUpdate::Preview(settings.stroke(points.clone()))
        } else {
            let from = points.last().copied().unwrap_or(point);
            points.push(point);
            CaptureUpdate::Segment(settings.stroke(vec![from, point]))
        }
    }

    /// Finish the capture. Returns the stroke if it is worth committing.
    pub fn end(&mut self) -> Option<Stroke> {
        let ToolState::Capturing {
            points, settings, ..
        } = std::mem::take(&mut self.state)
        else {
            return None;
        };

        let required = if settings.tool.is_shape() {
            2
        } else {
            MIN_FREEHAND_POINTS
        };
        if points.len() < required {
            log::trace!("Discarding {}-point {} stroke", points.len(), settings.tool.name());
            return None;
        }
        Some(settings.stroke(points))
    }

    /// Drop the in-progress stroke without committing it.
    pub fn cancel(&mut self) {
        self.state = ToolState::Idle;
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, ToolState::Capturing { .. })
    }

    /// The in-progress stroke as it would be committed right now.
    pub fn preview_stroke(&self) -> Option<Stroke> {
        match &self.state {
            ToolState::Capturing {
                points, settings, ..
            } => Some(settings.stroke(points.clone())),
            ToolState::Idle => None,
        }
    }
}
