//! Surface that records drawing calls instead of rasterizing them.

use crate::surface::{CompositeMode, StrokeStyle, Surface};
use kurbo::BezPath;
use peniko::Color;

/// One recorded surface call.
#[derive(Debug, Clone)]
pub enum SurfaceOp {
    Resize {
        pixel_width: u32,
        pixel_height: u32,
        scale: f64,
    },
    Clear(Color),
    SetCompositeMode(CompositeMode),
    Stroke {
        path: BezPath,
        style: StrokeStyle,
        /// Composite mode in effect when the path was stroked.
        mode: CompositeMode,
    },
}

/// Headless surface for inspecting what the render engine draws.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    ops: Vec<SurfaceOp>,
    size: (u32, u32),
    scale: f64,
    mode: CompositeMode,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            scale: 1.0,
            ..Self::default()
        }
    }

    /// Every call since creation or the last [`RecordingSurface::take_ops`].
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Drain the recorded calls.
    pub fn take_ops(&mut self) -> Vec<SurfaceOp> {
        std::mem::take(&mut self.ops)
    }

    /// Stroked paths with their style and composite mode, in call order.
    pub fn stroked_paths(&self) -> Vec<(&BezPath, &StrokeStyle, CompositeMode)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Stroke { path, style, mode } => Some((path, style, *mode)),
                _ => None,
            })
            .collect()
    }

    /// Calls recorded since the most recent clear, including that clear.
    pub fn since_last_clear(&self) -> &[SurfaceOp] {
        let start = self
            .ops
            .iter()
            .rposition(|op| matches!(op, SurfaceOp::Clear(_)))
            .unwrap_or(0);
        &self.ops[start..]
    }

    pub fn composite_mode(&self) -> CompositeMode {
        self.mode
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, pixel_width: u32, pixel_height: u32, scale: f64) {
        self.size = (pixel_width, pixel_height);
        self.scale = scale;
        self.ops.push(SurfaceOp::Resize {
            pixel_width,
            pixel_height,
            scale,
        });
    }

    fn pixel_size(&self) -> (u32, u32) {
        self.size
    }

    fn clear(&mut self, background: Color) {
        self.ops.push(SurfaceOp::Clear(background));
    }

    fn set_composite_mode(&mut self, mode: CompositeMode) {
        self.mode = mode;
        self.ops.push(SurfaceOp::SetCompositeMode(mode));
    }

    fn stroke_path(&mut self, path: &BezPath, style: &StrokeStyle) {
        self.ops.push(SurfaceOp::Stroke {
            path: path.clone(),
            style: *style,
            mode: self.mode,
        });
    }
}
