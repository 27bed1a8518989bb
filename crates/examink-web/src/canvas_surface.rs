//! `Surface` implementation over an HTML canvas 2D context.

use crate::style::{composite_operation, css_rgba};
use examink_render::{CompositeMode, StrokeStyle, Surface};
use kurbo::{BezPath, PathEl};
use peniko::Color;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Draws into a `<canvas>` element.
///
/// If the 2D context cannot be obtained every drawing call is skipped.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: Option<CanvasRenderingContext2d>,
    scale: f64,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok());
        if ctx.is_none() {
            log::warn!("Canvas 2D context unavailable; drawing disabled");
        }
        Self {
            canvas,
            ctx,
            scale: 1.0,
        }
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Device pixels per drawing unit.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    fn apply_scale(&self, ctx: &CanvasRenderingContext2d) {
        if let Err(e) = ctx.set_transform(self.scale, 0.0, 0.0, self.scale, 0.0, 0.0) {
            log::debug!("setTransform failed: {:?}", e);
        }
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, pixel_width: u32, pixel_height: u32, scale: f64) {
        self.canvas.set_width(pixel_width);
        self.canvas.set_height(pixel_height);
        self.scale = scale;

        let style = self.canvas.style();
        let css_width = format!("{}px", f64::from(pixel_width) / scale);
        let css_height = format!("{}px", f64::from(pixel_height) / scale);
        if style.set_property("width", &css_width).is_err()
            || style.set_property("height", &css_height).is_err()
        {
            log::debug!("Could not set canvas CSS size");
        }
    }

    fn pixel_size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn clear(&mut self, background: Color) {
        let Some(ctx) = &self.ctx else {
            return;
        };
        let (width, height) = self.pixel_size();
        if let Err(e) = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0) {
            log::debug!("setTransform failed: {:?}", e);
        }
        if let Err(e) = ctx.set_global_composite_operation(composite_operation(CompositeMode::PaintOver)) {
            log::debug!("globalCompositeOperation rejected: {:?}", e);
        }
        ctx.clear_rect(0.0, 0.0, f64::from(width), f64::from(height));
        ctx.set_fill_style_str(&css_rgba(background));
        ctx.fill_rect(0.0, 0.0, f64::from(width), f64::from(height));
        self.apply_scale(ctx);
    }

    fn set_composite_mode(&mut self, mode: CompositeMode) {
        if let Some(ctx) = &self.ctx {
            if let Err(e) = ctx.set_global_composite_operation(composite_operation(mode)) {
                log::debug!("globalCompositeOperation rejected: {:?}", e);
            }
        }
    }

    fn stroke_path(&mut self, path: &BezPath, style: &StrokeStyle) {
        let Some(ctx) = &self.ctx else {
            return;
        };
        self.apply_scale(ctx);
        ctx.set_line_width(style.width);
        ctx.set_line_cap("round");
        ctx.set_line_join("round");
        ctx.set_stroke_style_str(&css_rgba(style.color));

        ctx.begin_path();
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => ctx.move_to(p.x, p.y),
                PathEl::LineTo(p) => ctx.line_to(p.x, p.y),
                PathEl::QuadTo(c, p) => ctx.quadratic_curve_to(c.x, c.y, p.x, p.y),
                PathEl::CurveTo(c1, c2, p) => ctx.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y),
                PathEl::ClosePath => ctx.close_path(),
            }
        }
        ctx.stroke();
    }
}
