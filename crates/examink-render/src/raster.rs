//! Software raster surface backed by a tiny-skia pixmap.

use crate::surface::{CompositeMode, RenderError, RenderResult, StrokeStyle, Surface};
use kurbo::{BezPath, PathEl};
use peniko::Color;
use tiny_skia::{BlendMode, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Transform};

/// CPU bitmap surface.
///
/// A zero-sized surface has no pixmap; drawing into it is a silent no-op.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    pixmap: Option<Pixmap>,
    scale: f64,
    mode: CompositeMode,
}

impl Default for RasterSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RasterSurface {
    /// Create an unallocated surface. Call [`Surface::resize`] before drawing.
    pub fn new() -> Self {
        Self {
            pixmap: None,
            scale: 1.0,
            mode: CompositeMode::PaintOver,
        }
    }

    /// Create a surface with an allocated bitmap.
    pub fn with_size(pixel_width: u32, pixel_height: u32, scale: f64) -> RenderResult<Self> {
        let mut surface = Self::new();
        surface.resize(pixel_width, pixel_height, scale);
        if surface.pixmap.is_none() {
            return Err(RenderError::Allocation(pixel_width, pixel_height));
        }
        Ok(surface)
    }

    /// Premultiplied RGBA8 pixel data, row-major. Empty when unallocated.
    pub fn pixels(&self) -> &[u8] {
        self.pixmap.as_ref().map(|p| p.data()).unwrap_or(&[])
    }

    /// Straight-alpha RGBA8 value of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let color = self.pixmap.as_ref()?.pixel(x, y)?.demultiply();
        Some([color.red(), color.green(), color.blue(), color.alpha()])
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Straight-alpha RGBA8 pixel data, row-major.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let Some(pixmap) = &self.pixmap else {
            return Vec::new();
        };
        pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }

    /// Encode the surface as a PNG image.
    pub fn to_png(&self) -> RenderResult<Vec<u8>> {
        let (width, height) = self.pixel_size();
        if self.pixmap.is_none() {
            return Err(RenderError::Allocation(width, height));
        }
        let rgba = self.to_rgba8();

        let mut png_data = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut png_data, width, height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder
                .write_header()
                .map_err(|e| RenderError::Encoding(e.to_string()))?;
            writer
                .write_image_data(&rgba)
                .map_err(|e| RenderError::Encoding(e.to_string()))?;
        }
        Ok(png_data)
    }

    fn transform(&self) -> Transform {
        Transform::from_scale(self.scale as f32, self.scale as f32)
    }
}

impl Surface for RasterSurface {
    fn resize(&mut self, pixel_width: u32, pixel_height: u32, scale: f64) {
        self.pixmap = Pixmap::new(pixel_width, pixel_height);
        self.scale = scale;
        if self.pixmap.is_none() {
            log::debug!("Raster surface {}x{} left unallocated", pixel_width, pixel_height);
        }
    }

    fn pixel_size(&self) -> (u32, u32) {
        self.pixmap
            .as_ref()
            .map(|p| (p.width(), p.height()))
            .unwrap_or((0, 0))
    }

    fn clear(&mut self, background: Color) {
        if let Some(pixmap) = &mut self.pixmap {
            let c = background.to_rgba8();
            pixmap.fill(tiny_skia::Color::from_rgba8(c.r, c.g, c.b, 255));
        }
    }

    fn set_composite_mode(&mut self, mode: CompositeMode) {
        self.mode = mode;
    }

    fn stroke_path(&mut self, path: &BezPath, style: &StrokeStyle) {
        let transform = self.transform();
        let Some(pixmap) = &mut self.pixmap else {
            return;
        };
        let Some(path) = to_skia_path(path) else {
            return;
        };

        let c = style.color.to_rgba8();
        let mut paint = Paint::default();
        paint.set_color_rgba8(c.r, c.g, c.b, c.a);
        paint.anti_alias = true;
        paint.blend_mode = match self.mode {
            CompositeMode::PaintOver => BlendMode::SourceOver,
            CompositeMode::Erase => BlendMode::DestinationOut,
        };

        let stroke = tiny_skia::Stroke {
            width: style.width as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, transform, None);
    }
}

fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => builder.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => builder.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}
