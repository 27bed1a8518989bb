//! Pointer-to-canvas coordinate mapping and shape geometry.

use kurbo::{Point, Vec2};

/// A pointer sample as delivered by the host, in client (viewport) coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerInput {
    /// Mouse-style event with a single coordinate pair.
    Mouse { client: Point },
    /// Touch-style event; only the first active contact is used.
    Touch { contacts: Vec<Point> },
}

impl PointerInput {
    pub fn mouse(x: f64, y: f64) -> Self {
        PointerInput::Mouse {
            client: Point::new(x, y),
        }
    }

    pub fn touch(contacts: Vec<Point>) -> Self {
        PointerInput::Touch { contacts }
    }

    /// The client coordinate this event refers to, if any.
    pub fn client_point(&self) -> Option<Point> {
        match self {
            PointerInput::Mouse { client } => Some(*client),
            PointerInput::Touch { contacts } => contacts.first().copied(),
        }
    }
}

/// On-screen placement and backing resolution of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasMetrics {
    /// Left edge of the surface's bounding box in client coordinates.
    pub left: f64,
    /// Top edge of the surface's bounding box in client coordinates.
    pub top: f64,
    /// CSS display width.
    pub display_width: f64,
    /// CSS display height.
    pub display_height: f64,
    /// Backing bitmap width in device pixels.
    pub bitmap_width: f64,
    /// Backing bitmap height in device pixels.
    pub bitmap_height: f64,
    /// Device pixel ratio the bitmap was allocated for (1.0 when not DPI aware).
    pub device_pixel_ratio: f64,
}

impl CanvasMetrics {
    /// Metrics for a surface whose bitmap matches its display size one to one.
    pub fn unscaled(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            display_width: width,
            display_height: height,
            bitmap_width: width,
            bitmap_height: height,
            device_pixel_ratio: 1.0,
        }
    }

    /// Ratio between bitmap pixels and display pixels along each axis.
    fn bitmap_scale(&self) -> Vec2 {
        Vec2::new(
            axis_scale(self.bitmap_width, self.display_width),
            axis_scale(self.bitmap_height, self.display_height),
        )
    }
}

fn axis_scale(bitmap: f64, display: f64) -> f64 {
    if display > 0.0 && display.is_finite() && bitmap.is_finite() {
        bitmap / display
    } else {
        1.0
    }
}

/// Map a pointer event onto unscaled drawing-surface coordinates.
///
/// The result is independent of the device pixel ratio: a bitmap allocated at
/// twice its display width yields the same point as one allocated one to one.
/// A touch event without contacts resolves to the origin.
pub fn resolve_point(input: &PointerInput, metrics: &CanvasMetrics) -> Point {
    let Some(client) = input.client_point() else {
        return Point::ZERO;
    };

    let local = Point::new(client.x - metrics.left, client.y - metrics.top);
    let scale = metrics.bitmap_scale();
    let dpr = if metrics.device_pixel_ratio > 0.0 && metrics.device_pixel_ratio.is_finite() {
        metrics.device_pixel_ratio
    } else {
        1.0
    };

    Point::new(local.x * scale.x / dpr, local.y * scale.y / dpr)
}

/// Radius of a circle centered on `center` that passes through `edge`.
pub fn circle_radius(center: Point, edge: Point) -> f64 {
    center.distance(edge)
}

/// Corners of the axis-aligned rectangle spanned by `anchor` and `corner`,
/// walking from the anchor. Works for drags in every quadrant.
pub fn rect_corners(anchor: Point, corner: Point) -> [Point; 4] {
    let size = corner - anchor;
    [
        anchor,
        Point::new(anchor.x + size.x, anchor.y),
        corner,
        Point::new(anchor.x, anchor.y + size.y),
    ]
}
