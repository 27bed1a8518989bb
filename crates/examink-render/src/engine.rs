//! Full-repaint render engine.
//!
//! Every call to [`render`] starts from an opaque background and replays the
//! stroke list in order, so the same input always produces the same bitmap.

use crate::surface::{CompositeMode, StrokeStyle, Surface};
use examink_core::color::{black, css_color_or};
use examink_core::geometry::{circle_radius, rect_corners};
use examink_core::{Stroke, StrokeKind};
use kurbo::{BezPath, Circle, Point, Shape as KurboShape};
use peniko::Color;

/// Flattening tolerance used when converting circles to paths.
const CIRCLE_TOLERANCE: f64 = 0.1;

/// Clear `surface` to `background` and draw every stroke in list order.
pub fn render<S: Surface + ?Sized>(surface: &mut S, strokes: &[Stroke], background: Color) {
    surface.set_composite_mode(CompositeMode::PaintOver);
    surface.clear(background);
    for stroke in strokes {
        draw_stroke(surface, stroke);
    }
}

/// Repaint `strokes`, then draw an uncommitted stroke on top.
pub fn render_with_preview<S: Surface + ?Sized>(
    surface: &mut S,
    strokes: &[Stroke],
    preview: &Stroke,
    background: Color,
) {
    render(surface, strokes, background);
    draw_stroke(surface, preview);
}

/// Draw a single stroke over the current surface content.
///
/// Eraser strokes switch the surface to erase mode; the mode is always
/// restored to paint-over afterwards.
pub fn draw_stroke<S: Surface + ?Sized>(surface: &mut S, stroke: &Stroke) {
    let Some(path) = stroke_path(stroke) else {
        return;
    };

    let mode = match stroke.kind {
        StrokeKind::Eraser => CompositeMode::Erase,
        _ => CompositeMode::PaintOver,
    };
    surface.set_composite_mode(mode);
    surface.stroke_path(&path, &stroke_style(stroke));
    surface.set_composite_mode(CompositeMode::PaintOver);
}

/// Paint parameters for a stroke. Eraser strokes ignore their color.
pub fn stroke_style(stroke: &Stroke) -> StrokeStyle {
    let color = match stroke.kind {
        StrokeKind::Eraser => black(),
        _ => css_color_or(&stroke.color, black()),
    };
    StrokeStyle::new(color, stroke.width)
}

/// Geometry of a stroke, or `None` when there is nothing to draw.
pub fn stroke_path(stroke: &Stroke) -> Option<BezPath> {
    match (stroke.kind, stroke.endpoints()) {
        (StrokeKind::Line, Some((start, end))) => Some(polyline(&[start, end])),
        (StrokeKind::Rectangle, Some((anchor, corner))) => {
            let mut path = polyline(&rect_corners(anchor, corner));
            path.close_path();
            Some(path)
        }
        (StrokeKind::Circle, Some((center, edge))) => {
            let circle = Circle::new(center, circle_radius(center, edge));
            Some(circle.to_path(CIRCLE_TOLERANCE))
        }
        _ if stroke.points.len() >= 2 => Some(polyline(&stroke.points)),
        _ => None,
    }
}

fn polyline(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if let Some((first, rest)) = points.split_first() {
        path.move_to(*first);
        for point in rest {
            path.line_to(*point);
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{RecordingSurface, SurfaceOp};
    use kurbo::PathEl;
    use pretty_assertions::assert_eq;

    fn white() -> Color {
        Color::from_rgba8(255, 255, 255, 255)
    }

    fn pen(points: &[(f64, f64)]) -> Stroke {
        Stroke::freehand(
            points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
            "#ff0000",
            3.0,
        )
    }

    #[test]
    fn test_render_starts_with_clear() {
        let mut surface = RecordingSurface::new();
        render(&mut surface, &[pen(&[(0.0, 0.0), (5.0, 5.0)])], white());
        assert!(matches!(surface.ops()[1], SurfaceOp::Clear(_)));
        assert_eq!(surface.stroked_paths().len(), 1);
    }

    #[test]
    fn test_empty_and_single_point_strokes_skipped() {
        let mut surface = RecordingSurface::new();
        let strokes = vec![pen(&[]), pen(&[(1.0, 1.0)])];
        render(&mut surface, &strokes, white());
        assert!(surface.stroked_paths().is_empty());
    }

    #[test]
    fn test_eraser_mode_reset_after_stroke() {
        let mut surface = RecordingSurface::new();
        let mut eraser = pen(&[(0.0, 0.0), (5.0, 0.0)]);
        eraser.kind = StrokeKind::Eraser;
        let after = pen(&[(0.0, 1.0), (5.0, 1.0)]);
        render(&mut surface, &[eraser, after], white());

        let modes: Vec<CompositeMode> = surface
            .stroked_paths()
            .iter()
            .map(|(_, _, mode)| *mode)
            .collect();
        assert_eq!(modes, vec![CompositeMode::Erase, CompositeMode::PaintOver]);
        assert_eq!(surface.composite_mode(), CompositeMode::PaintOver);
    }

    #[test]
    fn test_eraser_ignores_color() {
        let mut a = pen(&[(0.0, 0.0), (5.0, 0.0)]);
        a.kind = StrokeKind::Eraser;
        let mut b = a.clone();
        b.color = "#00ff00".to_string();
        assert_eq!(stroke_style(&a).rgba8(), stroke_style(&b).rgba8());
        assert_eq!(stroke_style(&a).width, stroke_style(&b).width);
    }

    #[test]
    fn test_rectangle_path_all_quadrants() {
        for corner in [(10.0, 10.0), (-10.0, 10.0), (-10.0, -10.0), (10.0, -10.0)] {
            let stroke = Stroke::shape(
                StrokeKind::Rectangle,
                Point::new(0.0, 0.0),
                Point::new(corner.0, corner.1),
                "#000",
                1.0,
            );
            let path = stroke_path(&stroke).unwrap();
            let bounds = path.bounding_box();
            assert!((bounds.width() - 10.0).abs() < 1e-9);
            assert!((bounds.height() - 10.0).abs() < 1e-9);
            assert_eq!(path.elements().last(), Some(&PathEl::ClosePath));
        }
    }

    #[test]
    fn test_circle_radius_from_drag() {
        let stroke = Stroke::shape(
            StrokeKind::Circle,
            Point::new(50.0, 50.0),
            Point::new(53.0, 54.0),
            "#000",
            1.0,
        );
        let bounds = stroke_path(&stroke).unwrap().bounding_box();
        assert!((bounds.width() - 10.0).abs() < 0.01);
        assert!((bounds.center().x - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_line_uses_two_points() {
        let stroke = Stroke::shape(
            StrokeKind::Line,
            Point::new(1.0, 2.0),
            Point::new(3.0, 4.0),
            "#000",
            1.0,
        );
        let path = stroke_path(&stroke).unwrap();
        assert_eq!(
            path.elements(),
            &[
                PathEl::MoveTo(Point::new(1.0, 2.0)),
                PathEl::LineTo(Point::new(3.0, 4.0)),
            ]
        );
    }

    #[test]
    fn test_strokes_drawn_in_order() {
        let mut surface = RecordingSurface::new();
        let first = pen(&[(0.0, 0.0), (1.0, 0.0)]);
        let mut second = pen(&[(0.0, 0.0), (2.0, 0.0)]);
        second.color = "#0000ff".to_string();
        render(&mut surface, &[first, second], white());
        let colors: Vec<[u8; 4]> = surface
            .stroked_paths()
            .iter()
            .map(|(_, style, _)| style.rgba8())
            .collect();
        assert_eq!(colors, vec![[255, 0, 0, 255], [0, 0, 255, 255]]);
    }
}
