//! Canvas2D style strings.

use examink_render::CompositeMode;
use peniko::Color;

/// `globalCompositeOperation` value for a composite mode.
pub fn composite_operation(mode: CompositeMode) -> &'static str {
    match mode {
        CompositeMode::PaintOver => "source-over",
        CompositeMode::Erase => "destination-out",
    }
}

/// CSS `rgba()` string for a paint color.
pub fn css_rgba(color: Color) -> String {
    let c = color.to_rgba8();
    if c.a == 255 {
        format!("rgb({}, {}, {})", c.r, c.g, c.b)
    } else {
        format!("rgba({}, {}, {}, {:.3})", c.r, c.g, c.b, f64::from(c.a) / 255.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_color() {
        assert_eq!(css_rgba(Color::from_rgba8(255, 0, 16, 255)), "rgb(255, 0, 16)");
    }

    #[test]
    fn test_translucent_color() {
        assert_eq!(
            css_rgba(Color::from_rgba8(0, 0, 0, 0)),
            "rgba(0, 0, 0, 0.000)"
        );
    }

    #[test]
    fn test_composite_names() {
        assert_eq!(composite_operation(CompositeMode::Erase), "destination-out");
        assert_eq!(composite_operation(CompositeMode::PaintOver), "source-over");
    }
}
