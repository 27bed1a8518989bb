//! CSS color handling for stroke colors.

use peniko::Color;

/// Toolbar palette offered to the test taker.
pub const PALETTE: [&str; 16] = [
    "#000000", "#ff0000", "#00ff00", "#0000ff",
    "#ffff00", "#ff00ff", "#00ffff", "#800000",
    "#008000", "#000080", "#808000", "#800080",
    "#008080", "#c0c0c0", "#808080", "#ffffff",
];

/// Color given to new strokes before the user picks one.
pub const DEFAULT_COLOR: &str = "#000000";

/// Background every repaint starts from.
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

/// Parse any CSS color string into an RGBA paint color.
pub fn parse_css_color(css: &str) -> Option<Color> {
    let parsed = csscolorparser::parse(css.trim()).ok()?;
    let [r, g, b, a] = parsed.to_rgba8();
    Some(Color::from_rgba8(r, g, b, a))
}

/// Parse a CSS color, falling back to `fallback` when the string is not a color.
pub fn css_color_or(css: &str, fallback: Color) -> Color {
    parse_css_color(css).unwrap_or_else(|| {
        log::warn!("Unrecognized color {:?}, using fallback", css);
        fallback
    })
}

/// Opaque black.
pub fn black() -> Color {
    Color::from_rgba8(0, 0, 0, 255)
}

/// Opaque white.
pub fn white() -> Color {
    Color::from_rgba8(255, 255, 255, 255)
}
