//! Colour helpers for decorative layers.

use ratatui::style::Color;

/// Scale an RGB colour towards black by `alpha` in `[0, 1]`.
///
/// Terminals have no blending, so opacity over the dark page is
/// approximated by dimming.
pub fn fade(color: Color, alpha: f32) -> Color {
    let alpha = alpha.clamp(0.0, 1.0);
    match color {
        Color::Rgb(r, g, b) => Color::Rgb(
            (f32::from(r) * alpha) as u8,
            (f32::from(g) * alpha) as u8,
            (f32::from(b) * alpha) as u8,
        ),
        _ if alpha < 0.5 => Color::DarkGray,
        other => other,
    }
}

/// Build a colour from unit-range channels, clamping each.
pub fn rgb_unit(r: f32, g: f32, b: f32) -> Color {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0) as u8;
    Color::Rgb(channel(r), channel(g), channel(b))
}

/// Linear blend between two RGB colours.
pub fn mix(a: Color, b: Color, t: f32) -> Color {
    match (a, b) {
        (Color::Rgb(ar, ag, ab), Color::Rgb(br, bg, bb)) => {
            let t = t.clamp(0.0, 1.0);
            let lerp = |x: u8, y: u8| (f32::from(x) + (f32::from(y) - f32::from(x)) * t) as u8;
            Color::Rgb(lerp(ar, br), lerp(ag, bg), lerp(ab, bb))
        }
        _ if t < 0.5 => a,
        _ => b,
    }
}
