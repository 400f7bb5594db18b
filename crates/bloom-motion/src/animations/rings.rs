//! Breathing concentric rings behind the hero title.

use ratatui::{buffer::Buffer, layout::Rect, style::Color};

use crate::chars::RING_CHARS;
use crate::color::fade;
use crate::ease::Ease;
use crate::tween::{Repeat, Tween};
use crate::viewport::Viewport;

pub const RING_COUNT: usize = 5;
const BASE_DIAMETER_PX: f32 = 200.0;
const DIAMETER_STEP_PX: f32 = 150.0;
/// Layer fade-in when the hero first appears.
const LAYER_FADE_MS: u64 = 2_000;
/// Half the stroke width in px.
const STROKE_PX: f32 = 5.0;
const RING_COLOR: Color = Color::Rgb(255, 255, 255);

/// Size and visibility of one ring at an instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingState {
    pub radius_px: f32,
    pub opacity: f32,
}

fn breathing(index: usize, from: f32, to: f32) -> Tween {
    let cycle_ms = (4 + index as u64) * 1_000;
    Tween::new(from, to, cycle_ms / 2, Ease::EaseInOut)
        .delay(index as u64 * 500)
        .repeat(Repeat::Infinite)
        .yoyo(true)
}

/// All rings at `elapsed_ms` since the hero appeared.
pub fn states(elapsed_ms: u64) -> [RingState; RING_COUNT] {
    let layer = Tween::new(0.0, 1.0, LAYER_FADE_MS, Ease::Linear).value_at(elapsed_ms);
    std::array::from_fn(|i| {
        let diameter = BASE_DIAMETER_PX + DIAMETER_STEP_PX * i as f32;
        let scale = breathing(i, 1.0, 1.1).value_at(elapsed_ms);
        let opacity = breathing(i, 0.1, 0.3).value_at(elapsed_ms);
        RingState {
            radius_px: diameter / 2.0 * scale,
            opacity: opacity * layer,
        }
    })
}

/// Draw ring outlines centred in `area`.
pub fn render(buf: &mut Buffer, area: Rect, elapsed_ms: u64) {
    let viewport = Viewport::new(area);
    let (cx, cy) = (viewport.width_px / 2.0, viewport.height_px / 2.0);
    let rings = states(elapsed_ms);

    for row in 0..area.height {
        for col in 0..area.width {
            let (px, py) = Viewport::cell_center(col, row);
            let dist = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
            let Some(ring) = rings
                .iter()
                .find(|ring| (dist - ring.radius_px).abs() <= STROKE_PX)
            else {
                continue;
            };
            let level = ((ring.opacity / 0.3) * RING_CHARS.len() as f32) as usize;
            let glyph = RING_CHARS[level.min(RING_CHARS.len() - 1)];
            if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                cell.set_char(glyph).set_fg(fade(RING_COLOR, ring.opacity * 2.0));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rings_start_hidden_at_rest_size() {
        let rings = states(0);
        for (i, ring) in rings.iter().enumerate() {
            let expected = (BASE_DIAMETER_PX + DIAMETER_STEP_PX * i as f32) / 2.0;
            assert_eq!(ring.radius_px, expected);
            assert_eq!(ring.opacity, 0.0);
        }
    }

    #[test]
    fn test_innermost_ring_breathes() {
        // Ring 0: 4 s cycle, peak at 2 s.
        let peak = states(2_000)[0];
        assert!((peak.radius_px - 110.0).abs() < 1e-3);
        assert!((peak.opacity - 0.3).abs() < 1e-5);

        let rest = states(4_000)[0];
        assert!((rest.radius_px - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_outer_rings_wait_for_their_delay() {
        let rings = states(1_000);
        assert_eq!(rings[4].radius_px, (BASE_DIAMETER_PX + 4.0 * DIAMETER_STEP_PX) / 2.0);
        assert!(rings[0].radius_px > BASE_DIAMETER_PX / 2.0);
    }
}
