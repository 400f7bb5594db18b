//! Falling olive leaves (stateful, timeline driven).

use ratatui::{buffer::Buffer, style::Color};

use crate::chars::{LEAF_GLYPHS, LEAF_STROKES};
use crate::color::fade;
use crate::ease::Ease;
use crate::timeline::{Prop, Props, Timeline};
use crate::tween::{Repeat, Tween};
use crate::viewport::Viewport;

/// Vertical position every fall starts from, above the viewport.
pub const ORIGIN_Y: f32 = -60.0;
/// How far below the viewport's bottom edge a fall ends.
pub const BELOW_VIEWPORT: f32 = 100.0;
pub const INITIAL_SCALE: f32 = 0.4;
pub const PEAK_OPACITY: f32 = 0.8;
pub const FADE_IN_MS: u64 = 1_500;
pub const FADE_OUT_MS: u64 = 2_000;
/// One direction of the sway oscillation.
pub const SWAY_HALF_CYCLE_MS: u64 = 2_500;
/// Pause between the end of one fall and the start of the next.
pub const REPEAT_DELAY_MS: u64 = 1_000;

const LEAF_COLOR: Color = Color::Rgb(120, 160, 40);
const VEIN_COLOR: Color = Color::Rgb(90, 130, 30);

/// Immutable description of one decorative leaf.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub id: u8,
    /// Edge length in px at full scale.
    pub size: f32,
    /// Horizontal anchor as a percentage of the viewport width.
    pub start_x: f32,
    /// Nominal vertical offset; falls always begin at [`ORIGIN_Y`].
    pub start_y: f32,
    /// Wait before the first fall, in seconds.
    pub delay: f32,
    /// Length of one fall, in seconds.
    pub duration: f32,
    /// Sway amplitude in px; the leaf swings between 0 and twice this.
    pub drift: f32,
    /// Total rotation over one fall, in degrees.
    pub rotate: f32,
}

impl Particle {
    pub fn delay_ms(&self) -> u64 {
        secs_to_ms(self.delay)
    }

    pub fn duration_ms(&self) -> u64 {
        secs_to_ms(self.duration)
    }
}

fn secs_to_ms(secs: f32) -> u64 {
    (secs.max(0.0) * 1_000.0).round() as u64
}

const fn leaf(
    id: u8,
    size: f32,
    start_x: f32,
    start_y: f32,
    delay: f32,
    duration: f32,
    drift: f32,
    rotate: f32,
) -> Particle {
    Particle {
        id,
        size,
        start_x,
        start_y,
        delay,
        duration,
        drift,
        rotate,
    }
}

/// The fixed leaf table, staggered so no two fall in lockstep.
pub const LEAVES: [Particle; 12] = [
    // Large
    leaf(1, 48.0, 8.0, -10.0, 0.0, 18.0, 30.0, 360.0),
    leaf(2, 40.0, 85.0, -8.0, 2.5, 22.0, -25.0, -300.0),
    leaf(3, 52.0, 25.0, -12.0, 5.0, 20.0, 40.0, 280.0),
    leaf(4, 36.0, 70.0, -6.0, 8.0, 19.0, -35.0, -400.0),
    // Medium
    leaf(5, 28.0, 45.0, -8.0, 3.0, 16.0, 20.0, 320.0),
    leaf(6, 32.0, 15.0, -10.0, 7.0, 21.0, -30.0, -260.0),
    leaf(7, 30.0, 60.0, -6.0, 1.5, 17.0, 35.0, 380.0),
    leaf(8, 26.0, 92.0, -12.0, 4.5, 23.0, -20.0, -340.0),
    // Small
    leaf(9, 20.0, 35.0, -5.0, 6.0, 15.0, 15.0, 400.0),
    leaf(10, 18.0, 78.0, -8.0, 9.0, 14.0, -18.0, -280.0),
    leaf(11, 22.0, 50.0, -10.0, 11.0, 20.0, 25.0, 300.0),
    leaf(12, 16.0, 5.0, -6.0, 10.0, 18.0, -12.0, -360.0),
];

/// Where and how a leaf should be drawn on one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafState {
    pub particle: Particle,
    pub props: Props,
}

impl LeafState {
    /// Top-left corner in viewport pixels.
    pub fn position(&self, viewport: &Viewport) -> (f32, f32) {
        let left = self.particle.start_x / 100.0 * viewport.width_px + self.props.x;
        (left, self.props.y)
    }

    /// Rendered edge length in px.
    pub fn size_px(&self) -> f32 {
        self.particle.size * self.props.scale
    }

    /// Glyph reflecting size and current rotation.
    pub fn glyph(&self) -> char {
        let turn = self.props.rotation.rem_euclid(360.0);
        if self.size_px() >= 24.0 {
            let half = usize::from(turn >= 180.0);
            LEAF_GLYPHS[half % LEAF_GLYPHS.len()]
        } else {
            let step = ((turn % 180.0) / 45.0) as usize;
            LEAF_STROKES[step % LEAF_STROKES.len()]
        }
    }

    pub fn color(&self) -> Color {
        let base = if self.size_px() >= 24.0 {
            LEAF_COLOR
        } else {
            VEIN_COLOR
        };
        fade(base, self.props.opacity)
    }
}

/// The running animation of one leaf: a looping fall timeline plus an
/// independent sway oscillation.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafMotion {
    particle: Particle,
    fall: Timeline,
    sway: Tween,
    sway_started_ms: Option<u64>,
}

impl LeafMotion {
    /// Build the timelines for a viewport `height_px` tall. Nothing plays
    /// until [`start`](Self::start).
    pub fn new(particle: Particle, height_px: f32) -> Self {
        let duration_ms = particle.duration_ms();
        let initial = Props {
            x: 0.0,
            y: ORIGIN_Y,
            opacity: 0.0,
            scale: INITIAL_SCALE,
            rotation: 0.0,
        };

        let fall = Timeline::new(initial)
            .delay(particle.delay_ms())
            .repeat(Repeat::Infinite)
            .repeat_delay(REPEAT_DELAY_MS)
            .to_at(Prop::Y, height_px + BELOW_VIEWPORT, duration_ms, Ease::Linear, 0)
            .to_at(Prop::Rotation, particle.rotate, duration_ms, Ease::Linear, 0)
            .to_at(Prop::Scale, 1.0, duration_ms, Ease::Linear, 0)
            .to_at(Prop::Opacity, PEAK_OPACITY, FADE_IN_MS, Ease::Power1In, 0)
            .to_at(
                Prop::Opacity,
                0.0,
                FADE_OUT_MS,
                Ease::Power1Out,
                duration_ms.saturating_sub(FADE_OUT_MS),
            );

        let sway = Tween::new(0.0, particle.drift * 2.0, SWAY_HALF_CYCLE_MS, Ease::SineInOut)
            .delay(particle.delay_ms())
            .repeat(Repeat::Infinite)
            .yoyo(true);

        Self {
            particle,
            fall,
            sway,
            sway_started_ms: None,
        }
    }

    pub fn particle(&self) -> &Particle {
        &self.particle
    }

    pub fn start(&mut self, now_ms: u64) {
        self.fall.play(now_ms);
        if self.fall.is_running() && self.sway_started_ms.is_none() {
            self.sway_started_ms = Some(now_ms);
        }
    }

    /// Cancel the fall and the sway. The leaf never animates again.
    pub fn stop(&mut self) {
        self.fall.kill();
        self.sway_started_ms = None;
    }

    pub fn is_running(&self) -> bool {
        self.fall.is_running()
    }

    /// State at `now_ms`, or `None` if the leaf is not running.
    pub fn sample(&self, now_ms: u64) -> Option<LeafState> {
        let mut props = self.fall.sample(now_ms)?;
        let sway_started = self.sway_started_ms?;
        props.x = self.sway.value_at(now_ms.saturating_sub(sway_started));
        Some(LeafState {
            particle: self.particle,
            props,
        })
    }

    /// Falls completed by `now_ms`, or `None` if not running.
    pub fn completed_falls(&self, now_ms: u64) -> Option<u64> {
        self.fall.completed_plays(now_ms)
    }
}

/// Draw leaves into the buffer. Leaves outside the viewport are skipped.
pub fn render(buf: &mut Buffer, viewport: &Viewport, leaves: &[LeafState]) {
    for leaf in leaves {
        if leaf.props.opacity <= 0.05 {
            continue;
        }
        let (left, top) = leaf.position(viewport);
        let half = leaf.size_px() / 2.0;
        let Some((x, y)) = viewport.cell_at(left + half, top + half) else {
            continue;
        };
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_char(leaf.glyph()).set_fg(leaf.color());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;

    const HEIGHT: f32 = 640.0;

    fn first() -> Particle {
        LEAVES[0]
    }

    #[test]
    fn test_table_is_distinct() {
        assert_eq!(LEAVES.len(), 12);
        for (i, a) in LEAVES.iter().enumerate() {
            assert_eq!(usize::from(a.id), i + 1);
            for b in &LEAVES[i + 1..] {
                assert_ne!((a.delay, a.start_x), (b.delay, b.start_x));
            }
        }
    }

    #[test]
    fn test_idle_leaf_has_no_state() {
        let motion = LeafMotion::new(first(), HEIGHT);
        assert_eq!(motion.sample(0), None);
    }

    #[test]
    fn test_initial_state_before_delay() {
        let particle = LEAVES[2]; // 5 s delay
        let mut motion = LeafMotion::new(particle, HEIGHT);
        motion.start(0);
        let state = motion.sample(4_000).unwrap();
        assert_eq!(state.props.y, ORIGIN_Y);
        assert_eq!(state.props.opacity, 0.0);
        assert_eq!(state.props.scale, INITIAL_SCALE);
        assert_eq!(state.props.rotation, 0.0);
        assert_eq!(state.props.x, 0.0);
    }

    #[test]
    fn test_fall_is_linear_to_below_viewport() {
        let particle = first(); // 18 s fall, no delay
        let mut motion = LeafMotion::new(particle, HEIGHT);
        motion.start(0);

        let end_y = HEIGHT + BELOW_VIEWPORT;
        let half = motion.sample(9_000).unwrap();
        assert!((half.props.y - (ORIGIN_Y + end_y) / 2.0).abs() < 1e-3);
        assert!((half.props.rotation - 180.0).abs() < 1e-3);
        assert!((half.props.scale - 0.7).abs() < 1e-3);

        let landed = motion.sample(18_000).unwrap();
        assert!((landed.props.y - end_y).abs() < 1e-3);
        assert!((landed.props.rotation - particle.rotate).abs() < 1e-3);
    }

    #[test]
    fn test_fade_in_and_out() {
        let mut motion = LeafMotion::new(first(), HEIGHT);
        motion.start(0);

        assert_eq!(motion.sample(0).unwrap().props.opacity, 0.0);
        let rising = motion.sample(750).unwrap().props.opacity;
        assert!(rising > 0.0 && rising < PEAK_OPACITY / 2.0);
        assert!((motion.sample(1_500).unwrap().props.opacity - PEAK_OPACITY).abs() < 1e-5);
        assert!((motion.sample(10_000).unwrap().props.opacity - PEAK_OPACITY).abs() < 1e-5);
        assert!((motion.sample(16_000).unwrap().props.opacity - PEAK_OPACITY).abs() < 1e-5);
        let falling = motion.sample(17_000).unwrap().props.opacity;
        assert!(falling > 0.0 && falling < PEAK_OPACITY);
        assert!(motion.sample(18_000).unwrap().props.opacity.abs() < 1e-5);
    }

    #[test]
    fn test_loops_after_pause() {
        let mut motion = LeafMotion::new(LEAVES[1], HEIGHT); // 2.5 s delay, 22 s fall
        motion.start(0);

        let end_of_first = 2_500 + 22_000;
        assert_eq!(motion.completed_falls(end_of_first - 1), Some(0));
        assert_eq!(motion.completed_falls(end_of_first), Some(1));

        // During the pause the leaf holds below the viewport, invisible.
        let paused = motion.sample(end_of_first + 500).unwrap();
        assert!(paused.props.y > HEIGHT);
        assert!(paused.props.opacity.abs() < 1e-5);

        // The second fall starts from the origin without waiting for the delay again.
        let restarted = motion.sample(end_of_first + REPEAT_DELAY_MS).unwrap();
        assert_eq!(restarted.props.y, ORIGIN_Y);
        assert_eq!(restarted.props.scale, INITIAL_SCALE);
    }

    #[test]
    fn test_sway_oscillates_after_delay() {
        let particle = LEAVES[1]; // drift -25, delay 2.5 s
        let mut motion = LeafMotion::new(particle, HEIGHT);
        motion.start(1_000);

        assert_eq!(motion.sample(3_400).unwrap().props.x, 0.0);
        let apex = motion.sample(1_000 + 2_500 + SWAY_HALF_CYCLE_MS).unwrap();
        assert!((apex.props.x - particle.drift * 2.0).abs() < 1e-3);
        let back = motion.sample(1_000 + 2_500 + 2 * SWAY_HALF_CYCLE_MS).unwrap();
        assert!(back.props.x.abs() < 1e-3);
    }

    #[test]
    fn test_stop_cancels_everything() {
        let mut motion = LeafMotion::new(first(), HEIGHT);
        motion.start(0);
        assert!(motion.is_running());
        motion.stop();
        assert!(!motion.is_running());
        assert_eq!(motion.sample(5_000), None);
        assert_eq!(motion.completed_falls(50_000), None);

        motion.start(6_000);
        assert_eq!(motion.sample(7_000), None);
    }

    #[test]
    fn test_render_skips_offscreen_and_draws_visible() {
        let area = Rect::new(0, 0, 40, 20);
        let viewport = Viewport::new(area);
        let mut buf = Buffer::empty(area);

        let visible = LeafState {
            particle: first(),
            props: Props {
                x: 0.0,
                y: 100.0,
                opacity: 0.8,
                scale: 1.0,
                rotation: 0.0,
            },
        };
        let above = LeafState {
            props: Props {
                y: ORIGIN_Y * 3.0,
                ..visible.props
            },
            ..visible
        };
        render(&mut buf, &viewport, &[visible, above]);

        let drawn: Vec<char> = buf
            .content()
            .iter()
            .filter_map(|cell| cell.symbol().chars().next())
            .filter(|ch| *ch != ' ')
            .collect();
        assert_eq!(drawn, vec![LEAF_GLYPHS[0]]);
    }
}
