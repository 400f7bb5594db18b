//! Entrance animations and scroll-triggered reveals.

use crate::ease::Ease;
use crate::tween::{Tween, lerp};

/// Opacity and vertical offset of an element that animates into place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    pub opacity: f32,
    /// Offset from the resting position in px; positive is further down.
    pub offset_y: f32,
}

impl Appearance {
    pub const SETTLED: Self = Self {
        opacity: 1.0,
        offset_y: 0.0,
    };

    /// Whether the element is opaque enough to draw at all.
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.05
    }
}

/// A one-shot fade-and-rise played when a section first appears.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entrance {
    tween: Tween,
    rise_px: f32,
}

impl Entrance {
    pub fn new(delay_ms: u64, duration_ms: u64, rise_px: f32, ease: Ease) -> Self {
        Self {
            tween: Tween::new(0.0, 1.0, duration_ms, ease).delay(delay_ms),
            rise_px,
        }
    }

    /// Appearance `elapsed_ms` after the section mounted.
    pub fn at(&self, elapsed_ms: u64) -> Appearance {
        let t = self.tween.value_at(elapsed_ms);
        Appearance {
            opacity: t,
            offset_y: lerp(self.rise_px, 0.0, t),
        }
    }

    pub fn is_complete(&self, elapsed_ms: u64) -> bool {
        self.tween.is_complete(elapsed_ms)
    }
}

/// Build entrances for `count` children revealed one after another.
pub fn staggered(
    count: usize,
    delay_ms: u64,
    stagger_ms: u64,
    duration_ms: u64,
    rise_px: f32,
    ease: Ease,
) -> Vec<Entrance> {
    (0..count as u64)
        .map(|i| Entrance::new(delay_ms + i * stagger_ms, duration_ms, rise_px, ease))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Reverse,
}

/// Plays a staggered reveal when an element scrolls past a trigger line
/// and reverses it when the element scrolls back above the line.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollReveal {
    /// Trigger line as a fraction of the viewport height from the top.
    start_fraction: f32,
    items: usize,
    duration_ms: u64,
    stagger_ms: u64,
    rise_px: f32,
    ease: Ease,
    /// Play only the first time; never reverse.
    once: bool,
    direction: Direction,
    anchor_ms: u64,
    anchor_pos_ms: u64,
}

impl ScrollReveal {
    pub fn new(
        start_fraction: f32,
        items: usize,
        duration_ms: u64,
        stagger_ms: u64,
        rise_px: f32,
        ease: Ease,
    ) -> Self {
        Self {
            start_fraction,
            items: items.max(1),
            duration_ms,
            stagger_ms,
            rise_px,
            ease,
            once: false,
            direction: Direction::Reverse,
            anchor_ms: 0,
            anchor_pos_ms: 0,
        }
    }

    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }

    /// Total length of the staggered sequence.
    pub fn total_ms(&self) -> u64 {
        self.duration_ms + self.stagger_ms * (self.items as u64 - 1)
    }

    /// Feed the element's top edge relative to the viewport top.
    pub fn update(&mut self, now_ms: u64, element_top_px: f32, viewport_height_px: f32) {
        let triggered = element_top_px <= viewport_height_px * self.start_fraction;
        match (triggered, self.direction) {
            (true, Direction::Reverse) => self.turn(now_ms, Direction::Forward),
            (false, Direction::Forward) if !self.once => self.turn(now_ms, Direction::Reverse),
            _ => {}
        }
    }

    pub fn is_playing_forward(&self) -> bool {
        self.direction == Direction::Forward
    }

    /// Appearance of item `index` at `now_ms`.
    pub fn item(&self, index: usize, now_ms: u64) -> Appearance {
        let pos = self.position(now_ms);
        let local = pos.saturating_sub(self.stagger_ms * index as u64);
        let t = if self.duration_ms == 0 {
            if pos > 0 { 1.0 } else { 0.0 }
        } else {
            (local as f32 / self.duration_ms as f32).min(1.0)
        };
        let eased = self.ease.apply(t);
        Appearance {
            opacity: eased,
            offset_y: lerp(self.rise_px, 0.0, eased),
        }
    }

    fn turn(&mut self, now_ms: u64, direction: Direction) {
        self.anchor_pos_ms = self.position(now_ms);
        self.anchor_ms = now_ms;
        self.direction = direction;
    }

    /// Playhead on the sequence's local axis.
    fn position(&self, now_ms: u64) -> u64 {
        let moved = now_ms.saturating_sub(self.anchor_ms);
        match self.direction {
            Direction::Forward => (self.anchor_pos_ms + moved).min(self.total_ms()),
            Direction::Reverse => self.anchor_pos_ms.saturating_sub(moved),
        }
    }
}
