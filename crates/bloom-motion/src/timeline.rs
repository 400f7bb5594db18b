//! Multi-property timelines with looping and explicit teardown.

use crate::ease::Ease;
use crate::tween::{Repeat, Tween};

/// An animatable visual property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prop {
    X,
    Y,
    Opacity,
    Scale,
    Rotation,
}

/// A full set of property values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Props {
    /// Horizontal offset in px.
    pub x: f32,
    /// Vertical offset in px.
    pub y: f32,
    pub opacity: f32,
    pub scale: f32,
    /// Rotation in degrees.
    pub rotation: f32,
}

impl Default for Props {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            opacity: 1.0,
            scale: 1.0,
            rotation: 0.0,
        }
    }
}

impl Props {
    pub fn get(&self, prop: Prop) -> f32 {
        match prop {
            Prop::X => self.x,
            Prop::Y => self.y,
            Prop::Opacity => self.opacity,
            Prop::Scale => self.scale,
            Prop::Rotation => self.rotation,
        }
    }

    pub fn set(&mut self, prop: Prop, value: f32) {
        match prop {
            Prop::X => self.x = value,
            Prop::Y => self.y = value,
            Prop::Opacity => self.opacity = value,
            Prop::Scale => self.scale = value,
            Prop::Rotation => self.rotation = value,
        }
    }
}

/// A tween placed at an offset on the timeline's local axis.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Track {
    prop: Prop,
    at_ms: u64,
    tween: Tween,
}

impl Track {
    fn end_ms(&self) -> u64 {
        self.at_ms + self.tween.duration_ms
    }
}

/// Lifecycle of a [`Timeline`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineState {
    /// Built but not playing.
    Idle,
    /// Playing since `started_ms` on the host frame clock.
    Running { started_ms: u64 },
    /// Torn down; never produces values again.
    Killed,
}

/// A sequence of property tweens that can loop.
///
/// Each tween starts from whatever value the property holds at its
/// position, so consecutive tweens on the same property chain smoothly.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    initial: Props,
    tracks: Vec<Track>,
    delay_ms: u64,
    repeat: Repeat,
    repeat_delay_ms: u64,
    state: TimelineState,
}

impl Timeline {
    /// Create an idle, empty timeline whose properties start at `initial`.
    pub fn new(initial: Props) -> Self {
        Self {
            initial,
            tracks: Vec::new(),
            delay_ms: 0,
            repeat: Repeat::Once,
            repeat_delay_ms: 0,
            state: TimelineState::Idle,
        }
    }

    /// Wait before the first play only.
    pub fn delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    /// Pause between plays.
    pub fn repeat_delay(mut self, repeat_delay_ms: u64) -> Self {
        self.repeat_delay_ms = repeat_delay_ms;
        self
    }

    /// Append a tween to `target` after the current end of the timeline.
    pub fn to(self, prop: Prop, target: f32, duration_ms: u64, ease: Ease) -> Self {
        let at_ms = self.duration_ms();
        self.to_at(prop, target, duration_ms, ease, at_ms)
    }

    /// Place a tween to `target` at an absolute position.
    pub fn to_at(
        mut self,
        prop: Prop,
        target: f32,
        duration_ms: u64,
        ease: Ease,
        at_ms: u64,
    ) -> Self {
        let from = self.props_at_local(at_ms).get(prop);
        self.tracks.push(Track {
            prop,
            at_ms,
            tween: Tween::new(from, target, duration_ms, ease),
        });
        self
    }

    /// Length of one play.
    pub fn duration_ms(&self) -> u64 {
        self.tracks.iter().map(Track::end_ms).max().unwrap_or(0)
    }

    pub fn state(&self) -> TimelineState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TimelineState::Running { .. })
    }

    /// Start playing. Killed timelines stay killed.
    pub fn play(&mut self, now_ms: u64) {
        if self.state == TimelineState::Idle {
            self.state = TimelineState::Running { started_ms: now_ms };
        }
    }

    /// Tear down. All subsequent samples return `None`.
    pub fn kill(&mut self) {
        self.state = TimelineState::Killed;
    }

    /// Property values at `now_ms`, or `None` unless running.
    pub fn sample(&self, now_ms: u64) -> Option<Props> {
        let local = self.local_ms(now_ms)?;
        let Some(local) = local else {
            return Some(self.initial);
        };

        let duration = self.duration_ms();
        let cycle = self.cycle_ms();
        let play = local / cycle;
        if self.repeat.plays().is_some_and(|plays| play >= plays) {
            return Some(self.props_at_local(duration));
        }
        let within = (local % cycle).min(duration);
        Some(self.props_at_local(within))
    }

    /// Number of plays finished by `now_ms`, or `None` unless running.
    pub fn completed_plays(&self, now_ms: u64) -> Option<u64> {
        let local = self.local_ms(now_ms)?;
        let Some(local) = local else {
            return Some(0);
        };

        let duration = self.duration_ms();
        let done = if local < duration {
            0
        } else {
            (local - duration) / self.cycle_ms() + 1
        };
        Some(match self.repeat.plays() {
            Some(plays) => done.min(plays),
            None => done,
        })
    }

    /// `None` if not running; `Some(None)` while still in the start delay.
    fn local_ms(&self, now_ms: u64) -> Option<Option<u64>> {
        let TimelineState::Running { started_ms } = self.state else {
            return None;
        };
        let begin = started_ms + self.delay_ms;
        Some(now_ms.checked_sub(begin))
    }

    fn cycle_ms(&self) -> u64 {
        (self.duration_ms() + self.repeat_delay_ms).max(1)
    }

    fn props_at_local(&self, t: u64) -> Props {
        let mut props = self.initial;
        for track in self.tracks.iter().filter(|track| track.at_ms <= t) {
            props.set(track.prop, track.tween.value_at(t - track.at_ms));
        }
        props
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fade_timeline() -> Timeline {
        let initial = Props {
            opacity: 0.0,
            ..Props::default()
        };
        Timeline::new(initial)
            .to(Prop::Y, 100.0, 10_000, Ease::Linear)
            .to_at(Prop::Opacity, 0.8, 1_000, Ease::Linear, 0)
            .to_at(Prop::Opacity, 0.0, 2_000, Ease::Linear, 8_000)
    }

    #[test]
    fn test_idle_and_killed_timelines_yield_nothing() {
        let mut timeline = fade_timeline();
        assert_eq!(timeline.state(), TimelineState::Idle);
        assert_eq!(timeline.sample(0), None);

        timeline.play(0);
        assert!(timeline.sample(10).is_some());

        timeline.kill();
        assert_eq!(timeline.sample(20), None);
        assert_eq!(timeline.completed_plays(20), None);

        timeline.play(30);
        assert_eq!(timeline.state(), TimelineState::Killed);
    }

    #[test]
    fn test_chained_tweens_pick_up_current_value() {
        let mut timeline = fade_timeline();
        timeline.play(0);

        assert_eq!(timeline.duration_ms(), 10_000);
        let mid = timeline.sample(5_000).unwrap();
        assert_eq!(mid.y, 50.0);
        assert_eq!(mid.opacity, 0.8);

        let fading = timeline.sample(9_000).unwrap();
        assert!((fading.opacity - 0.4).abs() < 1e-5);
    }

    #[test]
    fn test_delay_shows_initial_props() {
        let mut timeline = fade_timeline().delay(3_000);
        timeline.play(1_000);
        let held = timeline.sample(3_999).unwrap();
        assert_eq!(held.opacity, 0.0);
        assert_eq!(held.y, 0.0);
        assert_eq!(timeline.completed_plays(3_999), Some(0));
        assert_eq!(timeline.sample(9_000).unwrap().y, 50.0);
    }

    #[test]
    fn test_repeat_delay_holds_end_then_restarts() {
        let mut timeline = fade_timeline()
            .repeat(Repeat::Infinite)
            .repeat_delay(1_000);
        timeline.play(0);

        let paused = timeline.sample(10_500).unwrap();
        assert_eq!(paused.y, 100.0);
        assert_eq!(paused.opacity, 0.0);

        let second = timeline.sample(11_000 + 5_000).unwrap();
        assert_eq!(second.y, 50.0);

        assert_eq!(timeline.completed_plays(9_999), Some(0));
        assert_eq!(timeline.completed_plays(10_000), Some(1));
        assert_eq!(timeline.completed_plays(21_000), Some(2));
    }

    #[test]
    fn test_finite_repeat_settles_on_final_state() {
        let mut timeline = fade_timeline().repeat(Repeat::Times(1));
        timeline.play(0);
        let done = timeline.sample(1_000_000).unwrap();
        assert_eq!(done.y, 100.0);
        assert_eq!(timeline.completed_plays(1_000_000), Some(2));
    }
}
