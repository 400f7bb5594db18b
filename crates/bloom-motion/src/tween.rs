//! Single-value tweens with delay, repeat and yoyo.

use crate::ease::Ease;

/// How many times a tween or timeline plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Repeat {
    /// Play once.
    #[default]
    Once,
    /// Play once, then `n` more times.
    Times(u32),
    /// Play until killed.
    Infinite,
}

impl Repeat {
    /// Total number of plays, `None` for infinite.
    pub fn plays(self) -> Option<u64> {
        match self {
            Repeat::Once => Some(1),
            Repeat::Times(n) => Some(u64::from(n) + 1),
            Repeat::Infinite => None,
        }
    }
}

/// Interpolates one value from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub duration_ms: u64,
    pub ease: Ease,
    pub delay_ms: u64,
    pub repeat: Repeat,
    /// Alternate direction on every other play.
    pub yoyo: bool,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration_ms: u64, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration_ms,
            ease,
            delay_ms: 0,
            repeat: Repeat::Once,
            yoyo: false,
        }
    }

    pub fn delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }

    /// Time from start to the end of the final play, `None` if infinite.
    pub fn total_ms(&self) -> Option<u64> {
        self.repeat
            .plays()
            .map(|plays| self.delay_ms + self.duration_ms * plays)
    }

    pub fn is_complete(&self, elapsed_ms: u64) -> bool {
        self.total_ms().is_some_and(|total| elapsed_ms >= total)
    }

    /// Eased progress in `[0, 1]` at `elapsed_ms` after the tween started,
    /// with yoyo plays mirrored.
    pub fn progress_at(&self, elapsed_ms: u64) -> f32 {
        if elapsed_ms < self.delay_ms {
            return 0.0;
        }
        let local = elapsed_ms - self.delay_ms;
        if self.duration_ms == 0 {
            return self.final_progress();
        }

        let play = local / self.duration_ms;
        if self.repeat.plays().is_some_and(|plays| play >= plays) {
            return self.final_progress();
        }

        let t = (local % self.duration_ms) as f32 / self.duration_ms as f32;
        if self.yoyo && play % 2 == 1 {
            self.ease.apply(1.0 - t)
        } else {
            self.ease.apply(t)
        }
    }

    pub fn value_at(&self, elapsed_ms: u64) -> f32 {
        lerp(self.from, self.to, self.progress_at(elapsed_ms))
    }

    fn final_progress(&self) -> f32 {
        match self.repeat.plays() {
            Some(plays) if self.yoyo && plays % 2 == 0 => 0.0,
            _ => 1.0,
        }
    }
}

pub(crate) fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_tween_interpolates() {
        let tween = Tween::new(0.0, 100.0, 1_000, Ease::Linear);
        assert_eq!(tween.value_at(0), 0.0);
        assert_eq!(tween.value_at(250), 25.0);
        assert_eq!(tween.value_at(1_000), 100.0);
        assert_eq!(tween.value_at(5_000), 100.0);
        assert!(tween.is_complete(1_000));
        assert!(!tween.is_complete(999));
    }

    #[test]
    fn test_delay_holds_start_value() {
        let tween = Tween::new(10.0, 20.0, 1_000, Ease::Linear).delay(500);
        assert_eq!(tween.value_at(0), 10.0);
        assert_eq!(tween.value_at(499), 10.0);
        assert_eq!(tween.value_at(1_000), 15.0);
        assert_eq!(tween.total_ms(), Some(1_500));
    }

    #[test]
    fn test_yoyo_reverses_alternate_plays() {
        let tween = Tween::new(0.0, 60.0, 2_500, Ease::Linear)
            .repeat(Repeat::Infinite)
            .yoyo(true);
        assert_eq!(tween.value_at(1_250), 30.0);
        assert_eq!(tween.value_at(2_500), 60.0);
        assert_eq!(tween.value_at(3_750), 30.0);
        assert_eq!(tween.value_at(5_000), 0.0);
        assert_eq!(tween.value_at(6_250), 30.0);
        assert_eq!(tween.total_ms(), None);
        assert!(!tween.is_complete(u64::MAX));
    }

    #[test]
    fn test_finite_yoyo_ends_where_it_started() {
        let tween = Tween::new(1.0, 1.1, 100, Ease::Linear)
            .repeat(Repeat::Times(1))
            .yoyo(true);
        assert_eq!(tween.value_at(10_000), 1.0);

        let odd = tween.repeat(Repeat::Times(2));
        assert!((odd.value_at(10_000) - 1.1).abs() < 1e-6);
    }

    #[test]
    fn test_zero_duration_jumps_to_end() {
        let tween = Tween::new(0.0, 5.0, 0, Ease::SineInOut);
        assert_eq!(tween.value_at(0), 5.0);
    }
}
