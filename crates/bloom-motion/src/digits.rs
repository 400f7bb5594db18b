//! Enter/exit transition for a changing countdown field.

use crate::ease::Ease;
use crate::tween::lerp;

pub const DIGIT_TRANSITION_MS: u64 = 350;
pub const DIGIT_EASE: Ease = Ease::CubicBezier(0.22, 1.0, 0.36, 1.0);
/// Distance travelled by the entering and leaving value, in px.
pub const DIGIT_TRAVEL_PX: f32 = 30.0;
/// Blur radius at the start of entry and end of exit, in px.
pub const DIGIT_BLUR_PX: f32 = 4.0;

/// One value's pose during a transition.
#[derive(Debug, Clone, PartialEq)]
pub struct DigitPose {
    pub text: String,
    /// Vertical offset in px; negative is above the resting position.
    pub offset_y: f32,
    pub opacity: f32,
    pub blur: f32,
}

/// Both values involved in a transition at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct DigitFrame {
    pub incoming: DigitPose,
    pub outgoing: Option<DigitPose>,
}

/// Tracks the displayed text of one countdown field and animates changes:
/// the new value slides down into place while sharpening, the old one
/// slides further down while fading.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DigitTransition {
    current: String,
    previous: Option<String>,
    changed_ms: Option<u64>,
}

impl DigitTransition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the displayed text, starting a transition if it changed.
    pub fn update(&mut self, text: &str, now_ms: u64) {
        if self.changed_ms.is_some() && self.current == text {
            return;
        }
        let previous = std::mem::replace(&mut self.current, text.to_string());
        self.previous = self.changed_ms.map(|_| previous);
        self.changed_ms = Some(now_ms);
    }

    pub fn text(&self) -> &str {
        &self.current
    }

    pub fn is_animating(&self, now_ms: u64) -> bool {
        self.changed_ms
            .is_some_and(|changed| now_ms.saturating_sub(changed) < DIGIT_TRANSITION_MS)
    }

    /// Poses at `now_ms`.
    pub fn frame(&self, now_ms: u64) -> DigitFrame {
        let elapsed = self
            .changed_ms
            .map_or(DIGIT_TRANSITION_MS, |changed| now_ms.saturating_sub(changed));
        let t = DIGIT_EASE.apply(elapsed as f32 / DIGIT_TRANSITION_MS as f32);

        let incoming = DigitPose {
            text: self.current.clone(),
            offset_y: lerp(-DIGIT_TRAVEL_PX, 0.0, t),
            opacity: t,
            blur: lerp(DIGIT_BLUR_PX, 0.0, t),
        };
        let outgoing = self
            .previous
            .as_ref()
            .filter(|_| elapsed < DIGIT_TRANSITION_MS)
            .map(|text| DigitPose {
                text: text.clone(),
                offset_y: lerp(0.0, DIGIT_TRAVEL_PX, t),
                opacity: 1.0 - t,
                blur: lerp(0.0, DIGIT_BLUR_PX, t),
            });

        DigitFrame { incoming, outgoing }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_value_enters_without_outgoing() {
        let mut digit = DigitTransition::new();
        digit.update("07", 1_000);
        let start = digit.frame(1_000);
        assert_eq!(start.incoming.text, "07");
        assert_eq!(start.incoming.offset_y, -DIGIT_TRAVEL_PX);
        assert_eq!(start.incoming.blur, DIGIT_BLUR_PX);
        assert_eq!(start.outgoing, None);
    }

    #[test]
    fn test_change_swaps_values() {
        let mut digit = DigitTransition::new();
        digit.update("10", 0);
        digit.update("09", 1_000);
        assert!(digit.is_animating(1_100));

        let mid = digit.frame(1_100);
        assert_eq!(mid.incoming.text, "09");
        let outgoing = mid.outgoing.unwrap();
        assert_eq!(outgoing.text, "10");
        assert!(outgoing.offset_y > 0.0);
        assert!((mid.incoming.opacity + outgoing.opacity - 1.0).abs() < 1e-5);

        let settled = digit.frame(1_000 + DIGIT_TRANSITION_MS);
        assert_eq!(settled.outgoing, None);
        assert_eq!(settled.incoming.offset_y, 0.0);
        assert_eq!(settled.incoming.opacity, 1.0);
        assert!(!digit.is_animating(1_000 + DIGIT_TRANSITION_MS));
    }

    #[test]
    fn test_same_value_does_not_restart() {
        let mut digit = DigitTransition::new();
        digit.update("42", 0);
        digit.update("42", 5_000);
        assert!(!digit.is_animating(5_000));
        assert_eq!(digit.text(), "42");
    }
}
