//! Accent colours and animation speed presets.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Accent colour used for the countdown digits, chips and highlights.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccentTheme {
    #[default]
    Olive,
    Emerald,
    Sunset,
    Ocean,
    Mono,
}

impl AccentTheme {
    /// Get the primary colour for this theme.
    pub fn color(self) -> Color {
        match self {
            AccentTheme::Olive => Color::Rgb(160, 196, 72),
            AccentTheme::Emerald => Color::Rgb(52, 211, 153),
            AccentTheme::Sunset => Color::Rgb(251, 146, 60),
            AccentTheme::Ocean => Color::Rgb(56, 189, 248),
            AccentTheme::Mono => Color::Rgb(235, 235, 235),
        }
    }

    /// Cycle to the next theme.
    pub fn next(self) -> Self {
        match self {
            AccentTheme::Olive => AccentTheme::Emerald,
            AccentTheme::Emerald => AccentTheme::Sunset,
            AccentTheme::Sunset => AccentTheme::Ocean,
            AccentTheme::Ocean => AccentTheme::Mono,
            AccentTheme::Mono => AccentTheme::Olive,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AccentTheme::Olive => "olive",
            AccentTheme::Emerald => "emerald",
            AccentTheme::Sunset => "sunset",
            AccentTheme::Ocean => "ocean",
            AccentTheme::Mono => "mono",
        }
    }
}

/// Playback rate applied to decorative animations.
///
/// The countdown itself always runs in real time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl AnimationSpeed {
    /// Multiplier applied to elapsed animation time.
    pub fn playback_rate(self) -> f64 {
        match self {
            AnimationSpeed::Slow => 0.5,
            AnimationSpeed::Normal => 1.0,
            AnimationSpeed::Fast => 1.5,
        }
    }

    /// Scale a real elapsed time into animation time.
    pub fn scale_ms(self, elapsed_ms: u64) -> u64 {
        (elapsed_ms as f64 * self.playback_rate()) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_cycle_returns_to_start() {
        let mut theme = AccentTheme::default();
        for _ in 0..5 {
            theme = theme.next();
        }
        assert_eq!(theme, AccentTheme::Olive);
    }

    #[test]
    fn test_speed_scaling() {
        assert_eq!(AnimationSpeed::Normal.scale_ms(1_000), 1_000);
        assert_eq!(AnimationSpeed::Slow.scale_ms(1_000), 500);
        assert_eq!(AnimationSpeed::Fast.scale_ms(1_000), 1_500);
    }
}
