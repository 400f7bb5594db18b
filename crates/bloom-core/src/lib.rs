//! Core types for the bloom coming-soon splash.
//!
//! This crate holds the countdown engine (remaining-time arithmetic, the
//! one-second republishing interval and the settle rule for the first
//! frame), the injectable wall clock, and the small enums shared by the
//! renderer and the configuration file.

mod clock;
mod countdown;
mod theme;
mod time;

pub use clock::{Clock, ManualClock, SystemClock};
pub use countdown::{Countdown, Interval, TICK_PERIOD};
pub use theme::{AccentTheme, AnimationSpeed};
pub use time::{TimeRemaining, time_remaining};
