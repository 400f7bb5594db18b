//! Tweens, timelines and decorative animations for the bloom splash.
//!
//! The tweening primitives ([`Ease`], [`Tween`], [`Timeline`]) are plain
//! values sampled against an injected frame clock, so every animation can
//! be stepped deterministically in tests. On top of them sit the falling
//! leaf layer, entrance and scroll-triggered reveals, the countdown digit
//! transition, and the stateless ring and sphere backgrounds.

pub mod animations;
mod chars;
mod clock;
mod color;
mod digits;
mod ease;
mod layer;
mod reveal;
mod timeline;
mod tween;
mod viewport;

pub use clock::{FrameClock, ManualFrameClock, SystemFrameClock};
pub use color::{fade, mix, rgb_unit};
pub use digits::{
    DIGIT_BLUR_PX, DIGIT_TRANSITION_MS, DIGIT_TRAVEL_PX, DigitFrame, DigitPose, DigitTransition,
};
pub use ease::Ease;
pub use layer::{AmbientLayer, LeafEvent};
pub use reveal::{Appearance, Entrance, ScrollReveal, staggered};
pub use timeline::{Prop, Props, Timeline, TimelineState};
pub use tween::{Repeat, Tween};
pub use viewport::{PX_PER_COL, PX_PER_ROW, Viewport, px_to_rows};
