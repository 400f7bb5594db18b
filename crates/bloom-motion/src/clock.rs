//! Frame clocks driving animations.

use std::cell::Cell;
use std::time::Instant;

/// Monotonic milliseconds since the host started animating.
pub trait FrameClock {
    fn elapsed_ms(&self) -> u64;
}

/// Frame clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemFrameClock {
    started: Instant,
}

impl SystemFrameClock {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for SystemFrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SystemFrameClock {
    fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}

/// Frame clock stepped by hand.
#[derive(Debug, Default, Clone)]
pub struct ManualFrameClock {
    now_ms: Cell<u64>,
}

impl ManualFrameClock {
    pub fn new(now_ms: u64) -> Self {
        Self {
            now_ms: Cell::new(now_ms),
        }
    }

    pub fn advance(&self, delta_ms: u64) {
        self.now_ms.set(self.now_ms.get() + delta_ms);
    }

    pub fn set(&self, now_ms: u64) {
        self.now_ms.set(now_ms);
    }
}

impl FrameClock for ManualFrameClock {
    fn elapsed_ms(&self) -> u64 {
        self.now_ms.get()
    }
}
