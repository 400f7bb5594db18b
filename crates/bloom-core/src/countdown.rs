//! The countdown engine: a one-second interval republishing the time left.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};

use crate::time::{TimeRemaining, time_remaining};

/// How often a running countdown republishes its value.
pub const TICK_PERIOD: TimeDelta = TimeDelta::milliseconds(1_000);

/// A repeating timer measured against wall-clock instants.
///
/// The interval does not own a thread; the host polls it and is told how
/// many periods elapsed since the last poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    period: TimeDelta,
    next_due: Option<DateTime<Utc>>,
}

impl Interval {
    /// Create a stopped interval. Non-positive periods are raised to 1 ms.
    pub fn new(period: TimeDelta) -> Self {
        Self {
            period: period.max(TimeDelta::milliseconds(1)),
            next_due: None,
        }
    }

    /// Arm the interval; the first fire is one period after `now`.
    pub fn start(&mut self, now: DateTime<Utc>) {
        self.next_due = Some(now + self.period);
    }

    /// Disarm the interval. Subsequent polls never fire.
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Number of periods that elapsed up to `now`, advancing the schedule.
    pub fn poll(&mut self, now: DateTime<Utc>) -> u32 {
        let Some(due) = self.next_due else {
            return 0;
        };
        if now < due {
            return 0;
        }

        let period_ms = self.period.num_milliseconds().max(1);
        let late_ms = now.signed_duration_since(due).num_milliseconds();
        let fired = late_ms / period_ms + 1;
        self.next_due = Some(due + TimeDelta::milliseconds(fired * period_ms));
        u32::try_from(fired).unwrap_or(u32::MAX)
    }
}

type Subscriber = Box<dyn FnMut(TimeRemaining)>;

/// Counts down to a fixed target instant.
///
/// Lifecycle: [`start`](Self::start) when the display appears,
/// [`tick`](Self::tick) on every host frame, [`stop`](Self::stop) when the
/// display goes away. Until the host calls [`settle`](Self::settle),
/// [`display`](Self::display) shows zeros so a placeholder frame never
/// flashes a stale value.
pub struct Countdown {
    target: DateTime<Utc>,
    interval: Interval,
    current: TimeRemaining,
    settled: bool,
    subscribers: Vec<Subscriber>,
}

impl fmt::Debug for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Countdown")
            .field("target", &self.target)
            .field("interval", &self.interval)
            .field("current", &self.current)
            .field("settled", &self.settled)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Countdown {
    /// Create a stopped countdown towards `target`.
    pub fn new(target: DateTime<Utc>) -> Self {
        Self {
            target,
            interval: Interval::new(TICK_PERIOD),
            current: TimeRemaining::ZERO,
            settled: false,
            subscribers: Vec::new(),
        }
    }

    pub fn target(&self) -> DateTime<Utc> {
        self.target
    }

    /// Register a callback invoked with every published value.
    pub fn subscribe(&mut self, subscriber: impl FnMut(TimeRemaining) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Compute the initial value, publish it and arm the interval.
    pub fn start(&mut self, now: DateTime<Utc>) {
        if self.interval.is_running() {
            tracing::debug!("countdown already running");
            return;
        }
        self.current = time_remaining(&self.target, &now);
        self.interval.start(now);
        tracing::debug!(deadline = %self.target, remaining = %self.current, "countdown started");
        self.publish();
    }

    /// Cancel the interval. No subscriber is called after this returns.
    pub fn stop(&mut self) {
        if self.interval.is_running() {
            tracing::debug!(remaining = %self.current, "countdown stopped");
        }
        self.interval.stop();
        self.settled = false;
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_running()
    }

    /// Fire any due ticks. Returns the republished value if a tick fired.
    ///
    /// Several missed periods collapse into one publication. The interval
    /// only fires past its schedule, which lies after every earlier tick, so
    /// a wall clock stepping backwards publishes nothing until it catches up
    /// and published values never increase while running.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<TimeRemaining> {
        if self.interval.poll(now) == 0 {
            return None;
        }

        self.current = time_remaining(&self.target, &now);
        self.publish();
        Some(self.current)
    }

    /// Mark the first frame as drawn; [`display`](Self::display) goes live.
    pub fn settle(&mut self) {
        self.settled = true;
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// The latest computed value, regardless of the settle rule.
    pub fn current(&self) -> TimeRemaining {
        self.current
    }

    /// The value to show: zeros until settled, then the live value.
    pub fn display(&self) -> TimeRemaining {
        if self.settled && self.is_running() {
            self.current
        } else {
            TimeRemaining::ZERO
        }
    }

    fn publish(&mut self) {
        let value = self.current;
        for subscriber in &mut self.subscribers {
            subscriber(value);
        }
    }
}
