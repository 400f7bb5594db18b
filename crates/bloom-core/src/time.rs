//! Remaining-time arithmetic.

use std::fmt;

use chrono::{DateTime, TimeZone};

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Time left until a target instant, split into calendar fields.
///
/// Every field is floored; once the target has passed all fields are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TimeRemaining {
    /// Whole days left. Unbounded above.
    pub days: u64,
    /// Hours past the whole days (0-23).
    pub hours: u32,
    /// Minutes past the whole hours (0-59).
    pub minutes: u32,
    /// Seconds past the whole minutes (0-59).
    pub seconds: u32,
}

impl TimeRemaining {
    /// All fields zero.
    pub const ZERO: Self = Self {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Decompose a millisecond gap. Negative gaps clamp to zero.
    pub fn from_millis(delta_ms: i64) -> Self {
        let delta = delta_ms.max(0);
        Self {
            days: (delta / MS_PER_DAY) as u64,
            hours: ((delta / MS_PER_HOUR) % 24) as u32,
            minutes: ((delta / MS_PER_MINUTE) % 60) as u32,
            seconds: ((delta / MS_PER_SECOND) % 60) as u32,
        }
    }

    /// Total whole seconds represented by the four fields.
    pub fn total_seconds(&self) -> u64 {
        self.days * 86_400
            + u64::from(self.hours) * 3_600
            + u64::from(self.minutes) * 60
            + u64::from(self.seconds)
    }

    /// Whether the target has been reached.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Fields as zero-padded strings, in display order.
    ///
    /// Days are padded to two digits but never truncated.
    pub fn padded(&self) -> [String; 4] {
        [
            format!("{:02}", self.days),
            format!("{:02}", self.hours),
            format!("{:02}", self.minutes),
            format!("{:02}", self.seconds),
        ]
    }
}

impl fmt::Display for TimeRemaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [d, h, m, s] = self.padded();
        write!(f, "{d}:{h}:{m}:{s}")
    }
}

/// Compute the time remaining from `now` until `target`.
///
/// Pure function of its inputs; instants after the target yield
/// [`TimeRemaining::ZERO`].
pub fn time_remaining<Tz: TimeZone, Tz2: TimeZone>(
    target: &DateTime<Tz>,
    now: &DateTime<Tz2>,
) -> TimeRemaining {
    let delta = target.clone().signed_duration_since(now.clone());
    TimeRemaining::from_millis(delta.num_milliseconds())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, TimeDelta, Utc};

    fn at(s: &str) -> DateTime<Utc> {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
            .unwrap()
            .and_utc()
    }

    #[test]
    fn test_one_hour_before_target() {
        let target = at("2026-03-01T00:00:00");
        let now = at("2026-02-28T23:00:00");
        assert_eq!(
            time_remaining(&target, &now),
            TimeRemaining {
                days: 0,
                hours: 1,
                minutes: 0,
                seconds: 0,
            }
        );
    }

    #[test]
    fn test_at_and_after_target_is_zero() {
        let target = at("2026-03-01T00:00:00");
        assert_eq!(time_remaining(&target, &target), TimeRemaining::ZERO);

        let day_later = target + TimeDelta::days(1);
        assert_eq!(time_remaining(&target, &day_later), TimeRemaining::ZERO);
        assert!(time_remaining(&target, &day_later).is_zero());
    }

    #[test]
    fn test_mixed_radix_fields() {
        let target = at("2026-03-01T00:00:00");
        let now = at("2026-01-15T09:47:31");
        let left = time_remaining(&target, &now);
        // Jan 15 09:47:31 -> Mar 1 00:00:00 is 44 days 14:12:29.
        assert_eq!(left.days, 44);
        assert_eq!(left.hours, 14);
        assert_eq!(left.minutes, 12);
        assert_eq!(left.seconds, 29);
    }

    #[test]
    fn test_fields_stay_in_range_and_reconstitute() {
        let target = at("2026-03-01T00:00:00");
        // Step through a spread of offsets, including sub-second ones.
        let mut offset_ms: i64 = 0;
        while offset_ms < 400 * 86_400_000 {
            let now = target - TimeDelta::milliseconds(offset_ms);
            let left = time_remaining(&target, &now);
            assert!(left.seconds < 60);
            assert!(left.minutes < 60);
            assert!(left.hours < 24);

            let rebuilt_ms = left.total_seconds() as i64 * 1000;
            assert!(offset_ms - rebuilt_ms >= 0);
            assert!(offset_ms - rebuilt_ms < 1000);

            offset_ms = offset_ms * 3 + 7_919;
        }
    }

    #[test]
    fn test_pure_function() {
        let target = at("2026-03-01T00:00:00");
        let now = at("2026-02-11T05:06:07");
        assert_eq!(time_remaining(&target, &now), time_remaining(&target, &now));
    }

    #[test]
    fn test_sub_second_gap_floors() {
        assert_eq!(TimeRemaining::from_millis(999), TimeRemaining::ZERO);
        assert_eq!(TimeRemaining::from_millis(1_000).seconds, 1);
        assert_eq!(TimeRemaining::from_millis(-5_000), TimeRemaining::ZERO);
    }

    #[test]
    fn test_padded_and_display() {
        let left = TimeRemaining {
            days: 123,
            hours: 4,
            minutes: 0,
            seconds: 9,
        };
        assert_eq!(left.padded(), ["123", "04", "00", "09"].map(String::from));
        assert_eq!(left.to_string(), "123:04:00:09");
        assert_eq!(TimeRemaining::ZERO.to_string(), "00:00:00:00");
    }
}
