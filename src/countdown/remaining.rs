//! Time remaining until a target instant

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const MS_PER_DAY: i64 = 86_400_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_SECOND: i64 = 1_000;

/// Non-negative breakdown of the time left until a target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRemaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl TimeRemaining {
    pub const ZERO: TimeRemaining = TimeRemaining {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Split a millisecond difference; zero or negative yields all zeros
    pub fn from_millis(diff_ms: i64) -> Self {
        if diff_ms <= 0 {
            return Self::ZERO;
        }

        Self {
            days: diff_ms / MS_PER_DAY,
            hours: (diff_ms % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (diff_ms % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (diff_ms % MS_PER_MINUTE) / MS_PER_SECOND,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    pub fn total_seconds(&self) -> i64 {
        self.days * 86_400 + self.hours * 3_600 + self.minutes * 60 + self.seconds
    }
}

impl fmt::Display for TimeRemaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d {:02}h {:02}m {:02}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Parse a target timestamp.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS` (both read
/// as UTC) and a bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_target(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Time left from `now` until `target`; a missing target yields zeros
pub fn time_remaining(target: Option<DateTime<Utc>>, now: DateTime<Utc>) -> TimeRemaining {
    match target {
        Some(target) => TimeRemaining::from_millis((target - now).num_milliseconds()),
        None => TimeRemaining::ZERO,
    }
}

/// [`time_remaining`] for a textual target; unparseable input yields zeros
pub fn time_remaining_str(target: Option<&str>, now: DateTime<Utc>) -> TimeRemaining {
    time_remaining(target.and_then(parse_target), now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 15, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_past_target_is_zero() {
        let past = now() - Duration::days(3);
        assert_eq!(time_remaining(Some(past), now()), TimeRemaining::ZERO);
        assert_eq!(time_remaining(Some(now()), now()), TimeRemaining::ZERO);
    }

    #[test]
    fn test_exact_breakdown() {
        for (d, h, m, s) in [(0, 0, 0, 1), (2, 3, 4, 5), (14, 23, 59, 59), (365, 0, 30, 0)] {
            let target = now()
                + Duration::days(d)
                + Duration::hours(h)
                + Duration::minutes(m)
                + Duration::seconds(s);
            let remaining = time_remaining(Some(target), now());
            assert_eq!(
                remaining,
                TimeRemaining {
                    days: d,
                    hours: h,
                    minutes: m,
                    seconds: s
                }
            );
        }
    }

    #[test]
    fn test_sub_second_remainder_truncates() {
        let target = now() + Duration::seconds(10) + Duration::milliseconds(999);
        assert_eq!(time_remaining(Some(target), now()).seconds, 10);
    }

    #[test]
    fn test_missing_or_unparseable_target() {
        assert_eq!(time_remaining(None, now()), TimeRemaining::ZERO);
        assert_eq!(time_remaining_str(None, now()), TimeRemaining::ZERO);
        assert_eq!(time_remaining_str(Some("next tuesday"), now()), TimeRemaining::ZERO);
        assert_eq!(time_remaining_str(Some(""), now()), TimeRemaining::ZERO);
    }

    #[test]
    fn test_parse_target_formats() {
        let expected = Utc.with_ymd_and_hms(2026, 11, 1, 8, 0, 0).unwrap();
        assert_eq!(parse_target("2026-11-01T08:00:00Z"), Some(expected));
        assert_eq!(parse_target("2026-11-01T15:00:00+07:00"), Some(expected));
        assert_eq!(parse_target("2026-11-01 08:00:00"), Some(expected));
        assert_eq!(parse_target("2026-11-01T08:00:00"), Some(expected));
        assert_eq!(
            parse_target("2026-11-01"),
            Some(Utc.with_ymd_and_hms(2026, 11, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_target("2026-13-01"), None);
    }

    #[test]
    fn test_display() {
        let remaining = TimeRemaining {
            days: 3,
            hours: 4,
            minutes: 5,
            seconds: 6,
        };
        assert_eq!(remaining.to_string(), "3d 04h 05m 06s");
        assert_eq!(remaining.total_seconds(), 3 * 86_400 + 4 * 3_600 + 5 * 60 + 6);
    }
}
