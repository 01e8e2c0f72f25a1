//! Countdown towards a campaign deadline

use chrono::{DateTime, Utc};
use std::fmt;

/// Remaining time before a deadline, broken into display units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeLeft {
    /// Whole days
    pub days: i64,
    /// Hours within the day (0-23)
    pub hours: i64,
    /// Minutes within the hour (0-59)
    pub minutes: i64,
    /// Seconds within the minute (0-59)
    pub seconds: i64,
}

impl TimeLeft {
    /// Time left until `deadline`, or `None` once it has been reached
    #[must_use]
    pub fn until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> Option<Self> {
        let remaining = (deadline - now).num_seconds();
        if remaining <= 0 {
            return None;
        }
        Some(Self {
            days: remaining / 86_400,
            hours: (remaining / 3_600) % 24,
            minutes: (remaining / 60) % 60,
            seconds: remaining % 60,
        })
    }

    /// Render a countdown, `00:00:00` once elapsed
    #[must_use]
    pub fn render(deadline: DateTime<Utc>, now: DateTime<Utc>) -> String {
        Self::until(deadline, now).map_or_else(|| "00:00:00".to_string(), |left| left.to_string())
    }
}

impl fmt::Display for TimeLeft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.days > 0 {
            write!(f, "{}d {:02}h", self.days, self.hours)
        } else {
            write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 10, 8, 0, 0).unwrap()
    }

    #[test]
    fn splits_into_units() {
        let deadline = now() + Duration::days(2) + Duration::hours(5) + Duration::seconds(61);
        let left = TimeLeft::until(deadline, now()).unwrap();
        assert_eq!(
            left,
            TimeLeft {
                days: 2,
                hours: 5,
                minutes: 1,
                seconds: 1
            }
        );
    }

    #[test]
    fn multi_day_renders_days_and_hours() {
        let deadline = now() + Duration::days(30) + Duration::hours(3);
        assert_eq!(TimeLeft::render(deadline, now()), "30d 03h");
    }

    #[test]
    fn same_day_renders_clock() {
        let deadline = now() + Duration::hours(7) + Duration::minutes(4) + Duration::seconds(9);
        assert_eq!(TimeLeft::render(deadline, now()), "07:04:09");
    }

    #[test]
    fn elapsed_renders_zero() {
        assert!(TimeLeft::until(now(), now()).is_none());
        assert_eq!(TimeLeft::render(now() - Duration::days(1), now()), "00:00:00");
    }
}
