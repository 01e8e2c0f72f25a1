//! Campaign phase derivation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Derived lifecycle phase of a campaign
///
/// Exactly one phase holds at any instant. It is a pure function of
/// `goal`, `amount_raised`, `deadline` and the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Deadline not yet passed, regardless of funding
    Ongoing,
    /// Deadline passed with the goal reached
    SuccessfulEnd,
    /// Deadline passed with the goal missed
    FailedEnd,
}

impl Phase {
    /// Derive the phase at `now`
    ///
    /// The goal comparison is unclamped: over-funded campaigns still end
    /// successfully.
    #[must_use]
    pub fn derive(
        goal: f64,
        amount_raised: f64,
        deadline: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        let goal_reached = amount_raised >= goal;
        let expired = now > deadline;

        match (expired, goal_reached) {
            (false, _) => Phase::Ongoing,
            (true, true) => Phase::SuccessfulEnd,
            (true, false) => Phase::FailedEnd,
        }
    }

    /// Check if the deadline has passed
    #[inline]
    #[must_use]
    pub fn has_ended(&self) -> bool {
        !matches!(self, Phase::Ongoing)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Ongoing => "ongoing",
            Phase::SuccessfulEnd => "successful",
            Phase::FailedEnd => "failed",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn deadline_instant_is_still_ongoing() {
        assert_eq!(Phase::derive(10.0, 0.0, now(), now()), Phase::Ongoing);
    }

    #[test]
    fn over_funded_still_ongoing_before_deadline() {
        let deadline = now() + Duration::days(1);
        assert_eq!(Phase::derive(10.0, 500.0, deadline, now()), Phase::Ongoing);
    }

    #[test]
    fn ended_phases() {
        let deadline = now() - Duration::seconds(1);
        assert_eq!(Phase::derive(10.0, 10.0, deadline, now()), Phase::SuccessfulEnd);
        assert_eq!(Phase::derive(10.0, 9.99, deadline, now()), Phase::FailedEnd);
        assert!(Phase::FailedEnd.has_ended());
        assert!(!Phase::Ongoing.has_ended());
    }
}
