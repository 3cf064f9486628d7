//! Priority classification: due date vs. submission date -> tier.

use serde::{Deserialize, Serialize};

use super::Timestamp;

/// Priority tier of a homework record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    High,
    Medium,
    Low,
}

/// Day thresholds used to pick a tier.
///
/// Levels are walked in order; the first one whose threshold is absent or
/// `>= day_diff` wins:
/// - `(high_within_days, High)`
/// - `(medium_within_days, Medium)`
/// - `(None, Low)`
///
/// Submissions after the due date never reach the walk and are always `Low`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityPolicy {
    pub high_within_days: i64,
    pub medium_within_days: i64,
}

impl PriorityPolicy {
    /// One day out is High, three days out is Medium, anything further is Low.
    pub fn standard() -> Self {
        Self {
            high_within_days: 1,
            medium_within_days: 3,
        }
    }

    pub fn levels(&self) -> [(Option<i64>, Tier); 3] {
        [
            (Some(self.high_within_days), Tier::High),
            (Some(self.medium_within_days), Tier::Medium),
            (None, Tier::Low),
        ]
    }

    /// Pure: same dates always give the same tier.
    pub fn classify(&self, due: &Timestamp, sub: &Timestamp) -> Tier {
        if due < sub {
            return Tier::Low;
        }
        let day_diff = due.days_since(sub);
        self.levels()
            .into_iter()
            .find(|(threshold, _)| threshold.is_none_or(|days| day_diff <= days))
            .map(|(_, tier)| tier)
            .unwrap_or(Tier::Low)
    }
}

impl Default for PriorityPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

/// Classify with [`PriorityPolicy::standard`].
pub fn classify(due: &Timestamp, sub: &Timestamp) -> Tier {
    PriorityPolicy::standard().classify(due, sub)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const DUE: &str = "2021-09-09T11:59:00-0400";

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    #[rstest]
    #[case::one_day_out("2021-09-08T11:59:00-0400", Tier::High)]
    #[case::three_days_out("2021-09-06T11:59:00-0400", Tier::Medium)]
    #[case::eight_days_out("2021-09-01T11:59:00-0400", Tier::Low)]
    #[case::exactly_on_time(DUE, Tier::High)]
    #[case::same_day_morning("2021-09-09T08:00:00-0400", Tier::High)]
    #[case::just_under_two_days("2021-09-07T12:00:00-0400", Tier::High)]
    #[case::two_days_out("2021-09-07T11:59:00-0400", Tier::Medium)]
    #[case::just_under_four_days("2021-09-05T12:00:00-0400", Tier::Medium)]
    #[case::four_days_out("2021-09-05T11:59:00-0400", Tier::Low)]
    fn classifies_by_day_gap(#[case] sub: &str, #[case] expected: Tier) {
        assert_eq!(classify(&ts(DUE), &ts(sub)), expected);
    }

    #[rstest]
    #[case::one_minute_late("2021-09-09T12:00:00-0400")]
    #[case::one_day_late("2021-09-10T11:59:00-0400")]
    #[case::a_month_late("2021-10-09T11:59:00-0400")]
    fn overdue_is_always_low(#[case] sub: &str) {
        assert_eq!(classify(&ts(DUE), &ts(sub)), Tier::Low);
    }

    #[test]
    fn offsets_do_not_change_the_gap() {
        // 1 day out expressed in UTC
        assert_eq!(
            classify(&ts(DUE), &ts("2021-09-08T15:59:00Z")),
            Tier::High
        );
    }

    #[test]
    fn custom_thresholds_are_respected() {
        let policy = PriorityPolicy {
            high_within_days: 0,
            medium_within_days: 7,
        };
        assert_eq!(
            policy.classify(&ts(DUE), &ts("2021-09-08T11:59:00-0400")),
            Tier::Medium
        );
        assert_eq!(
            policy.classify(&ts(DUE), &ts("2021-09-01T11:59:00-0400")),
            Tier::Low
        );
    }

    #[test]
    fn tier_serializes_as_name() {
        assert_eq!(serde_json::to_string(&Tier::Medium).unwrap(), "\"Medium\"");
    }
}
