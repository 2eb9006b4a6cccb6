use crate::models::{Assignment, InsightsMetrics, OnboardingStatus, StatusCounts, WeekBucket};
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeMap;

const DAY_MS: f64 = 86_400_000.0;

pub fn aggregate(assignments: &[Assignment]) -> InsightsMetrics {
    InsightsMetrics {
        avg_completion_days: avg_completion_days(assignments),
        status_counts: status_counts(assignments),
        assignments_over_time: assignments_over_time(assignments),
    }
}

fn avg_completion_days(assignments: &[Assignment]) -> i64 {
    let durations: Vec<i64> = assignments
        .iter()
        .filter(|assignment| assignment.status == OnboardingStatus::Completed)
        .filter_map(|assignment| {
            let completed_at = assignment.completed_at?;
            let started = assignment.started_at.unwrap_or(assignment.created_at);
            let millis = completed_at.signed_duration_since(started).num_milliseconds();
            Some((millis as f64 / DAY_MS).ceil() as i64)
        })
        .collect();

    if durations.is_empty() {
        return 0;
    }
    let total: i64 = durations.iter().sum();
    (total as f64 / durations.len() as f64).round() as i64
}

fn status_counts(assignments: &[Assignment]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for assignment in assignments {
        match assignment.status {
            OnboardingStatus::NotStarted => counts.not_started += 1,
            OnboardingStatus::InProgress => counts.in_progress += 1,
            OnboardingStatus::Completed => counts.completed += 1,
        }
    }
    counts
}

// Sparse histogram keyed by the Sunday-aligned week start of created_at.
// Weeks with no assignments are omitted.
fn assignments_over_time(assignments: &[Assignment]) -> Vec<WeekBucket> {
    let mut weeks: BTreeMap<String, usize> = BTreeMap::new();
    for assignment in assignments {
        let start = week_start(assignment.created_at.date_naive());
        *weeks.entry(start.format("%Y-%m-%d").to_string()).or_insert(0) += 1;
    }
    weeks
        .into_iter()
        .map(|(date, count)| WeekBucket { date, count })
        .collect()
}

pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

#[cfg(test)]
mod tests {
    use super::{aggregate, week_start};
    use crate::models::{Assignment, OnboardingStatus};
    use chrono::{DateTime, NaiveDate, Utc};

    fn at(rfc3339: &str) -> DateTime<Utc> {
        rfc3339.parse().expect("valid timestamp")
    }

    fn assignment(status: OnboardingStatus, created: &str) -> Assignment {
        Assignment {
            id: "a".to_string(),
            workspace_id: "w1".to_string(),
            checklist_template_id: "t1".to_string(),
            project_id: "p1".to_string(),
            assigned_to_user_id: "u1".to_string(),
            assigned_by_user_id: "u2".to_string(),
            status,
            due_at: None,
            started_at: None,
            completed_at: None,
            created_at: at(created),
            updated_at: at(created),
        }
    }

    #[test]
    fn week_start_is_sunday_aligned() {
        // 2021-01-01 was a Friday.
        let friday = NaiveDate::from_ymd_opt(2021, 1, 1).expect("valid date");
        assert_eq!(
            week_start(friday),
            NaiveDate::from_ymd_opt(2020, 12, 27).expect("valid date")
        );
        // A Sunday maps to itself.
        let sunday = NaiveDate::from_ymd_opt(2020, 12, 27).expect("valid date");
        assert_eq!(week_start(sunday), sunday);
    }

    #[test]
    fn no_completed_assignments_yields_zero_average() {
        let metrics = aggregate(&[
            assignment(OnboardingStatus::NotStarted, "2021-01-04T10:00:00Z"),
            assignment(OnboardingStatus::InProgress, "2021-01-05T10:00:00Z"),
        ]);
        assert_eq!(metrics.avg_completion_days, 0);
        assert_eq!(metrics.status_counts.not_started, 1);
        assert_eq!(metrics.status_counts.in_progress, 1);
        assert_eq!(metrics.status_counts.completed, 0);
    }

    #[test]
    fn average_prefers_started_at_over_created_at() {
        let mut done = assignment(OnboardingStatus::Completed, "2021-01-01T00:00:00Z");
        done.started_at = Some(at("2021-01-03T00:00:00Z"));
        done.completed_at = Some(at("2021-01-07T12:00:00Z"));
        // ceil(4.5 days) = 5
        let metrics = aggregate(&[done]);
        assert_eq!(metrics.avg_completion_days, 5);
    }

    #[test]
    fn completed_without_timestamp_is_skipped() {
        let metrics = aggregate(&[assignment(OnboardingStatus::Completed, "2021-01-01T00:00:00Z")]);
        assert_eq!(metrics.avg_completion_days, 0);
        assert_eq!(metrics.status_counts.completed, 1);
    }

    #[test]
    fn histogram_is_sparse_and_sorted() {
        let metrics = aggregate(&[
            // Week of 2021-01-03.
            assignment(OnboardingStatus::NotStarted, "2021-01-04T10:00:00Z"),
            assignment(OnboardingStatus::NotStarted, "2021-01-08T10:00:00Z"),
            // Week of 2021-02-07, a month later. Intervening weeks are omitted.
            assignment(OnboardingStatus::NotStarted, "2021-02-09T10:00:00Z"),
        ]);
        let buckets = metrics.assignments_over_time;
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].date, "2021-01-03");
        assert_eq!(buckets[0].count, 2);
        assert_eq!(buckets[1].date, "2021-02-07");
        assert_eq!(buckets[1].count, 1);
    }
}
