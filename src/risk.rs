use crate::models::{Assignment, AtRisk, OnboardingStatus};
use chrono::{DateTime, Utc};

const DAY_MS: f64 = 86_400_000.0;

pub fn at_risk_status(assignment: &Assignment, now: DateTime<Utc>) -> Option<AtRisk> {
    if assignment.status == OnboardingStatus::Completed {
        return None;
    }
    let due_at = assignment.due_at?;

    let diff_days = (due_at.signed_duration_since(now).num_milliseconds() as f64 / DAY_MS).ceil() as i64;
    if diff_days < 0 {
        Some(AtRisk::Overdue)
    } else if diff_days <= 3 {
        Some(AtRisk::DueSoon)
    } else {
        Some(AtRisk::OnTime)
    }
}
