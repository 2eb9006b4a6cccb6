use crate::models::OnboardingStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollupTransition {
    Complete,
    Start,
}

pub fn completion_percent(statuses: &[OnboardingStatus]) -> u8 {
    if statuses.is_empty() {
        return 0;
    }
    let completed = statuses
        .iter()
        .filter(|status| **status == OnboardingStatus::Completed)
        .count();
    ((completed as f64 / statuses.len() as f64) * 100.0).round() as u8
}

// `Complete` fires on an empty set as well: a template with zero items marks
// its assignment completed on the first toggle attempt. Intentionally kept.
pub fn rollup_transition(
    current: OnboardingStatus,
    statuses: &[OnboardingStatus],
) -> Option<RollupTransition> {
    if statuses
        .iter()
        .all(|status| *status == OnboardingStatus::Completed)
    {
        return Some(RollupTransition::Complete);
    }
    if statuses
        .iter()
        .any(|status| *status == OnboardingStatus::InProgress)
        && current == OnboardingStatus::NotStarted
    {
        return Some(RollupTransition::Start);
    }
    None
}
