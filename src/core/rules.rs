use crate::domain::model::{Activity, ActivityKind, Participant, Profile};
use std::fmt;

/// Hard cap on enrollments per participant.
pub const MAX_ACTIVITIES: usize = 3;

/// Why an enrollment attempt was turned down. The evaluation order in
/// [`check`] is fixed, so for any participant/activity pair the reported
/// reason is reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    MaxActivitiesReached,
    BelowMinimumAge,
    ActivityFull,
    VisitorRestrictedToTalks,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            RejectionReason::MaxActivitiesReached => {
                "already enrolled in the maximum number of activities"
            }
            RejectionReason::BelowMinimumAge => "below the minimum age for this activity",
            RejectionReason::ActivityFull => "activity is full",
            RejectionReason::VisitorRestrictedToTalks => "visitors may only attend talks",
        };
        write!(f, "{}", message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollmentOutcome {
    Accepted,
    Rejected(RejectionReason),
}

impl EnrollmentOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, EnrollmentOutcome::Accepted)
    }
}

/// Evaluates the eligibility rules for one participant/activity pair and
/// returns the first failing reason, or None when the pair is admissible.
pub fn check(participant: &Participant, activity: &Activity) -> Option<RejectionReason> {
    if participant.enrolled_count() >= MAX_ACTIVITIES {
        return Some(RejectionReason::MaxActivitiesReached);
    }
    if participant.age < activity.minimum_age {
        return Some(RejectionReason::BelowMinimumAge);
    }
    if activity.is_full() {
        return Some(RejectionReason::ActivityFull);
    }
    if participant.profile == Profile::Visitor && activity.kind != ActivityKind::Talk {
        return Some(RejectionReason::VisitorRestrictedToTalks);
    }
    None
}
