use crate::core::rules::{EnrollmentOutcome, RejectionReason, MAX_ACTIVITIES};
use crate::core::system::EnrollmentSystem;
use crate::domain::model::{ActivityId, ActivityKind, ParticipantId, Profile, MINOR_AGE};

/// Runs the enrollment sweep: one deterministic pass over the registered
/// participants in registration order, with no retries and no re-ordering.
/// First-registered participants and catalog-first activities win ties for
/// scarce seats.
pub fn process(system: &mut EnrollmentSystem) {
    for pid in system.participant_ids() {
        if !system.participant(pid).wants_enrollment {
            continue;
        }

        let candidates = candidate_activities(system, pid);
        tracing::debug!(
            "{}: {} candidate activities",
            system.participant(pid).name,
            candidates.len()
        );

        if system.participant(pid).profile == Profile::Teacher {
            place_teacher(system, pid, &candidates);
            continue;
        }

        for aid in candidates {
            if system.participant(pid).enrolled_count() >= MAX_ACTIVITIES {
                break;
            }
            if let EnrollmentOutcome::Rejected(RejectionReason::ActivityFull) =
                system.enroll(pid, aid)
            {
                system.record_capacity_rejection(pid);
            }
        }
    }
}

/// Teachers receive priority single-slot attempt, no fallback: only the first
/// candidate in catalog order is tried, and any failure (including an empty
/// candidate set) lands the teacher on the capacity-rejection list.
fn place_teacher(system: &mut EnrollmentSystem, pid: ParticipantId, candidates: &[ActivityId]) {
    let placed = candidates
        .first()
        .map(|&aid| system.enroll(pid, aid).is_accepted())
        .unwrap_or(false);
    if !placed {
        tracing::debug!(
            "{}: priority attempt failed, recording rejection",
            system.participant(pid).name
        );
        system.record_capacity_rejection(pid);
    }
}

/// Activities a participant is structurally permitted to attempt, in catalog
/// order, before per-activity rule evaluation.
fn candidate_activities(system: &EnrollmentSystem, pid: ParticipantId) -> Vec<ActivityId> {
    let participant = system.participant(pid);
    system
        .activity_ids()
        .into_iter()
        .filter(|&aid| match participant.profile {
            Profile::Visitor => system.activity(aid).kind == ActivityKind::Talk,
            Profile::Student => participant.age >= MINOR_AGE,
            Profile::Teacher | Profile::Professional => true,
        })
        .collect()
}
