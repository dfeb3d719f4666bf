use crate::core::rules::{self, EnrollmentOutcome};
use crate::domain::model::{
    Activity, ActivityDef, ActivityId, Participant, ParticipantDef, ParticipantId, Profile,
    MINOR_AGE,
};

/// Result of a registration attempt. A refused registration is not an error;
/// the outcome is the side channel the caller inspects for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Registered(ParticipantId),
    GuardianRequired,
}

impl RegistrationOutcome {
    pub fn id(&self) -> Option<ParticipantId> {
        match self {
            RegistrationOutcome::Registered(id) => Some(*id),
            RegistrationOutcome::GuardianRequired => None,
        }
    }
}

/// Aggregate root owning every participant and activity for the run.
/// The roster/enrollment cross-links are index ids into the two arenas,
/// so both sides of the bidirectional link live in one place.
#[derive(Debug, Default)]
pub struct EnrollmentSystem {
    participants: Vec<Participant>,
    activities: Vec<Activity>,
    rejected_for_capacity: Vec<ParticipantId>,
}

impl EnrollmentSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_activity(&mut self, def: ActivityDef) -> ActivityId {
        let id = ActivityId(self.activities.len());
        self.activities.push(Activity::from_def(def));
        id
    }

    /// Registers a participant, refusing minors without a guardian. Refused
    /// definitions leave no trace in the system.
    pub fn register_participant(&mut self, def: ParticipantDef) -> RegistrationOutcome {
        if def.age < MINOR_AGE && !def.has_guardian() {
            return RegistrationOutcome::GuardianRequired;
        }
        let id = ParticipantId(self.participants.len());
        self.participants.push(Participant::from_def(def));
        RegistrationOutcome::Registered(id)
    }

    /// Attempts to enroll one participant into one activity. On acceptance
    /// the roster and the participant's enrollment list are updated together;
    /// a rejection leaves both untouched.
    pub fn enroll(&mut self, participant: ParticipantId, activity: ActivityId) -> EnrollmentOutcome {
        // Ids are issued by this arena, so indexing is in bounds.
        let p = &self.participants[participant.0];
        let a = &self.activities[activity.0];
        if let Some(reason) = rules::check(p, a) {
            return EnrollmentOutcome::Rejected(reason);
        }
        self.activities[activity.0].push_roster(participant);
        self.participants[participant.0].push_enrollment(activity);
        EnrollmentOutcome::Accepted
    }

    pub(crate) fn record_capacity_rejection(&mut self, participant: ParticipantId) {
        self.rejected_for_capacity.push(participant);
    }

    pub fn participant(&self, id: ParticipantId) -> &Participant {
        &self.participants[id.0]
    }

    pub fn activity(&self, id: ActivityId) -> &Activity {
        &self.activities[id.0]
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Registration-order participant ids, detached from the arena borrow so
    /// callers can mutate while iterating.
    pub fn participant_ids(&self) -> Vec<ParticipantId> {
        (0..self.participants.len()).map(ParticipantId).collect()
    }

    /// Catalog-order activity ids.
    pub fn activity_ids(&self) -> Vec<ActivityId> {
        (0..self.activities.len()).map(ActivityId).collect()
    }

    /// Participants that could not be placed for lack of seats, in recording
    /// order. May contain the same participant more than once.
    pub fn rejected_for_capacity(&self) -> &[ParticipantId] {
        &self.rejected_for_capacity
    }

    pub fn rejected_names(&self) -> Vec<String> {
        self.rejected_for_capacity
            .iter()
            .map(|id| self.participants[id.0].name.clone())
            .collect()
    }

    /// Names on the roster of the activity with the given name; empty when no
    /// such activity exists.
    pub fn roster_names(&self, activity_name: &str) -> Vec<String> {
        self.activities
            .iter()
            .find(|a| a.name == activity_name)
            .map(|a| {
                a.roster()
                    .iter()
                    .map(|id| self.participants[id.0].name.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn participants_with_profile(&self, profile: Profile) -> Vec<&Participant> {
        self.participants
            .iter()
            .filter(|p| p.profile == profile)
            .collect()
    }
}
