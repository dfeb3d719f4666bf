use serde::{Deserialize, Serialize};
use std::fmt;

/// Participants younger than this need a guardian to register and are
/// excluded from enrollment as students.
pub const MINOR_AGE: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Student,
    Teacher,
    Professional,
    Visitor,
}

impl Profile {
    pub const ALL: [Profile; 4] = [
        Profile::Student,
        Profile::Teacher,
        Profile::Professional,
        Profile::Visitor,
    ];
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Profile::Student => "student",
            Profile::Teacher => "teacher",
            Profile::Professional => "professional",
            Profile::Visitor => "visitor",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Workshop,
    Talk,
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ActivityKind::Workshop => "workshop",
            ActivityKind::Talk => "talk",
        };
        write!(f, "{}", label)
    }
}

/// Index into the participant arena of an `EnrollmentSystem`. Ids are only
/// issued by the arena that owns the participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticipantId(pub(crate) usize);

/// Index into the activity arena of an `EnrollmentSystem`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivityId(pub(crate) usize);

/// Input record for one activity, as declared by the driver (scenario file
/// or direct construction).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityDef {
    pub name: String,
    pub kind: ActivityKind,
    pub capacity: usize,
    #[serde(default)]
    pub minimum_age: u32,
}

/// Input record for one participant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantDef {
    pub name: String,
    pub age: u32,
    pub profile: Profile,
    #[serde(default = "default_wants_enrollment")]
    pub wants_enrollment: bool,
    #[serde(default)]
    pub guardian: Option<String>,
}

fn default_wants_enrollment() -> bool {
    true
}

impl ParticipantDef {
    /// A blank guardian counts as no guardian at all.
    pub fn has_guardian(&self) -> bool {
        self.guardian
            .as_deref()
            .map_or(false, |g| !g.trim().is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct Participant {
    pub name: String,
    pub age: u32,
    pub profile: Profile,
    pub wants_enrollment: bool,
    pub guardian: Option<String>,
    enrolled: Vec<ActivityId>,
}

impl Participant {
    pub(crate) fn from_def(def: ParticipantDef) -> Self {
        // Guardians are only meaningful for minors; drop them otherwise.
        let guardian = if def.age < MINOR_AGE { def.guardian } else { None };
        Self {
            name: def.name,
            age: def.age,
            profile: def.profile,
            wants_enrollment: def.wants_enrollment,
            guardian,
            enrolled: Vec::new(),
        }
    }

    /// Activities this participant is enrolled in, in enrollment order.
    pub fn enrolled(&self) -> &[ActivityId] {
        &self.enrolled
    }

    pub fn enrolled_count(&self) -> usize {
        self.enrolled.len()
    }

    pub(crate) fn push_enrollment(&mut self, activity: ActivityId) {
        self.enrolled.push(activity);
    }
}

#[derive(Debug, Clone)]
pub struct Activity {
    pub name: String,
    pub kind: ActivityKind,
    pub capacity: usize,
    pub minimum_age: u32,
    roster: Vec<ParticipantId>,
}

impl Activity {
    pub(crate) fn from_def(def: ActivityDef) -> Self {
        Self {
            name: def.name,
            kind: def.kind,
            capacity: def.capacity,
            minimum_age: def.minimum_age,
            roster: Vec::new(),
        }
    }

    /// Enrolled participants in enrollment order.
    pub fn roster(&self) -> &[ParticipantId] {
        &self.roster
    }

    pub fn is_full(&self) -> bool {
        self.roster.len() >= self.capacity
    }

    pub(crate) fn push_roster(&mut self, participant: ParticipantId) {
        self.roster.push(participant);
    }
}
