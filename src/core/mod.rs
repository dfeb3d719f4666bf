pub mod engine;
pub mod pipeline;
pub mod report;
pub mod rules;
pub mod runner;
pub mod system;

pub use crate::domain::model::{
    Activity, ActivityDef, ActivityKind, Participant, ParticipantDef, Profile,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
