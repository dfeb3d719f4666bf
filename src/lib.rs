pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, scenario::ScenarioFile};
pub use core::{pipeline::ScenarioPipeline, runner::AdmissionRunner};
pub use utils::error::{AdmissionError, Result};
