pub mod cli;
pub mod scenario;

#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::{AdmissionError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "admission-control")]
#[command(about = "Admission and enrollment for capacity-limited activities")]
pub struct CliConfig {
    #[arg(long, help = "Path to a TOML scenario file; omit for the demo scenario")]
    pub scenario: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_value = "csv,json")]
    pub formats: Vec<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log per-phase resource usage")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn scenario_path(&self) -> Option<&str> {
        self.scenario.as_deref()
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn export_formats(&self) -> &[String] {
        &self.formats
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("output_path", &self.output_path)?;
        if let Some(scenario) = &self.scenario {
            validation::validate_path("scenario", scenario)?;
        }

        let valid_formats = ["csv", "json"];
        for format in &self.formats {
            if !valid_formats.contains(&format.as_str()) {
                return Err(AdmissionError::InvalidConfigValueError {
                    field: "formats".to_string(),
                    value: format.clone(),
                    reason: format!(
                        "Unsupported format. Valid formats: {}",
                        valid_formats.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }
}
