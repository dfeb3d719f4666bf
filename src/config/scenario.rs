use crate::domain::model::{ActivityDef, ParticipantDef};
use crate::utils::error::{AdmissionError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

const MAX_AGE: u32 = 120;

/// TOML scenario: the activity catalog and the participants to register,
/// in declaration order. Declaration order is load-bearing; it decides who
/// wins ties for scarce seats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioFile {
    pub scenario: ScenarioMeta,
    #[serde(default)]
    pub activities: Vec<ActivityDef>,
    #[serde(default)]
    pub participants: Vec<ParticipantDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioMeta {
    pub name: String,
    pub description: String,
}

impl ScenarioFile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AdmissionError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AdmissionError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` markers with the environment value; unknown
    /// variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_scenario(&self) -> Result<()> {
        validation::validate_non_empty_string("scenario.name", &self.scenario.name)?;

        validation::validate_unique_names(
            "activities",
            self.activities.iter().map(|a| a.name.as_str()),
        )?;

        for activity in &self.activities {
            validation::validate_non_empty_string("activities.name", &activity.name)?;
            validation::validate_positive_number("activities.capacity", activity.capacity, 1)?;
            validation::validate_range("activities.minimum_age", activity.minimum_age, 0, MAX_AGE)?;
        }

        for participant in &self.participants {
            validation::validate_non_empty_string("participants.name", &participant.name)?;
            validation::validate_range("participants.age", participant.age, 0, MAX_AGE)?;
        }

        Ok(())
    }
}

impl Validate for ScenarioFile {
    fn validate(&self) -> Result<()> {
        self.validate_scenario()
    }
}
