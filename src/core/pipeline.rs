use crate::config::scenario::ScenarioFile;
use crate::core::report::{self, AdmissionReport};
use crate::core::system::{EnrollmentSystem, RegistrationOutcome};
use crate::core::{engine, ConfigProvider, Pipeline, Storage};
use crate::domain::model::MINOR_AGE;
use crate::utils::error::{AdmissionError, Result};
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const BUNDLE_NAME: &str = "admission_report.zip";

/// Pipeline backed by a scenario definition: the scenario supplies the
/// catalog and the participant registrations, the storage receives the
/// exported report bundle.
pub struct ScenarioPipeline<S: Storage, C: ConfigProvider> {
    scenario: ScenarioFile,
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ScenarioPipeline<S, C> {
    pub fn new(scenario: ScenarioFile, storage: S, config: C) -> Self {
        Self {
            scenario,
            storage,
            config,
        }
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for ScenarioPipeline<S, C> {
    fn register(&self) -> Result<EnrollmentSystem> {
        self.scenario.validate_scenario()?;

        let mut system = EnrollmentSystem::new();
        for def in &self.scenario.activities {
            system.add_activity(def.clone());
        }
        for def in &self.scenario.participants {
            if let RegistrationOutcome::GuardianRequired =
                system.register_participant(def.clone())
            {
                // Diagnostic side channel; the refused participant is gone.
                tracing::warn!(
                    "{} is under {} with no guardian, not registered",
                    def.name,
                    MINOR_AGE
                );
            }
        }
        Ok(system)
    }

    fn enroll(&self, mut system: EnrollmentSystem) -> Result<EnrollmentSystem> {
        engine::process(&mut system);
        Ok(system)
    }

    fn report(&self, system: &EnrollmentSystem) -> Result<AdmissionReport> {
        let report = report::summarize(system);

        let formats = self.config.export_formats();
        if !formats.is_empty() {
            let bundle = build_bundle(&report, formats)?;
            tracing::debug!(
                "writing report bundle ({} bytes) to {}",
                bundle.len(),
                self.config.output_path()
            );
            self.storage.write_file(BUNDLE_NAME, &bundle)?;
        }

        Ok(report)
    }
}

fn build_bundle(report: &AdmissionReport, formats: &[String]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

    if formats.iter().any(|f| f == "csv") {
        zip.start_file::<_, ()>("report.csv", FileOptions::default())?;
        zip.write_all(&render_csv(report)?)?;
    }

    if formats.iter().any(|f| f == "json") {
        zip.start_file::<_, ()>("report.json", FileOptions::default())?;
        let json = serde_json::to_string_pretty(report)?;
        zip.write_all(json.as_bytes())?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

fn render_csv(report: &AdmissionReport) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["section", "name", "value"])?;
    for row in report.csv_rows() {
        writer.write_record(&row)?;
    }
    writer
        .into_inner()
        .map_err(|e| AdmissionError::ProcessingError {
            message: format!("CSV buffer flush failed: {}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::scenario::ScenarioFile;
    use std::cell::RefCell;
    use std::collections::HashMap;

    struct MemoryStorage {
        files: RefCell<HashMap<String, Vec<u8>>>,
    }

    impl MemoryStorage {
        fn new() -> Self {
            Self {
                files: RefCell::new(HashMap::new()),
            }
        }

        fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.borrow().get(path).cloned()
        }
    }

    impl Storage for &MemoryStorage {
        fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files.borrow().get(path).cloned().ok_or_else(|| {
                AdmissionError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files
                .borrow_mut()
                .insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct TestConfig {
        formats: Vec<String>,
    }

    impl ConfigProvider for TestConfig {
        fn scenario_path(&self) -> Option<&str> {
            None
        }

        fn output_path(&self) -> &str {
            "test_output"
        }

        fn export_formats(&self) -> &[String] {
            &self.formats
        }
    }

    const SCENARIO: &str = r#"
[scenario]
name = "test"
description = "pipeline test"

[[activities]]
name = "Intro Talk"
kind = "talk"
capacity = 1

[[participants]]
name = "V1"
age = 30
profile = "visitor"

[[participants]]
name = "V2"
age = 28
profile = "visitor"

[[participants]]
name = "Kid"
age = 14
profile = "student"
"#;

    fn scenario() -> ScenarioFile {
        ScenarioFile::from_toml_str(SCENARIO).unwrap()
    }

    #[test]
    fn register_skips_minors_without_guardian() {
        let storage = MemoryStorage::new();
        let config = TestConfig { formats: vec![] };
        let pipeline = ScenarioPipeline::new(scenario(), &storage, config);

        let system = pipeline.register().unwrap();
        assert_eq!(system.participants().len(), 2);
        assert!(system.participants().iter().all(|p| p.name != "Kid"));
    }

    #[test]
    fn full_run_produces_report_and_bundle() {
        let storage = MemoryStorage::new();
        let config = TestConfig {
            formats: vec!["csv".to_string(), "json".to_string()],
        };
        let pipeline = ScenarioPipeline::new(scenario(), &storage, config);

        let system = pipeline.enroll(pipeline.register().unwrap()).unwrap();
        let report = pipeline.report(&system).unwrap();

        assert_eq!(report.rejected_for_capacity, vec!["V2"]);

        let bundle = storage.get_file(BUNDLE_NAME).expect("bundle written");
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bundle)).unwrap();
        let mut names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["report.csv", "report.json"]);
    }

    #[test]
    fn no_formats_means_no_bundle() {
        let storage = MemoryStorage::new();
        let config = TestConfig { formats: vec![] };
        let pipeline = ScenarioPipeline::new(scenario(), &storage, config);

        let system = pipeline.enroll(pipeline.register().unwrap()).unwrap();
        pipeline.report(&system).unwrap();

        assert!(storage.get_file(BUNDLE_NAME).is_none());
    }

    #[test]
    fn csv_only_bundle_has_single_entry() {
        let storage = MemoryStorage::new();
        let config = TestConfig {
            formats: vec!["csv".to_string()],
        };
        let pipeline = ScenarioPipeline::new(scenario(), &storage, config);

        let system = pipeline.enroll(pipeline.register().unwrap()).unwrap();
        pipeline.report(&system).unwrap();

        let bundle = storage.get_file(BUNDLE_NAME).unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bundle)).unwrap();
        assert_eq!(archive.len(), 1);
        let mut file = archive.by_name("report.csv").unwrap();
        let mut content = String::new();
        std::io::Read::read_to_string(&mut file, &mut content).unwrap();
        assert!(content.starts_with("section,name,value"));
        assert!(content.contains("activity_demand,Intro Talk,1"));
    }
}
