use admission_control::utils::{logger, validation::Validate};
use admission_control::{
    AdmissionRunner, CliConfig, LocalStorage, ScenarioFile, ScenarioPipeline,
};
use clap::Parser;

// Demo data lives here in the driver; the engine never ships bootstrap state.
const DEMO_SCENARIO: &str = r#"
[scenario]
name = "open-day"
description = "Community open day with workshops and talks"

[[activities]]
name = "Welcome Talk"
kind = "talk"
capacity = 30

[[activities]]
name = "Soldering Workshop"
kind = "workshop"
capacity = 8
minimum_age = 18

[[activities]]
name = "Robotics Workshop"
kind = "workshop"
capacity = 12
minimum_age = 12

[[activities]]
name = "Career Talk"
kind = "talk"
capacity = 2

[[participants]]
name = "Alice"
age = 34
profile = "teacher"

[[participants]]
name = "Bruno"
age = 17
profile = "student"

[[participants]]
name = "Carla"
age = 15
profile = "student"
guardian = "Diego"

[[participants]]
name = "Elena"
age = 41
profile = "professional"

[[participants]]
name = "Farid"
age = 28
profile = "visitor"

[[participants]]
name = "Gina"
age = 22
profile = "visitor"

[[participants]]
name = "Hugo"
age = 14
profile = "student"

[[participants]]
name = "Iris"
age = 30
profile = "professional"
wants_enrollment = false
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting admission-control CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("error: {}", e);
        std::process::exit(2);
    }

    let scenario = match &config.scenario {
        Some(path) => ScenarioFile::from_file(path),
        None => {
            tracing::info!("No scenario file given, using the built-in demo scenario");
            ScenarioFile::from_toml_str(DEMO_SCENARIO)
        }
    };
    let scenario = match scenario {
        Ok(scenario) => scenario,
        Err(e) => {
            tracing::error!("Failed to load scenario: {}", e);
            eprintln!("error: {}", e);
            std::process::exit(e.exit_code());
        }
    };
    tracing::info!(
        "Loaded scenario '{}': {} activities, {} participants",
        scenario.scenario.name,
        scenario.activities.len(),
        scenario.participants.len()
    );

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("Resource monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = ScenarioPipeline::new(scenario, storage, config);
    let runner = AdmissionRunner::new_with_monitoring(pipeline, monitor_enabled);

    match runner.run() {
        Ok(report) => {
            println!("{}", report);
        }
        Err(e) => {
            tracing::error!("Admission run failed: {}", e);
            eprintln!("error: {}", e);
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
