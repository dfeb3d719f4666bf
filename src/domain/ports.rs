use crate::core::report::AdmissionReport;
use crate::core::system::EnrollmentSystem;
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn scenario_path(&self) -> Option<&str>;
    fn output_path(&self) -> &str;
    fn export_formats(&self) -> &[String];
}

/// The three stages of an admission run. `register` builds the system from
/// driver input, `enroll` runs the deterministic enrollment sweep, `report`
/// aggregates the final state.
pub trait Pipeline {
    fn register(&self) -> Result<EnrollmentSystem>;
    fn enroll(&self, system: EnrollmentSystem) -> Result<EnrollmentSystem>;
    fn report(&self, system: &EnrollmentSystem) -> Result<AdmissionReport>;
}
