use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdmissionError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Zip archive error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

impl AdmissionError {
    /// Process exit code for the CLI driver: configuration problems are 2,
    /// storage problems 3, everything else 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            AdmissionError::ConfigValidationError { .. }
            | AdmissionError::InvalidConfigValueError { .. }
            | AdmissionError::MissingConfigError { .. } => 2,
            AdmissionError::IoError(_) => 3,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, AdmissionError>;
