use perceptron_lab_core::LabError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value '{value}' on line {line}")]
    Parse { line: usize, value: String },

    #[error(transparent)]
    Lab(#[from] LabError),
}

pub type IoResult<T> = Result<T, IoError>;
