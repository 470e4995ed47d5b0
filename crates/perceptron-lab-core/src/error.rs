use thiserror::Error;

/// Error type shared by every perceptron-lab crate.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LabError {
    #[error("Length mismatch: {features} feature rows but {labels} labels")]
    LengthMismatch { features: usize, labels: usize },

    #[error("Prediction length mismatch: {y_true} true labels but {y_pred} predictions")]
    PredictionLengthMismatch { y_true: usize, y_pred: usize },

    #[error("Dimension mismatch: expected {expected} features, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Shape overflow: {rows}x{cols} matrix is too large to address")]
    ShapeOverflow { rows: usize, cols: usize },

    #[error("Shape mismatch: {rows}x{cols} matrix needs {expected} values, got {got}")]
    ShapeMismatch {
        rows: usize,
        cols: usize,
        expected: usize,
        got: usize,
    },

    #[error("Model not fitted: call fit() before using the model")]
    NotFitted,

    #[error("Empty input: {0}")]
    EmptyInput(&'static str),

    #[error("Invalid label {0}: labels must be 0 or 1")]
    InvalidLabel(i64),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Unknown dataset: {0}")]
    UnknownDataset(String),
}

pub type LabResult<T> = Result<T, LabError>;
