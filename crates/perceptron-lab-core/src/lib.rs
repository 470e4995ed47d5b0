pub mod matrix;
pub mod label;
pub mod error;

pub use matrix::Matrix;
pub use label::Label;
pub use error::{LabError, LabResult};
