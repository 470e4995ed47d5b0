pub mod experiment;
pub mod pipeline;

pub use experiment::*;
pub use pipeline::*;
