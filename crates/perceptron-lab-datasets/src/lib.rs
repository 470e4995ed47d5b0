pub mod builtin;
pub mod dataset;

pub use builtin::*;
pub use dataset::*;
