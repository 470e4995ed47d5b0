pub mod boundary;
pub mod perceptron;

pub use boundary::*;
pub use perceptron::*;
