use perceptron_lab_core::{LabError, LabResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decision line `x2 = slope * x1 + intercept` of a two-feature linear model.
///
/// Equivalent to `w[0] * x1 + w[1] * x2 + bias = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionBoundary {
    pub slope: f64,
    pub intercept: f64,
}

impl DecisionBoundary {
    /// Derive the line from weights and bias.
    ///
    /// Returns `Ok(None)` when `w[1] == 0`: the boundary is vertical (or the
    /// model is degenerate) and has no slope/intercept form.
    pub fn from_weights(weights: &[f64], bias: f64) -> LabResult<Option<Self>> {
        let [w0, w1] = weights else {
            return Err(LabError::DimensionMismatch {
                expected: 2,
                got: weights.len(),
            });
        };
        if *w1 == 0.0 {
            return Ok(None);
        }
        Ok(Some(DecisionBoundary {
            slope: -w0 / w1,
            intercept: -bias / w1,
        }))
    }

    /// The `x2` on the line for a given `x1`.
    pub fn x2_at(&self, x1: f64) -> f64 {
        self.slope * x1 + self.intercept
    }

    /// End points of the line across `[x1_min, x1_max]`, for plotting.
    pub fn segment(&self, x1_min: f64, x1_max: f64) -> [[f64; 2]; 2] {
        [
            [x1_min, self.x2_at(x1_min)],
            [x1_max, self.x2_at(x1_max)],
        ]
    }
}

impl fmt::Display for DecisionBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x2 = {:.3} * x1 + {:.3}", self.slope, self.intercept)
    }
}
