use perceptron_lab_core::{LabError, LabResult, Matrix};
use serde::{Deserialize, Serialize};

/// Per-feature mean and population standard deviation.
///
/// Computed once from a training partition and then reused unchanged for
/// every other matrix (test partition, grid points, single queries).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormParams {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

impl NormParams {
    /// Compute parameters from data. A zero standard deviation is stored as 1.
    pub fn from_data(x: &Matrix) -> LabResult<Self> {
        if x.is_empty() {
            return Err(LabError::EmptyInput("cannot fit a scaler on zero samples"));
        }
        let mean = x.mean_axis0()?;
        let std = x
            .std_axis0()?
            .into_iter()
            .map(|s| if s == 0.0 { 1.0 } else { s })
            .collect();
        Ok(NormParams { mean, std })
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    fn check_width(&self, cols: usize) -> LabResult<()> {
        if cols != self.n_features() {
            return Err(LabError::DimensionMismatch {
                expected: self.n_features(),
                got: cols,
            });
        }
        Ok(())
    }

    /// `(x - mean) / std` per feature.
    pub fn apply(&self, x: &Matrix) -> LabResult<Matrix> {
        self.check_width(x.cols())?;
        Ok(x.map_cols(|j, v| (v - self.mean[j]) / self.std[j]))
    }

    /// Normalize a single point.
    pub fn apply_point(&self, point: &[f64]) -> LabResult<Vec<f64>> {
        self.check_width(point.len())?;
        Ok(point
            .iter()
            .enumerate()
            .map(|(j, v)| (v - self.mean[j]) / self.std[j])
            .collect())
    }

    /// Map normalized values back to the original feature space.
    pub fn inverse(&self, x: &Matrix) -> LabResult<Matrix> {
        self.check_width(x.cols())?;
        Ok(x.map_cols(|j, v| v * self.std[j] + self.mean[j]))
    }
}

/// Standardize features by removing the mean and scaling to unit variance.
#[derive(Debug, Clone, Default)]
pub struct StandardScaler {
    params: Option<NormParams>,
}

impl StandardScaler {
    pub fn new() -> Self {
        StandardScaler { params: None }
    }

    /// Compute mean and std from training data.
    pub fn fit(&mut self, x: &Matrix) -> LabResult<&NormParams> {
        let params = NormParams::from_data(x)?;
        log::debug!("scaler fitted: mean={:?} std={:?}", params.mean, params.std);
        Ok(&*self.params.insert(params))
    }

    /// Transform data using the fitted parameters.
    pub fn transform(&self, x: &Matrix) -> LabResult<Matrix> {
        self.params.as_ref().ok_or(LabError::NotFitted)?.apply(x)
    }

    /// Fit and transform in one step.
    pub fn fit_transform(&mut self, x: &Matrix) -> LabResult<Matrix> {
        self.fit(x)?;
        self.transform(x)
    }

    pub fn params(&self) -> Option<&NormParams> {
        self.params.as_ref()
    }
}

/// Fit on `x_train` and return the normalized matrix with its parameters.
pub fn fit_normalize(x_train: &Matrix) -> LabResult<(Matrix, NormParams)> {
    let params = NormParams::from_data(x_train)?;
    let normalized = params.apply(x_train)?;
    Ok((normalized, params))
}

/// Normalize `x` with parameters computed elsewhere.
pub fn apply_normalize(x: &Matrix, params: &NormParams) -> LabResult<Matrix> {
    params.apply(x)
}
