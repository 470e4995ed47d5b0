use perceptron_lab_core::{LabResult, Label, Matrix};
use perceptron_lab_linear::Perceptron;
use perceptron_lab_preprocessing::StandardScaler;

/// Trait for unsupervised transformers (scalers, encoders, etc.).
pub trait Transformer {
    fn fit(&mut self, x: &Matrix) -> LabResult<()>;
    fn transform(&self, x: &Matrix) -> LabResult<Matrix>;
    fn fit_transform(&mut self, x: &Matrix) -> LabResult<Matrix> {
        self.fit(x)?;
        self.transform(x)
    }
}

/// Trait for supervised estimators.
pub trait Estimator {
    fn fit(&mut self, x: &Matrix, y: &[Label]) -> LabResult<()>;
    fn predict(&self, x: &Matrix) -> LabResult<Vec<Label>>;
}

impl Transformer for StandardScaler {
    fn fit(&mut self, x: &Matrix) -> LabResult<()> {
        StandardScaler::fit(self, x).map(|_| ())
    }

    fn transform(&self, x: &Matrix) -> LabResult<Matrix> {
        StandardScaler::transform(self, x)
    }
}

impl Estimator for Perceptron {
    fn fit(&mut self, x: &Matrix, y: &[Label]) -> LabResult<()> {
        Perceptron::fit(self, x, y)
    }

    fn predict(&self, x: &Matrix) -> LabResult<Vec<Label>> {
        Perceptron::predict(self, x)
    }
}

/// A transformer followed by an estimator.
///
/// The transformer is fitted on training data only; `predict` reuses those
/// fitted parameters for every later input.
#[derive(Debug, Clone)]
pub struct Pipeline<T, E> {
    transformer: T,
    estimator: E,
}

impl<T: Transformer, E: Estimator> Pipeline<T, E> {
    pub fn new(transformer: T, estimator: E) -> Self {
        Pipeline {
            transformer,
            estimator,
        }
    }

    /// Fit the transformer, then the estimator on the transformed data.
    pub fn fit(&mut self, x: &Matrix, y: &[Label]) -> LabResult<()> {
        let x_t = self.transformer.fit_transform(x)?;
        self.estimator.fit(&x_t, y)
    }

    /// Transform with the fitted transformer and predict.
    pub fn predict(&self, x: &Matrix) -> LabResult<Vec<Label>> {
        let x_t = self.transformer.transform(x)?;
        self.estimator.predict(&x_t)
    }

    pub fn transformer(&self) -> &T {
        &self.transformer
    }

    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    pub fn into_parts(self) -> (T, E) {
        (self.transformer, self.estimator)
    }
}
