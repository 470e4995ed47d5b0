use crate::boundary::DecisionBoundary;
use perceptron_lab_core::{LabError, LabResult, Label, Matrix};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Hyper-parameters of a [`Perceptron`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerceptronConfig {
    pub learning_rate: f64,
    /// Upper bound on training epochs; training may stop earlier on convergence.
    pub n_epochs: usize,
}

impl Default for PerceptronConfig {
    fn default() -> Self {
        PerceptronConfig {
            learning_rate: 0.01,
            n_epochs: 100,
        }
    }
}

impl PerceptronConfig {
    pub fn validate(&self) -> LabResult<()> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(LabError::InvalidParameter(format!(
                "learning rate must be a positive number, got {}",
                self.learning_rate
            )));
        }
        if self.n_epochs == 0 {
            return Err(LabError::InvalidParameter(
                "epoch cap must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Summary of a trained model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub weights: Vec<f64>,
    pub bias: f64,
    pub learning_rate: f64,
    /// Epochs actually run.
    pub epochs: usize,
    /// Whether the last epoch made no mistakes.
    pub converged: bool,
    /// 1-indexed epoch of the first mistake-free pass.
    pub convergence_epoch: Option<usize>,
    pub train_time: Duration,
}

/// Rosenblatt perceptron: a binary linear classifier trained by the
/// mistake-driven update rule.
///
/// The model is either unfitted (no weights) or fitted. `fit` takes
/// `&mut self`, so a model cannot be trained from two places at once;
/// share a fitted model by reference for prediction only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Perceptron {
    learning_rate: f64,
    n_epochs: usize,
    weights: Option<Vec<f64>>,
    bias: Option<f64>,
    errors_history: Vec<usize>,
    train_time: Duration,
}

impl Perceptron {
    pub fn new(learning_rate: f64, n_epochs: usize) -> Self {
        Perceptron {
            learning_rate,
            n_epochs,
            weights: None,
            bias: None,
            errors_history: Vec::new(),
            train_time: Duration::ZERO,
        }
    }

    pub fn from_config(config: &PerceptronConfig) -> LabResult<Self> {
        config.validate()?;
        Ok(Perceptron::new(config.learning_rate, config.n_epochs))
    }

    fn net_input_row(weights: &[f64], bias: f64, row: &[f64]) -> f64 {
        weights.iter().zip(row).fold(bias, |acc, (w, x)| acc + w * x)
    }

    /// Train from scratch.
    ///
    /// Weights, bias and error history are reset on every call, so a second
    /// `fit` never continues from the previous run. Samples are visited in
    /// the given order in every epoch (no reshuffling), which makes the
    /// convergence epoch reproducible for a fixed input order. Training stops
    /// after the first epoch without mistakes or at the epoch cap.
    pub fn fit(&mut self, x: &Matrix, y: &[Label]) -> LabResult<()> {
        if x.rows() != y.len() {
            return Err(LabError::LengthMismatch {
                features: x.rows(),
                labels: y.len(),
            });
        }
        if x.is_empty() {
            return Err(LabError::EmptyInput("cannot fit a perceptron on zero samples"));
        }

        let start = Instant::now();
        let mut w = vec![0.0; x.cols()];
        let mut b = 0.0;
        self.errors_history.clear();

        for epoch in 1..=self.n_epochs {
            let mut mistakes = 0usize;
            for (row, &target) in x.iter_rows().zip(y) {
                let predicted = Label::from_net_input(Self::net_input_row(&w, b, row));
                let error = target.as_f64() - predicted.as_f64();
                if error != 0.0 {
                    let update = self.learning_rate * error;
                    b += update;
                    for (wj, xj) in w.iter_mut().zip(row) {
                        *wj += update * xj;
                    }
                    mistakes += 1;
                }
            }
            self.errors_history.push(mistakes);
            log::trace!("epoch {}: {} mistakes", epoch, mistakes);

            if mistakes == 0 {
                log::info!("converged at epoch {}", epoch);
                break;
            }
        }

        if self.errors_history.last() != Some(&0) {
            log::info!(
                "did not converge within {} epochs ({} mistakes in last epoch)",
                self.n_epochs,
                self.errors_history.last().copied().unwrap_or_default()
            );
        }

        self.weights = Some(w);
        self.bias = Some(b);
        self.train_time = start.elapsed();
        Ok(())
    }

    fn fitted(&self) -> LabResult<(&[f64], f64)> {
        match (&self.weights, self.bias) {
            (Some(w), Some(b)) => Ok((w.as_slice(), b)),
            _ => Err(LabError::NotFitted),
        }
    }

    /// Pre-activation values `bias + w · x` for every row.
    pub fn net_input(&self, x: &Matrix) -> LabResult<Vec<f64>> {
        let (w, b) = self.fitted()?;
        if x.cols() != w.len() {
            return Err(LabError::DimensionMismatch {
                expected: w.len(),
                got: x.cols(),
            });
        }
        Ok(x.iter_rows()
            .map(|row| Self::net_input_row(w, b, row))
            .collect())
    }

    /// Predict class labels; a net input of exactly zero is class 1.
    pub fn predict(&self, x: &Matrix) -> LabResult<Vec<Label>> {
        Ok(self
            .net_input(x)?
            .into_iter()
            .map(Label::from_net_input)
            .collect())
    }

    /// Decision line of a two-feature model, `None` when `w[1] == 0`.
    pub fn decision_boundary(&self) -> LabResult<Option<DecisionBoundary>> {
        let (w, b) = self.fitted()?;
        DecisionBoundary::from_weights(w, b)
    }

    pub fn model_info(&self) -> LabResult<ModelInfo> {
        let (w, b) = self.fitted()?;
        Ok(ModelInfo {
            weights: w.to_vec(),
            bias: b,
            learning_rate: self.learning_rate,
            epochs: self.errors_history.len(),
            converged: self.converged(),
            convergence_epoch: self.errors_history.iter().position(|&e| e == 0).map(|i| i + 1),
            train_time: self.train_time,
        })
    }

    pub fn converged(&self) -> bool {
        self.errors_history.last() == Some(&0)
    }

    pub fn is_fitted(&self) -> bool {
        self.weights.is_some()
    }

    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }

    pub fn bias(&self) -> Option<f64> {
        self.bias
    }

    /// Mistakes per epoch of the last `fit`.
    pub fn errors_history(&self) -> &[usize] {
        &self.errors_history
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn n_epochs(&self) -> usize {
        self.n_epochs
    }

    pub fn train_time(&self) -> Duration {
        self.train_time
    }
}

impl Default for Perceptron {
    fn default() -> Self {
        let config = PerceptronConfig::default();
        Perceptron::new(config.learning_rate, config.n_epochs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use perceptron_lab_datasets::{make_blobs, make_custom, make_moons};
    use perceptron_lab_preprocessing::fit_normalize;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn labels(values: &[i64]) -> Vec<Label> {
        Label::from_slice(values).unwrap()
    }

    #[test]
    fn test_perceptron_separable() {
        let x = Matrix::from_rows(&[
            vec![0.0, 0.0],
            vec![0.5, 0.5],
            vec![1.0, 1.0],
            vec![5.0, 5.0],
            vec![5.5, 5.5],
            vec![6.0, 6.0],
        ])
        .unwrap();
        let y = labels(&[0, 0, 0, 1, 1, 1]);

        let mut model = Perceptron::new(0.1, 1000);
        model.fit(&x, &y).unwrap();

        assert!(model.converged());
        assert_eq!(model.predict(&x).unwrap(), y);
    }

    #[test]
    fn test_update_rule_by_hand() {
        // First sample: net 0 -> predicts 1, label 0, so error -1.
        let x = Matrix::from_rows(&[vec![1.0, 2.0], vec![-1.0, -1.0]]).unwrap();
        let y = labels(&[0, 1]);
        let mut model = Perceptron::new(0.5, 1);
        model.fit(&x, &y).unwrap();

        // After sample 0: b = -0.5, w = [-0.5, -1.0].
        // Sample 1: net = -0.5 + 0.5 + 1.0 = 1.0 -> predicts 1, correct.
        assert_eq!(model.weights().unwrap(), &[-0.5, -1.0]);
        assert_eq!(model.bias(), Some(-0.5));
        assert_eq!(model.errors_history(), &[1]);
        assert!(!model.converged());
    }

    #[test]
    fn test_blobs_converge() {
        let mut rng = StdRng::seed_from_u64(42);
        let ds = make_blobs(200, 1.5, &mut rng);
        let (x, _) = fit_normalize(&ds.x).unwrap();

        let mut model = Perceptron::new(0.1, 100);
        model.fit(&x, &ds.y).unwrap();

        let info = model.model_info().unwrap();
        assert!(info.converged);
        assert!(info.epochs <= 100);
        assert_eq!(info.convergence_epoch, Some(info.epochs));
        assert_eq!(model.predict(&x).unwrap(), ds.y);
    }

    #[test]
    fn test_moons_do_not_converge() {
        let mut rng = StdRng::seed_from_u64(42);
        let ds = make_moons(200, 0.15, &mut rng);
        let (x, _) = fit_normalize(&ds.x).unwrap();

        let mut model = Perceptron::new(0.1, 100);
        model.fit(&x, &ds.y).unwrap();

        let info = model.model_info().unwrap();
        assert!(!info.converged);
        assert_eq!(info.epochs, 100);
        assert_eq!(info.convergence_epoch, None);

        let pred = model.predict(&x).unwrap();
        let correct = pred.iter().zip(&ds.y).filter(|(a, b)| a == b).count();
        assert!(correct < ds.y.len());
    }

    #[test]
    fn test_custom_scenario_and_tie_rule() {
        let mut rng = StdRng::seed_from_u64(2024);
        let ds = make_custom(100, [-2.0, -2.0], [2.0, 2.0], 1.0, &mut rng);

        let mut model = Perceptron::new(0.1, 50);
        model.fit(&ds.x, &ds.y).unwrap();
        let info = model.model_info().unwrap();
        assert!(info.converged);
        assert!(info.epochs < 50);

        let origin = Matrix::from_points(&[[0.0, 0.0]]);
        let net = model.net_input(&origin).unwrap()[0];
        assert_abs_diff_eq!(net, model.bias().unwrap());
        let expected = if net >= 0.0 { Label::One } else { Label::Zero };
        assert_eq!(model.predict(&origin).unwrap(), vec![expected]);
    }

    #[test]
    fn test_zero_net_input_is_class_one() {
        // Sample 0 is misclassified once, sample 1 sits exactly on the boundary.
        let x = Matrix::from_rows(&[vec![0.0, 1.0], vec![0.0, 0.0]]).unwrap();
        let y = labels(&[0, 1]);
        let mut model = Perceptron::new(1.0, 10);
        model.fit(&x, &y).unwrap();

        // w = [0, -1], b = -1 after the first mistake; later the zero sample
        // (net = b) drives b back to 0 where it is predicted as class 1.
        let pred = model.predict(&x).unwrap();
        assert!(model.converged());
        assert_eq!(pred, y);
        assert_eq!(model.bias(), Some(0.0));
    }

    #[test]
    fn test_refit_resets_state() {
        let mut rng = StdRng::seed_from_u64(5);
        let a = make_moons(60, 0.2, &mut rng);
        let b = make_custom(40, [-2.0, 0.0], [2.0, 0.0], 0.5, &mut rng);

        let mut fresh = Perceptron::new(0.1, 20);
        fresh.fit(&b.x, &b.y).unwrap();

        let mut reused = Perceptron::new(0.1, 20);
        reused.fit(&a.x, &a.y).unwrap();
        reused.fit(&b.x, &b.y).unwrap();

        assert_eq!(reused.errors_history(), fresh.errors_history());
        assert_eq!(reused.errors_history()[0], fresh.errors_history()[0]);
        assert_eq!(reused.weights(), fresh.weights());
        assert_eq!(reused.bias(), fresh.bias());
    }

    #[test]
    fn test_boundary_consistent_with_model() {
        let mut rng = StdRng::seed_from_u64(8);
        let ds = make_custom(60, [-2.0, -1.0], [2.0, 1.5], 0.8, &mut rng);
        let mut model = Perceptron::new(0.1, 50);
        model.fit(&ds.x, &ds.y).unwrap();

        let w = model.weights().unwrap().to_vec();
        let b = model.bias().unwrap();
        match model.decision_boundary().unwrap() {
            Some(line) => {
                assert!(w[1] != 0.0);
                for x1 in [-3.0, 0.0, 2.5] {
                    let x2 = line.x2_at(x1);
                    assert_abs_diff_eq!(w[0] * x1 + w[1] * x2 + b, 0.0, epsilon = 1e-9);
                }
            }
            None => assert_eq!(w[1], 0.0),
        }
    }

    #[test]
    fn test_vertical_boundary_is_none() {
        // Classes differ only in x1, so w[1] never moves off zero.
        let x = Matrix::from_rows(&[vec![-1.0, 0.0], vec![1.0, 0.0]]).unwrap();
        let y = labels(&[0, 1]);
        let mut model = Perceptron::new(0.1, 10);
        model.fit(&x, &y).unwrap();
        assert_eq!(model.weights().unwrap()[1], 0.0);
        assert_eq!(model.decision_boundary().unwrap(), None);
    }

    #[test]
    fn test_unfitted_usage_is_an_error() {
        let model = Perceptron::default();
        let x = Matrix::from_points(&[[1.0, 1.0]]);
        assert_eq!(model.predict(&x), Err(LabError::NotFitted));
        assert_eq!(model.model_info(), Err(LabError::NotFitted));
        assert_eq!(model.decision_boundary(), Err(LabError::NotFitted));
        assert!(!model.is_fitted());
    }

    #[test]
    fn test_malformed_input() {
        let mut model = Perceptron::new(0.1, 10);
        let x = Matrix::from_points(&[[1.0, 1.0], [2.0, 2.0]]);
        assert_eq!(
            model.fit(&x, &labels(&[1])),
            Err(LabError::LengthMismatch { features: 2, labels: 1 })
        );
        assert!(model.fit(&Matrix::empty(2), &[]).is_err());

        model.fit(&x, &labels(&[0, 1])).unwrap();
        let wide = Matrix::zeros(1, 3);
        assert!(model.predict(&wide).is_err());

        let x3 = Matrix::from_rows(&[vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 1.0]]).unwrap();
        model.fit(&x3, &labels(&[0, 1])).unwrap();
        assert_eq!(
            model.decision_boundary(),
            Err(LabError::DimensionMismatch { expected: 2, got: 3 })
        );
    }

    #[test]
    fn test_config_validation() {
        assert!(PerceptronConfig::default().validate().is_ok());
        let bad_lr = PerceptronConfig {
            learning_rate: 0.0,
            n_epochs: 10,
        };
        assert!(Perceptron::from_config(&bad_lr).is_err());
        let bad_epochs = PerceptronConfig {
            learning_rate: 0.1,
            n_epochs: 0,
        };
        assert!(bad_epochs.validate().is_err());
    }
}
