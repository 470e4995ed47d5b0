//! # perceptron-lab
//!
//! Train a classical Rosenblatt perceptron on synthetic two-feature data and
//! inspect how it learns.
//!
//! ## Modules
//!
//! - **core**: `Matrix`, `Label`, and the shared `LabError`
//! - **datasets**: blobs, iris, moons, cancer, noisy and custom generators; `DatasetKind` catalog
//! - **preprocessing**: random train/test split, z-score scaling with train-only statistics
//! - **linear**: `Perceptron`: mistake-driven training, prediction, decision boundary
//! - **metrics**: accuracy, confusion matrix, precision/recall/F1
//! - **pipeline**: `Transformer`/`Estimator` traits, `Pipeline`, end-to-end `Experiment`
//! - **io**: CSV export of samples, JSON export of reports and models

/// Core value types and errors.
pub use perceptron_lab_core as core;

/// Synthetic datasets.
pub use perceptron_lab_datasets as datasets;

/// Data preprocessing.
pub use perceptron_lab_preprocessing as preprocessing;

/// The perceptron.
pub use perceptron_lab_linear as linear;

/// Evaluation metrics.
pub use perceptron_lab_metrics as metrics;

/// Pipeline API and experiments.
pub use perceptron_lab_pipeline as pipeline;

/// I/O utilities.
pub use perceptron_lab_io as io;

pub mod prelude {
    pub use perceptron_lab_core::{LabError, LabResult, Label, Matrix};
    pub use perceptron_lab_datasets::{Dataset, DatasetInfo, DatasetKind};
    pub use perceptron_lab_linear::{DecisionBoundary, ModelInfo, Perceptron, PerceptronConfig};
    pub use perceptron_lab_metrics::{accuracy, ClassificationReport, ConfusionMatrix};
    pub use perceptron_lab_pipeline::{Experiment, ExperimentConfig, ExperimentReport};
    pub use perceptron_lab_preprocessing::{
        apply_normalize, fit_normalize, train_test_split, NormParams, StandardScaler,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_manual_flow_matches_components() {
        let mut rng = StdRng::seed_from_u64(31);
        let ds = DatasetKind::cancer().generate(&mut rng);
        let split = train_test_split(&ds.x, &ds.y, 0.25, &mut rng).unwrap();

        let (x_train, params) = fit_normalize(&split.x_train).unwrap();
        let x_test = apply_normalize(&split.x_test, &params).unwrap();

        let mut model = Perceptron::new(0.1, 100);
        model.fit(&x_train, &split.y_train).unwrap();
        let pred = model.predict(&x_test).unwrap();

        let cm = ConfusionMatrix::compute(&split.y_test, &pred).unwrap();
        assert_eq!(cm.total(), split.y_test.len());
        assert_abs_diff_eq!(cm.accuracy(), accuracy(&split.y_test, &pred).unwrap());
        assert_eq!(model.model_info().unwrap().epochs, model.errors_history().len());
    }

    #[test]
    fn test_boundary_in_original_units() {
        let mut rng = StdRng::seed_from_u64(17);
        let ds = DatasetKind::custom().generate(&mut rng);
        let (x, params) = fit_normalize(&ds.x).unwrap();
        let mut model = Perceptron::new(0.1, 50);
        model.fit(&x, &ds.y).unwrap();

        let Some(line) = model.decision_boundary().unwrap() else {
            return;
        };
        // Points on the normalized line map back to points the model scores at zero.
        let seg = Matrix::from_points(&line.segment(-1.0, 1.0));
        let original = params.inverse(&seg).unwrap();
        let renormalized = params.apply(&original).unwrap();
        for net in model.net_input(&renormalized).unwrap() {
            assert_abs_diff_eq!(net, 0.0, epsilon = 1e-9);
        }
    }
}
