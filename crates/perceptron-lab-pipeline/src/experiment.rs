use crate::pipeline::Pipeline;
use perceptron_lab_core::{LabError, LabResult};
use perceptron_lab_datasets::{Dataset, DatasetInfo, DatasetKind};
use perceptron_lab_linear::{DecisionBoundary, ModelInfo, Perceptron, PerceptronConfig};
use perceptron_lab_metrics::{accuracy, ClassificationReport};
use perceptron_lab_preprocessing::{train_test_split, NormParams, Split, StandardScaler};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Everything needed to reproduce one train-and-evaluate run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub dataset: DatasetKind,
    /// Fraction of samples held out for testing, in `[0, 1)`.
    pub test_fraction: f64,
    pub perceptron: PerceptronConfig,
    /// Seed for data generation and splitting; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        ExperimentConfig {
            dataset: DatasetKind::default(),
            test_fraction: 0.2,
            perceptron: PerceptronConfig::default(),
            seed: None,
        }
    }
}

impl ExperimentConfig {
    pub fn validate(&self) -> LabResult<()> {
        if !(0.0..1.0).contains(&self.test_fraction) {
            return Err(LabError::InvalidParameter(format!(
                "test fraction must be in [0, 1), got {}",
                self.test_fraction
            )));
        }
        self.perceptron.validate()
    }
}

/// Serializable outcome of an experiment, for display or export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    pub config: ExperimentConfig,
    pub dataset: DatasetInfo,
    pub n_train: usize,
    pub n_test: usize,
    pub norm: NormParams,
    pub model: ModelInfo,
    pub errors_history: Vec<usize>,
    pub boundary: Option<DecisionBoundary>,
    pub train_accuracy: f64,
    pub test: ClassificationReport,
}

/// A finished run: the generated data, its split, the fitted pipeline and the report.
#[derive(Debug, Clone)]
pub struct Experiment {
    pub dataset: Dataset,
    pub split: Split,
    pub pipeline: Pipeline<StandardScaler, Perceptron>,
    pub report: ExperimentReport,
}

impl Experiment {
    /// Run with a generator seeded from `config.seed`, or from entropy.
    pub fn run(config: &ExperimentConfig) -> LabResult<Self> {
        let mut rng = match config.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self::run_with_rng(config, &mut rng)
    }

    /// Generate, split, normalize on the train partition, fit and evaluate.
    pub fn run_with_rng<R: Rng + ?Sized>(config: &ExperimentConfig, rng: &mut R) -> LabResult<Self> {
        config.validate()?;

        let dataset = config.dataset.generate(rng);
        let split = train_test_split(&dataset.x, &dataset.y, config.test_fraction, rng)?;
        log::info!(
            "dataset '{}': {} train / {} test samples",
            dataset.info.name,
            split.y_train.len(),
            split.y_test.len()
        );

        let mut pipeline = Pipeline::new(
            StandardScaler::new(),
            Perceptron::from_config(&config.perceptron)?,
        );
        pipeline.fit(&split.x_train, &split.y_train)?;

        let train_pred = pipeline.predict(&split.x_train)?;
        let test_pred = pipeline.predict(&split.x_test)?;
        let train_accuracy = accuracy(&split.y_train, &train_pred)?;
        let test = ClassificationReport::compute(&split.y_test, &test_pred)?;

        let model = pipeline.estimator();
        let norm = pipeline
            .transformer()
            .params()
            .cloned()
            .ok_or(LabError::NotFitted)?;
        let report = ExperimentReport {
            config: config.clone(),
            dataset: dataset.info.clone(),
            n_train: split.y_train.len(),
            n_test: split.y_test.len(),
            norm,
            model: model.model_info()?,
            errors_history: model.errors_history().to_vec(),
            boundary: model.decision_boundary()?,
            train_accuracy,
            test,
        };
        log::info!(
            "train accuracy {:.3}, test accuracy {:.3}",
            report.train_accuracy,
            report.test.accuracy
        );

        Ok(Experiment {
            dataset,
            split,
            pipeline,
            report,
        })
    }
}
