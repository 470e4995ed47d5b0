use crate::builtin::*;
use perceptron_lab_core::{LabError, LabResult, Label, Matrix};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Descriptive metadata attached to a generated dataset.
///
/// `linearly_separable` is what the generator declares, not something measured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub name: String,
    pub description: String,
    pub linearly_separable: bool,
}

impl DatasetInfo {
    pub fn new(name: &str, description: &str, linearly_separable: bool) -> Self {
        DatasetInfo {
            name: name.to_string(),
            description: description.to_string(),
            linearly_separable,
        }
    }
}

/// A labelled two-feature point set.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub x: Matrix,
    pub y: Vec<Label>,
    pub info: DatasetInfo,
}

impl Dataset {
    pub fn empty(info: DatasetInfo) -> Self {
        Dataset {
            x: Matrix::empty(2),
            y: Vec::new(),
            info,
        }
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }
}

/// The dataset catalog. Each variant carries the parameters of its generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DatasetKind {
    Blobs {
        n_samples: usize,
        cluster_std: f64,
    },
    Iris {
        n_samples: usize,
    },
    Moons {
        n_samples: usize,
        noise: f64,
    },
    Cancer {
        n_samples: usize,
    },
    Noisy {
        n_samples: usize,
        separation: f64,
        flip_prob: f64,
    },
    Custom {
        n_samples: usize,
        center0: [f64; 2],
        center1: [f64; 2],
        spread: f64,
    },
}

impl DatasetKind {
    pub const NAMES: [&'static str; 6] = ["blobs", "iris", "moons", "cancer", "noisy", "custom"];

    pub fn blobs() -> Self {
        DatasetKind::Blobs {
            n_samples: 200,
            cluster_std: 1.5,
        }
    }

    pub fn iris() -> Self {
        DatasetKind::Iris { n_samples: 100 }
    }

    pub fn moons() -> Self {
        DatasetKind::Moons {
            n_samples: 200,
            noise: 0.15,
        }
    }

    pub fn cancer() -> Self {
        DatasetKind::Cancer { n_samples: 200 }
    }

    pub fn noisy() -> Self {
        DatasetKind::Noisy {
            n_samples: 200,
            separation: 1.5,
            flip_prob: 0.05,
        }
    }

    pub fn custom() -> Self {
        DatasetKind::Custom {
            n_samples: 100,
            center0: [-2.0, -2.0],
            center1: [2.0, 2.0],
            spread: 1.0,
        }
    }

    /// Every catalog entry with its default parameters.
    pub fn catalog() -> Vec<DatasetKind> {
        vec![
            Self::blobs(),
            Self::iris(),
            Self::moons(),
            Self::cancer(),
            Self::noisy(),
            Self::custom(),
        ]
    }

    /// Short name, as accepted by `FromStr`.
    pub fn name(&self) -> &'static str {
        match self {
            DatasetKind::Blobs { .. } => "blobs",
            DatasetKind::Iris { .. } => "iris",
            DatasetKind::Moons { .. } => "moons",
            DatasetKind::Cancer { .. } => "cancer",
            DatasetKind::Noisy { .. } => "noisy",
            DatasetKind::Custom { .. } => "custom",
        }
    }

    pub fn n_samples(&self) -> usize {
        match *self {
            DatasetKind::Blobs { n_samples, .. }
            | DatasetKind::Iris { n_samples }
            | DatasetKind::Moons { n_samples, .. }
            | DatasetKind::Cancer { n_samples }
            | DatasetKind::Noisy { n_samples, .. }
            | DatasetKind::Custom { n_samples, .. } => n_samples,
        }
    }

    /// Same variant with a different sample count.
    pub fn with_n_samples(mut self, n: usize) -> Self {
        match &mut self {
            DatasetKind::Blobs { n_samples, .. }
            | DatasetKind::Iris { n_samples }
            | DatasetKind::Moons { n_samples, .. }
            | DatasetKind::Cancer { n_samples }
            | DatasetKind::Noisy { n_samples, .. }
            | DatasetKind::Custom { n_samples, .. } => *n_samples = n,
        }
        self
    }

    /// Metadata of the dataset this variant generates, without sampling it.
    pub fn info(&self) -> DatasetInfo {
        match *self {
            DatasetKind::Blobs { .. } => blobs_info(),
            DatasetKind::Iris { .. } => iris_info(),
            DatasetKind::Moons { .. } => moons_info(),
            DatasetKind::Cancer { .. } => cancer_info(),
            DatasetKind::Noisy { separation, .. } => noisy_info(separation),
            DatasetKind::Custom { .. } => custom_info(),
        }
    }

    /// Run the generator for this variant.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Dataset {
        let dataset = match *self {
            DatasetKind::Blobs {
                n_samples,
                cluster_std,
            } => make_blobs(n_samples, cluster_std, rng),
            DatasetKind::Iris { n_samples } => make_iris(n_samples, rng),
            DatasetKind::Moons { n_samples, noise } => make_moons(n_samples, noise, rng),
            DatasetKind::Cancer { n_samples } => make_cancer(n_samples, rng),
            DatasetKind::Noisy {
                n_samples,
                separation,
                flip_prob,
            } => make_noisy_classification(n_samples, separation, flip_prob, rng),
            DatasetKind::Custom {
                n_samples,
                center0,
                center1,
                spread,
            } => make_custom(n_samples, center0, center1, spread, rng),
        };
        log::debug!(
            "generated {} samples for dataset '{}'",
            dataset.len(),
            self.name()
        );
        dataset
    }
}

impl Default for DatasetKind {
    fn default() -> Self {
        DatasetKind::blobs()
    }
}

impl FromStr for DatasetKind {
    type Err = LabError;

    fn from_str(s: &str) -> LabResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blobs" => Ok(DatasetKind::blobs()),
            "iris" => Ok(DatasetKind::iris()),
            "moons" => Ok(DatasetKind::moons()),
            "cancer" => Ok(DatasetKind::cancer()),
            "noisy" => Ok(DatasetKind::noisy()),
            "custom" => Ok(DatasetKind::custom()),
            other => Err(LabError::UnknownDataset(other.to_string())),
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
