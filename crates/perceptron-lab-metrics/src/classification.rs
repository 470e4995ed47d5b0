use perceptron_lab_core::{LabError, LabResult, Label};
use serde::{Deserialize, Serialize};

fn check_lengths(y_true: &[Label], y_pred: &[Label]) -> LabResult<()> {
    if y_true.len() != y_pred.len() {
        return Err(LabError::PredictionLengthMismatch {
            y_true: y_true.len(),
            y_pred: y_pred.len(),
        });
    }
    Ok(())
}

/// `num / den`, or 0 when the denominator is 0.
fn ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

/// Compute accuracy: fraction of correct predictions. Empty input gives 0.
pub fn accuracy(y_true: &[Label], y_pred: &[Label]) -> LabResult<f64> {
    check_lengths(y_true, y_pred)?;
    let correct = y_true
        .iter()
        .zip(y_pred)
        .filter(|(t, p)| t == p)
        .count();
    Ok(ratio(correct as f64, y_true.len() as f64))
}

/// 2x2 confusion counts with `Label::One` as the positive class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub tp: usize,
    pub tn: usize,
    pub fp: usize,
    #[serde(rename = "fn")]
    pub fn_: usize,
}

impl ConfusionMatrix {
    pub fn compute(y_true: &[Label], y_pred: &[Label]) -> LabResult<Self> {
        check_lengths(y_true, y_pred)?;
        let mut cm = ConfusionMatrix::default();
        for (&t, &p) in y_true.iter().zip(y_pred) {
            match (t, p) {
                (Label::One, Label::One) => cm.tp += 1,
                (Label::Zero, Label::Zero) => cm.tn += 1,
                (Label::Zero, Label::One) => cm.fp += 1,
                (Label::One, Label::Zero) => cm.fn_ += 1,
            }
        }
        Ok(cm)
    }

    pub fn total(&self) -> usize {
        self.tp + self.tn + self.fp + self.fn_
    }

    pub fn accuracy(&self) -> f64 {
        ratio((self.tp + self.tn) as f64, self.total() as f64)
    }

    /// TP / (TP + FP)
    pub fn precision(&self) -> f64 {
        ratio(self.tp as f64, (self.tp + self.fp) as f64)
    }

    /// TP / (TP + FN)
    pub fn recall(&self) -> f64 {
        ratio(self.tp as f64, (self.tp + self.fn_) as f64)
    }

    pub fn f1(&self) -> f64 {
        let p = self.precision();
        let r = self.recall();
        ratio(2.0 * p * r, p + r)
    }

    /// Rows are true class, columns predicted class: `[[tn, fp], [fn, tp]]`.
    pub fn as_array(&self) -> [[usize; 2]; 2] {
        [[self.tn, self.fp], [self.fn_, self.tp]]
    }
}

/// Counts and derived scores in one value for display layers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub accuracy: f64,
    pub confusion: ConfusionMatrix,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl ClassificationReport {
    pub fn compute(y_true: &[Label], y_pred: &[Label]) -> LabResult<Self> {
        Ok(ClassificationReport::from(ConfusionMatrix::compute(y_true, y_pred)?))
    }
}

impl From<ConfusionMatrix> for ClassificationReport {
    fn from(confusion: ConfusionMatrix) -> Self {
        ClassificationReport {
            accuracy: confusion.accuracy(),
            confusion,
            precision: confusion.precision(),
            recall: confusion.recall(),
            f1: confusion.f1(),
        }
    }
}
