use crate::error::{LabError, LabResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary class label.
///
/// Serialized as the integer `0` or `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Label {
    Zero,
    One,
}

impl Label {
    /// Step activation: a net input of exactly zero maps to `One`.
    pub fn from_net_input(net: f64) -> Self {
        if net >= 0.0 {
            Label::One
        } else {
            Label::Zero
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Label::Zero => 0.0,
            Label::One => 1.0,
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            Label::Zero => 0,
            Label::One => 1,
        }
    }

    /// The other class.
    pub fn flipped(self) -> Self {
        match self {
            Label::Zero => Label::One,
            Label::One => Label::Zero,
        }
    }

    /// Convert a slice of integers into labels, failing on anything but 0/1.
    pub fn from_slice(values: &[i64]) -> LabResult<Vec<Label>> {
        values.iter().map(|&v| Label::try_from(v)).collect()
    }
}

impl TryFrom<i64> for Label {
    type Error = LabError;

    fn try_from(value: i64) -> LabResult<Self> {
        match value {
            0 => Ok(Label::Zero),
            1 => Ok(Label::One),
            other => Err(LabError::InvalidLabel(other)),
        }
    }
}

impl TryFrom<u8> for Label {
    type Error = LabError;

    fn try_from(value: u8) -> LabResult<Self> {
        Label::try_from(i64::from(value))
    }
}

impl From<Label> for u8 {
    fn from(label: Label) -> u8 {
        label.as_u8()
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}
