use std::fmt;

use serde::{Deserialize, Serialize};

use crate::disease::Disease;

/// Positive-class probability at or above which the heart flow reports risk.
/// Set below 0.5 for sensitivity.
pub const HEART_THRESHOLD: f64 = 0.4;
/// Positive-class probability at or above which the Parkinson's flow reports a
/// positive result.
pub const PARKINSONS_THRESHOLD: f64 = 0.75;

/// Outcome of one prediction, rendered as one of two fixed strings per flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub disease: Disease,
    pub positive: bool,
}

impl Diagnosis {
    /// From a predicted class label; any label other than 0 is positive.
    pub fn from_label(disease: Disease, label: f64) -> Self {
        Self { disease, positive: label != 0.0 }
    }

    /// From a positive-class probability; positive at or above `threshold`.
    pub fn from_probability(disease: Disease, probability: f64, threshold: f64) -> Self {
        Self { disease, positive: probability >= threshold }
    }

    pub fn message(&self) -> &'static str {
        match (self.disease, self.positive) {
            (Disease::Diabetes, false) => "✅ The Person is NOT Diabetic",
            (Disease::Diabetes, true) => "⚠️ The Person is Diabetic",
            (Disease::Heart, false) => "✅ The Person does NOT have Heart Disease",
            (Disease::Heart, true) => "⚠️ The Person is at Risk of Heart Disease",
            (Disease::Parkinsons, false) => "✅ The Person does NOT have Parkinson’s",
            (Disease::Parkinsons, true) => "⚠️ The Person has Parkinson’s",
        }
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
