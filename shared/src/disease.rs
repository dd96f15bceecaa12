use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::features::{DIABETES_FEATURES, HEART_FEATURES, PARKINSONS_FEATURES};

/// The three independent prediction flows.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Disease {
    Diabetes,
    Heart,
    Parkinsons,
}

impl Disease {
    /// All flows in menu order.
    pub fn all() -> impl Iterator<Item = Disease> {
        Disease::iter()
    }

    pub fn menu_label(self) -> &'static str {
        match self {
            Disease::Diabetes => "Diabetes Prediction",
            Disease::Heart => "Heart Disease Prediction",
            Disease::Parkinsons => "Parkinson’s Prediction",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Disease::Diabetes => "Diabetes Prediction using ML",
            Disease::Heart => "Heart Disease Prediction using ML",
            Disease::Parkinsons => "Parkinson’s Disease Prediction using ML",
        }
    }

    pub fn button_label(self) -> &'static str {
        match self {
            Disease::Diabetes => "Diabetes Test Result",
            Disease::Heart => "Heart Disease Test Result",
            Disease::Parkinsons => "Parkinson’s Test Result",
        }
    }

    /// Font Awesome icon class shown in the navigation menu.
    pub fn icon(self) -> &'static str {
        match self {
            Disease::Diabetes => "fa-solid fa-chart-line",
            Disease::Heart => "fa-solid fa-heart-pulse",
            Disease::Parkinsons => "fa-solid fa-person",
        }
    }

    /// Length of the feature vector the model for this flow is trained on.
    pub fn feature_count(self) -> usize {
        match self {
            Disease::Diabetes => DIABETES_FEATURES,
            Disease::Heart => HEART_FEATURES,
            Disease::Parkinsons => PARKINSONS_FEATURES,
        }
    }

    pub fn endpoint(self) -> String {
        format!("/api/predict/{}", self.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn menu_order_is_fixed() {
        let all: Vec<_> = Disease::all().collect();
        assert_eq!(all, vec![Disease::Diabetes, Disease::Heart, Disease::Parkinsons]);
    }

    #[test]
    fn names_round_trip_through_paths() {
        assert_eq!(Disease::Parkinsons.endpoint(), "/api/predict/parkinsons");
        assert_eq!(Disease::from_str("heart").unwrap(), Disease::Heart);
        assert_eq!(serde_json::to_string(&Disease::Diabetes).unwrap(), "\"diabetes\"");
    }

    #[test]
    fn feature_counts_match_models() {
        assert_eq!(Disease::Diabetes.feature_count(), 8);
        assert_eq!(Disease::Heart.feature_count(), 13);
        assert_eq!(Disease::Parkinsons.feature_count(), 22);
    }
}
