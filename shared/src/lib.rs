use derive_more::From;
use serde::{Deserialize, Serialize};

pub mod diagnosis;
pub mod disease;
pub mod features;
pub mod forms;

pub use diagnosis::{Diagnosis, HEART_THRESHOLD, PARKINSONS_THRESHOLD};
pub use disease::Disease;
pub use forms::{DiabetesInput, HeartInput, InputError, ParkinsonsInput, TextForm};

/// Body of a prediction request. Serializes as the bare form values.
#[derive(Serialize, Clone, Debug, PartialEq, From)]
#[serde(untagged)]
pub enum PredictionRequest {
    Diabetes(DiabetesInput),
    Heart(HeartInput),
    Parkinsons(ParkinsonsInput),
}

impl PredictionRequest {
    pub fn disease(&self) -> Disease {
        match self {
            PredictionRequest::Diabetes(_) => Disease::Diabetes,
            PredictionRequest::Heart(_) => Disease::Heart,
            PredictionRequest::Parkinsons(_) => Disease::Parkinsons,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PredictionResponse {
    pub request_id: String,
    pub disease: Disease,
    pub diagnosis: String,
    pub positive: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DiseaseInfo {
    pub disease: Disease,
    pub menu_label: String,
    pub title: String,
    pub button_label: String,
    pub feature_count: usize,
}

impl From<Disease> for DiseaseInfo {
    fn from(disease: Disease) -> Self {
        Self {
            disease,
            menu_label: disease.menu_label().into(),
            title: disease.title().into(),
            button_label: disease.button_label().into(),
            feature_count: disease.feature_count(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ModelSummary {
    pub disease: Disease,
    pub n_features: usize,
    pub n_estimators: usize,
    pub sha256: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub models: Vec<ModelSummary>,
}
