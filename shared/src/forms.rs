//! Form schemas and the values collected from them.
//!
//! Diabetes and Parkinson's forms are free text, so their inputs are kept as
//! strings until the feature vector is built. The heart form uses typed
//! widgets whose ranges are described by [`HEART_FIELDS`].

use serde::{Deserialize, Deserializer, Serialize};

/// A free-text input box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextField {
    pub key: &'static str,
    pub label: &'static str,
    /// 1-based layout column.
    pub column: u8,
}

/// Constraint enforced by a heart form widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Widget {
    Number { min: f64, max: f64, step: f64 },
    Radio(&'static [(u8, &'static str)]),
    Select(&'static [u8]),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeartField {
    pub key: &'static str,
    pub label: &'static str,
    /// 1-based layout column, 0 spans the full width below the columns.
    pub column: u8,
    pub widget: Widget,
}

const SEX: &[(u8, &str)] = &[(0, "Female"), (1, "Male")];
const YES_NO: &[(u8, &str)] = &[(0, "No"), (1, "Yes")];

pub const DIABETES_FIELDS: [TextField; 8] = [
    TextField { key: "pregnancies", label: "Number of Pregnancies", column: 1 },
    TextField { key: "skin_thickness", label: "Skin Thickness Value", column: 1 },
    TextField { key: "diabetes_pedigree_function", label: "Diabetes Pedigree Function Value", column: 1 },
    TextField { key: "glucose", label: "Glucose Level", column: 2 },
    TextField { key: "insulin", label: "Insulin Level", column: 2 },
    TextField { key: "age", label: "Age of the Person", column: 2 },
    TextField { key: "blood_pressure", label: "Blood Pressure Value", column: 3 },
    TextField { key: "bmi", label: "BMI Value", column: 3 },
];

pub const PARKINSONS_FIELDS: [TextField; 9] = [
    TextField { key: "mdvp_fo", label: "MDVP:Fo (Hz)", column: 1 },
    TextField { key: "mdvp_jitter_percent", label: "MDVP:Jitter (%)", column: 1 },
    TextField { key: "mdvp_shimmer", label: "MDVP:Shimmer", column: 1 },
    TextField { key: "mdvp_fhi", label: "MDVP:Fhi (Hz)", column: 2 },
    TextField { key: "mdvp_jitter_abs", label: "MDVP:Jitter (Abs)", column: 2 },
    TextField { key: "shimmer_db", label: "Shimmer dB", column: 2 },
    TextField { key: "mdvp_flo", label: "MDVP:Flo (Hz)", column: 3 },
    TextField { key: "hnr", label: "Harmonics-to-Noise Ratio (HNR)", column: 3 },
    TextField { key: "rpde", label: "RPDE", column: 3 },
];

pub const HEART_FIELDS: [HeartField; 13] = [
    HeartField { key: "age", label: "Age", column: 1, widget: Widget::Number { min: 1.0, max: 120.0, step: 1.0 } },
    HeartField { key: "trestbps", label: "Resting Blood Pressure (mm Hg)", column: 1, widget: Widget::Number { min: 50.0, max: 200.0, step: 1.0 } },
    HeartField { key: "chol", label: "Serum Cholesterol (mg/dL)", column: 1, widget: Widget::Number { min: 100.0, max: 600.0, step: 1.0 } },
    HeartField { key: "thalach", label: "Maximum Heart Rate Achieved", column: 1, widget: Widget::Number { min: 60.0, max: 220.0, step: 1.0 } },
    HeartField { key: "sex", label: "Sex", column: 2, widget: Widget::Radio(SEX) },
    HeartField { key: "fbs", label: "Fasting Blood Sugar > 120 mg/dL", column: 2, widget: Widget::Radio(YES_NO) },
    HeartField { key: "exang", label: "Exercise Induced Angina", column: 2, widget: Widget::Radio(YES_NO) },
    HeartField { key: "oldpeak", label: "ST Depression Induced by Exercise", column: 2, widget: Widget::Number { min: 0.0, max: 6.0, step: 0.1 } },
    HeartField { key: "cp", label: "Chest Pain Type", column: 3, widget: Widget::Select(&[0, 1, 2, 3]) },
    HeartField { key: "restecg", label: "Resting ECG Results", column: 3, widget: Widget::Select(&[0, 1, 2]) },
    HeartField { key: "slope", label: "Slope of Peak Exercise ST Segment", column: 3, widget: Widget::Select(&[0, 1, 2]) },
    HeartField { key: "ca", label: "Number of Major Vessels Colored by Fluoroscopy", column: 3, widget: Widget::Number { min: 0.0, max: 3.0, step: 1.0 } },
    HeartField { key: "thal", label: "Thalassemia Type", column: 0, widget: Widget::Select(&[0, 1, 2, 3]) },
];

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange { field: &'static str, value: f64, min: f64, max: f64 },
    #[error("{field} must be one of {allowed:?}, got {value}")]
    InvalidOption { field: &'static str, value: f64, allowed: Vec<u8> },
}

/// Access to the string fields of a free-text form by key.
pub trait TextForm {
    fn fields() -> &'static [TextField];
    fn field(&self, key: &str) -> Option<&str>;
    fn field_mut(&mut self, key: &str) -> Option<&mut String>;
}

/// Reads a free-text field. JSON `null` counts as blank and a bare number is
/// kept as its decimal text.
fn text_or_blank<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(f64),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(text)) => text,
        Some(Raw::Number(number)) => number.to_string(),
        None => String::new(),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiabetesInput {
    #[serde(deserialize_with = "text_or_blank")]
    pub pregnancies: String,
    #[serde(deserialize_with = "text_or_blank")]
    pub glucose: String,
    #[serde(deserialize_with = "text_or_blank")]
    pub blood_pressure: String,
    #[serde(deserialize_with = "text_or_blank")]
    pub skin_thickness: String,
    #[serde(deserialize_with = "text_or_blank")]
    pub insulin: String,
    #[serde(deserialize_with = "text_or_blank")]
    pub bmi: String,
    #[serde(deserialize_with = "text_or_blank")]
    pub diabetes_pedigree_function: String,
    #[serde(deserialize_with = "text_or_blank")]
    pub age: String,
}

impl TextForm for DiabetesInput {
    fn fields() -> &'static [TextField] {
        &DIABETES_FIELDS
    }

    fn field(&self, key: &str) -> Option<&str> {
        let value = match key {
            "pregnancies" => &self.pregnancies,
            "glucose" => &self.glucose,
            "blood_pressure" => &self.blood_pressure,
            "skin_thickness" => &self.skin_thickness,
            "insulin" => &self.insulin,
            "bmi" => &self.bmi,
            "diabetes_pedigree_function" => &self.diabetes_pedigree_function,
            "age" => &self.age,
            _ => return None,
        };
        Some(value)
    }

    fn field_mut(&mut self, key: &str) -> Option<&mut String> {
        let value = match key {
            "pregnancies" => &mut self.pregnancies,
            "glucose" => &mut self.glucose,
            "blood_pressure" => &mut self.blood_pressure,
            "skin_thickness" => &mut self.skin_thickness,
            "insulin" => &mut self.insulin,
            "bmi" => &mut self.bmi,
            "diabetes_pedigree_function" => &mut self.diabetes_pedigree_function,
            "age" => &mut self.age,
            _ => return None,
        };
        Some(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParkinsonsInput {
    #[serde(deserialize_with = "text_or_blank")]
    pub mdvp_fo: String,
    #[serde(deserialize_with = "text_or_blank")]
    pub mdvp_jitter_percent: String,
    #[serde(deserialize_with = "text_or_blank")]
    pub mdvp_shimmer: String,
    #[serde(deserialize_with = "text_or_blank")]
    pub mdvp_fhi: String,
    #[serde(deserialize_with = "text_or_blank")]
    pub mdvp_jitter_abs: String,
    #[serde(deserialize_with = "text_or_blank")]
    pub shimmer_db: String,
    #[serde(deserialize_with = "text_or_blank")]
    pub mdvp_flo: String,
    #[serde(deserialize_with = "text_or_blank")]
    pub hnr: String,
    #[serde(deserialize_with = "text_or_blank")]
    pub rpde: String,
}

impl TextForm for ParkinsonsInput {
    fn fields() -> &'static [TextField] {
        &PARKINSONS_FIELDS
    }

    fn field(&self, key: &str) -> Option<&str> {
        let value = match key {
            "mdvp_fo" => &self.mdvp_fo,
            "mdvp_jitter_percent" => &self.mdvp_jitter_percent,
            "mdvp_shimmer" => &self.mdvp_shimmer,
            "mdvp_fhi" => &self.mdvp_fhi,
            "mdvp_jitter_abs" => &self.mdvp_jitter_abs,
            "shimmer_db" => &self.shimmer_db,
            "mdvp_flo" => &self.mdvp_flo,
            "hnr" => &self.hnr,
            "rpde" => &self.rpde,
            _ => return None,
        };
        Some(value)
    }

    fn field_mut(&mut self, key: &str) -> Option<&mut String> {
        let value = match key {
            "mdvp_fo" => &mut self.mdvp_fo,
            "mdvp_jitter_percent" => &mut self.mdvp_jitter_percent,
            "mdvp_shimmer" => &mut self.mdvp_shimmer,
            "mdvp_fhi" => &mut self.mdvp_fhi,
            "mdvp_jitter_abs" => &mut self.mdvp_jitter_abs,
            "shimmer_db" => &mut self.shimmer_db,
            "mdvp_flo" => &mut self.mdvp_flo,
            "hnr" => &mut self.hnr,
            "rpde" => &mut self.rpde,
            _ => return None,
        };
        Some(value)
    }
}

/// Heart form values. Defaults are each widget's initial value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeartInput {
    pub age: u32,
    pub sex: u8,
    pub cp: u8,
    pub trestbps: u32,
    pub chol: u32,
    pub fbs: u8,
    pub restecg: u8,
    pub thalach: u32,
    pub exang: u8,
    pub oldpeak: f64,
    pub slope: u8,
    pub ca: u8,
    pub thal: u8,
}

impl Default for HeartInput {
    fn default() -> Self {
        Self {
            age: 1,
            sex: 0,
            cp: 0,
            trestbps: 50,
            chol: 100,
            fbs: 0,
            restecg: 0,
            thalach: 60,
            exang: 0,
            oldpeak: 0.0,
            slope: 0,
            ca: 0,
            thal: 0,
        }
    }
}

impl HeartInput {
    pub fn get(&self, key: &str) -> Option<f64> {
        let value = match key {
            "age" => self.age as f64,
            "sex" => self.sex as f64,
            "cp" => self.cp as f64,
            "trestbps" => self.trestbps as f64,
            "chol" => self.chol as f64,
            "fbs" => self.fbs as f64,
            "restecg" => self.restecg as f64,
            "thalach" => self.thalach as f64,
            "exang" => self.exang as f64,
            "oldpeak" => self.oldpeak,
            "slope" => self.slope as f64,
            "ca" => self.ca as f64,
            "thal" => self.thal as f64,
            _ => return None,
        };
        Some(value)
    }

    /// Stores `value` into the named field. Integer fields are rounded.
    pub fn set(&mut self, key: &str, value: f64) -> bool {
        let whole = value.round();
        match key {
            "age" => self.age = whole as u32,
            "sex" => self.sex = whole as u8,
            "cp" => self.cp = whole as u8,
            "trestbps" => self.trestbps = whole as u32,
            "chol" => self.chol = whole as u32,
            "fbs" => self.fbs = whole as u8,
            "restecg" => self.restecg = whole as u8,
            "thalach" => self.thalach = whole as u32,
            "exang" => self.exang = whole as u8,
            "oldpeak" => self.oldpeak = value,
            "slope" => self.slope = whole as u8,
            "ca" => self.ca = whole as u8,
            "thal" => self.thal = whole as u8,
            _ => return false,
        }
        true
    }

    /// Checks every field against its widget constraint.
    pub fn validate(&self) -> Result<(), InputError> {
        for field in HEART_FIELDS.iter() {
            let value = self.get(field.key).unwrap_or_default();
            match field.widget {
                Widget::Number { min, max, .. } => {
                    if value < min || value > max {
                        return Err(InputError::OutOfRange { field: field.key, value, min, max });
                    }
                }
                Widget::Radio(options) => {
                    if !options.iter().any(|(v, _)| *v as f64 == value) {
                        return Err(InputError::InvalidOption {
                            field: field.key,
                            value,
                            allowed: options.iter().map(|(v, _)| *v).collect(),
                        });
                    }
                }
                Widget::Select(options) => {
                    if !options.iter().any(|v| *v as f64 == value) {
                        return Err(InputError::InvalidOption {
                            field: field.key,
                            value,
                            allowed: options.to_vec(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

/// Interprets raw number-widget text the way the widget does: parse, clamp
/// into range, snap to the step. Returns `None` for text that is not a number.
pub fn clamp_to_widget(widget: &Widget, raw: &str) -> Option<f64> {
    let value = raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
    match *widget {
        Widget::Number { min, max, step } => {
            let snapped = if step > 0.0 {
                min + ((value - min) / step).round() * step
            } else {
                value
            };
            // Keep one decimal of precision for fractional steps.
            let snapped = (snapped * 10.0).round() / 10.0;
            Some(snapped.clamp(min, max))
        }
        Widget::Radio(_) | Widget::Select(_) => Some(value),
    }
}
