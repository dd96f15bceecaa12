//! Feature vector assembly. Field order here is the order each model was
//! trained on and must not be changed independently of the artifacts.

use crate::forms::{DiabetesInput, HeartInput, ParkinsonsInput};

pub const DIABETES_FEATURES: usize = 8;
pub const HEART_FEATURES: usize = 13;
pub const PARKINSONS_FEATURES: usize = 22;
/// Parkinson's values collected by the form; the rest of the vector is zero.
pub const PARKINSONS_COLLECTED: usize = 9;

/// Converts form text to a feature value. Blank, unparseable and non-finite
/// text all become `0.0`, indistinguishable from a literal zero. Digit groups
/// may be separated by single underscores (`1_000`).
pub fn parse_or_zero(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let parsed = if trimmed.contains('_') {
        strip_digit_separators(trimmed).and_then(|digits| digits.parse::<f64>().ok())
    } else {
        trimmed.parse::<f64>().ok()
    };
    match parsed {
        Some(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

// Every underscore must sit between two ASCII digits.
fn strip_digit_separators(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    for (i, byte) in bytes.iter().enumerate() {
        if *byte != b'_' {
            continue;
        }
        let before = i.checked_sub(1).map(|j| bytes[j]);
        let after = bytes.get(i + 1).copied();
        if !(before.is_some_and(|c| c.is_ascii_digit()) && after.is_some_and(|c| c.is_ascii_digit())) {
            return None;
        }
    }
    Some(text.replace('_', ""))
}

impl DiabetesInput {
    pub fn feature_vector(&self) -> [f64; DIABETES_FEATURES] {
        [
            &self.pregnancies,
            &self.glucose,
            &self.blood_pressure,
            &self.skin_thickness,
            &self.insulin,
            &self.bmi,
            &self.diabetes_pedigree_function,
            &self.age,
        ]
        .map(|raw| parse_or_zero(raw))
    }
}

impl HeartInput {
    pub fn feature_vector(&self) -> [f64; HEART_FEATURES] {
        [
            self.age as f64,
            self.sex as f64,
            self.cp as f64,
            self.trestbps as f64,
            self.chol as f64,
            self.fbs as f64,
            self.restecg as f64,
            self.thalach as f64,
            self.exang as f64,
            self.oldpeak,
            self.slope as f64,
            self.ca as f64,
            self.thal as f64,
        ]
    }
}

impl ParkinsonsInput {
    pub fn feature_vector(&self) -> [f64; PARKINSONS_FEATURES] {
        let collected: [&String; PARKINSONS_COLLECTED] = [
            &self.mdvp_fo,
            &self.mdvp_jitter_percent,
            &self.mdvp_shimmer,
            &self.mdvp_fhi,
            &self.mdvp_jitter_abs,
            &self.shimmer_db,
            &self.mdvp_flo,
            &self.hnr,
            &self.rpde,
        ];

        let mut vector = [0.0; PARKINSONS_FEATURES];
        for (slot, raw) in vector.iter_mut().zip(collected) {
            *slot = parse_or_zero(raw);
        }
        vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_garbage_text_become_zero() {
        for raw in ["", "   ", "abc", "1,5", "NaN", "inf", "-inf", "12mg"] {
            assert_eq!(parse_or_zero(raw), 0.0, "input {raw:?}");
        }
        assert_eq!(parse_or_zero(" 25.5 "), 25.5);
        assert_eq!(parse_or_zero("-3"), -3.0);
        assert_eq!(parse_or_zero("1e2"), 100.0);
    }

    #[test]
    fn underscore_digit_groups_are_accepted() {
        assert_eq!(parse_or_zero("1_000"), 1000.0);
        assert_eq!(parse_or_zero(" 12_500.25 "), 12500.25);
        assert_eq!(parse_or_zero("0.000_5"), 0.0005);
        for raw in ["_1", "1_", "1__0", "1_.5", "1e_3"] {
            assert_eq!(parse_or_zero(raw), 0.0, "input {raw:?}");
        }
    }

    #[test]
    fn overflowing_text_becomes_zero() {
        assert_eq!(parse_or_zero("1e400"), 0.0);
        assert_eq!(parse_or_zero("Infinity"), 0.0);
    }

    #[test]
    fn diabetes_vector_follows_model_order() {
        let input = DiabetesInput {
            pregnancies: "2".into(),
            glucose: "120".into(),
            blood_pressure: "70".into(),
            skin_thickness: "".into(),
            insulin: "0".into(),
            bmi: "25.0".into(),
            diabetes_pedigree_function: "0.3".into(),
            age: "".into(),
        };
        assert_eq!(
            input.feature_vector(),
            [2.0, 120.0, 70.0, 0.0, 0.0, 25.0, 0.3, 0.0]
        );
    }

    #[test]
    fn heart_vector_follows_model_order() {
        let input = HeartInput {
            age: 63,
            sex: 1,
            cp: 3,
            trestbps: 145,
            chol: 233,
            fbs: 1,
            restecg: 0,
            thalach: 150,
            exang: 0,
            oldpeak: 2.3,
            slope: 0,
            ca: 0,
            thal: 1,
        };
        assert_eq!(
            input.feature_vector(),
            [63.0, 1.0, 3.0, 145.0, 233.0, 1.0, 0.0, 150.0, 0.0, 2.3, 0.0, 0.0, 1.0]
        );
    }

    #[test]
    fn parkinsons_vector_is_zero_padded() {
        let input = ParkinsonsInput {
            mdvp_fo: "119.992".into(),
            mdvp_jitter_percent: "0.00784".into(),
            mdvp_shimmer: "0.04374".into(),
            mdvp_fhi: "157.302".into(),
            mdvp_jitter_abs: "0.00007".into(),
            shimmer_db: "0.426".into(),
            mdvp_flo: "74.997".into(),
            hnr: "21.033".into(),
            rpde: "0.414783".into(),
        };
        let vector = input.feature_vector();
        assert_eq!(vector.len(), 22);
        assert_eq!(vector[0], 119.992);
        assert_eq!(vector[8], 0.414783);
        assert!(vector[PARKINSONS_COLLECTED..].iter().all(|v| *v == 0.0));
    }

    #[test]
    fn empty_parkinsons_form_is_all_zero() {
        let vector = ParkinsonsInput::default().feature_vector();
        assert!(vector.iter().all(|v| *v == 0.0));
    }
}
