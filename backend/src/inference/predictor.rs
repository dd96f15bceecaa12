use ndarray::{ArrayView2, Axis, aview1};
use shared::{
    DiabetesInput, Diagnosis, Disease, HEART_THRESHOLD, HeartInput, PARKINSONS_THRESHOLD, ParkinsonsInput,
};

use crate::inference::model::{Classifier, InferenceError};
use crate::inference::store::ModelStore;

/// Reshapes one feature vector into a single-sample batch.
fn as_batch(features: &[f64]) -> ArrayView2<'_, f64> {
    aview1(features).insert_axis(Axis(0))
}

fn positive_probability(classifier: &dyn Classifier, features: &[f64]) -> Result<f64, InferenceError> {
    let proba = classifier.predict_proba(as_batch(features))?;
    log::debug!("Model classes: {:?}", classifier.classes());
    log::debug!("Prediction probabilities: {}", proba.row(0));
    proba
        .get((0, 1))
        .copied()
        .ok_or_else(|| InferenceError::InvalidArtifact("no positive class column".into()))
}

pub fn predict_diabetes(store: &ModelStore, input: &DiabetesInput) -> Result<Diagnosis, InferenceError> {
    let features = input.feature_vector();
    let labels = store.classifier(Disease::Diabetes).predict(as_batch(&features))?;
    let label = labels
        .get(0)
        .copied()
        .ok_or_else(|| InferenceError::InvalidArtifact("empty prediction".into()))?;
    Ok(Diagnosis::from_label(Disease::Diabetes, label))
}

pub fn predict_heart(store: &ModelStore, input: &HeartInput) -> Result<Diagnosis, InferenceError> {
    let features = input.feature_vector();
    let probability = positive_probability(store.classifier(Disease::Heart), &features)?;
    Ok(Diagnosis::from_probability(Disease::Heart, probability, HEART_THRESHOLD))
}

pub fn predict_parkinsons(store: &ModelStore, input: &ParkinsonsInput) -> Result<Diagnosis, InferenceError> {
    let features = input.feature_vector();
    let probability = positive_probability(store.classifier(Disease::Parkinsons), &features)?;
    Ok(Diagnosis::from_probability(Disease::Parkinsons, probability, PARKINSONS_THRESHOLD))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::inference::model::tests::{forest, stump};

    /// Diabetes splits on glucose at 127.5, heart on cholesterol at 399.5 and
    /// Parkinson's on MDVP:Fo at 150 Hz (0.75 below, 0.7 above).
    pub(crate) fn test_store() -> ModelStore {
        let diabetes = forest(8, vec![stump(1, 127.5, [9.0, 1.0], [1.0, 9.0])]);
        let heart = forest(
            13,
            vec![
                stump(4, 399.5, [1.0, 0.0], [0.0, 1.0]),
                stump(4, 399.5, [3.0, 2.0], [1.0, 4.0]),
            ],
        );
        let parkinsons = forest(22, vec![stump(0, 150.0, [1.0, 3.0], [3.0, 7.0])]);
        ModelStore::from_classifiers(Box::new(diabetes), Box::new(heart), Box::new(parkinsons))
    }

    #[test]
    fn batch_has_one_row() {
        let batch = as_batch(&[1.0, 2.0, 3.0]);
        assert_eq!(batch.shape(), &[1, 3]);
    }

    #[test]
    fn diabetes_follows_the_predicted_label() {
        let store = test_store();
        let high = DiabetesInput { glucose: "180".into(), ..DiabetesInput::default() };
        let low = DiabetesInput { glucose: "90".into(), ..DiabetesInput::default() };

        assert_eq!(
            predict_diabetes(&store, &high).unwrap().message(),
            "⚠️ The Person is Diabetic"
        );
        assert_eq!(
            predict_diabetes(&store, &low).unwrap().message(),
            "✅ The Person is NOT Diabetic"
        );
    }

    #[test]
    fn blank_diabetes_form_predicts_on_zeros() {
        let store = test_store();
        let diagnosis = predict_diabetes(&store, &DiabetesInput::default()).unwrap();
        assert!(!diagnosis.positive);
    }

    #[test]
    fn heart_applies_the_lowered_threshold() {
        let store = test_store();
        // chol <= 399.5: (0 + 0.4) / 2 = 0.2; above: (1 + 0.8) / 2 = 0.9
        let low = HeartInput { chol: 200, ..HeartInput::default() };
        let high = HeartInput { chol: 450, ..HeartInput::default() };

        assert!(!predict_heart(&store, &low).unwrap().positive);
        assert_eq!(
            predict_heart(&store, &high).unwrap().message(),
            "⚠️ The Person is at Risk of Heart Disease"
        );
    }

    #[test]
    fn heart_is_at_risk_at_exactly_point_four() {
        let heart = forest(13, vec![stump(0, 50.0, [3.0, 2.0], [3.0, 2.0])]);
        let store = ModelStore::from_classifiers(
            Box::new(forest(8, vec![stump(0, 1.0, [1.0, 0.0], [0.0, 1.0])])),
            Box::new(heart),
            Box::new(forest(22, vec![stump(0, 1.0, [1.0, 0.0], [0.0, 1.0])])),
        );
        // 2 / 5 is the closest double to 0.4, the same as the threshold literal.
        assert!(predict_heart(&store, &HeartInput::default()).unwrap().positive);
    }

    #[test]
    fn parkinsons_needs_point_seven_five() {
        let store = test_store();
        let low_pitch = ParkinsonsInput { mdvp_fo: "120".into(), ..ParkinsonsInput::default() };
        let high_pitch = ParkinsonsInput { mdvp_fo: "200".into(), ..ParkinsonsInput::default() };

        // 3 / 4 = 0.75 is positive, 7 / 10 = 0.7 is not.
        assert_eq!(
            predict_parkinsons(&store, &low_pitch).unwrap().message(),
            "⚠️ The Person has Parkinson’s"
        );
        assert_eq!(
            predict_parkinsons(&store, &high_pitch).unwrap().message(),
            "✅ The Person does NOT have Parkinson’s"
        );
    }

    #[test]
    fn repeated_predictions_are_identical() {
        let store = test_store();
        let input = ParkinsonsInput { mdvp_fo: "149.9".into(), hnr: "21".into(), ..ParkinsonsInput::default() };
        let first = predict_parkinsons(&store, &input).unwrap();
        for _ in 0..10 {
            assert_eq!(predict_parkinsons(&store, &input).unwrap(), first);
        }
    }
}
