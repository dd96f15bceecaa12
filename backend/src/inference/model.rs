use ndarray::{Array1, Array2, ArrayView1, ArrayView2, ArrayViewMut1};
use serde::Deserialize;

/// Marker in `children_left` for a leaf node.
const LEAF: i64 = -1;

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("Failed to read model artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid model artifact: {0}")]
    InvalidArtifact(String),
    #[error("Model expects {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },
}

/// A trained classifier over fixed-length numeric feature vectors.
///
/// Inputs are batches of shape `(n_samples, n_features)`.
pub trait Classifier: Send + Sync {
    fn n_features(&self) -> usize;

    fn classes(&self) -> &[f64];

    /// Per-class probabilities, one row per sample, columns in `classes()` order.
    fn predict_proba(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>, InferenceError>;

    /// The most probable class label per sample.
    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>, InferenceError> {
        let proba = self.predict_proba(x)?;
        let classes = self.classes();
        Ok(proba
            .outer_iter()
            .map(|row| classes[argmax(row)])
            .collect())
    }
}

// First index wins on ties.
fn argmax(row: ArrayView1<'_, f64>) -> usize {
    let mut best = 0;
    for (i, value) in row.iter().enumerate() {
        if *value > row[best] {
            best = i;
        }
    }
    best
}

/// One fitted tree in flattened array form. Node 0 is the root; a split node
/// sends a sample left when `x[feature] <= threshold`.
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTree {
    children_left: Vec<i64>,
    children_right: Vec<i64>,
    feature: Vec<i64>,
    threshold: Vec<f64>,
    /// Per-node class weights; only leaf rows are read.
    value: Vec<Vec<f64>>,
}

impl DecisionTree {
    fn node_count(&self) -> usize {
        self.children_left.len()
    }

    fn validate(&self, index: usize, n_features: usize, n_classes: usize) -> Result<(), InferenceError> {
        let invalid = |msg: String| InferenceError::InvalidArtifact(format!("tree {}: {}", index, msg));
        let nodes = self.node_count();

        if nodes == 0 {
            return Err(invalid("has no nodes".into()));
        }
        if self.children_right.len() != nodes
            || self.feature.len() != nodes
            || self.threshold.len() != nodes
            || self.value.len() != nodes
        {
            return Err(invalid("node arrays have different lengths".into()));
        }

        for node in 0..nodes {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == LEAF {
                let weights = &self.value[node];
                if weights.len() != n_classes {
                    return Err(invalid(format!(
                        "leaf {} has {} class weights, expected {}",
                        node,
                        weights.len(),
                        n_classes
                    )));
                }
                if weights.iter().any(|w| !w.is_finite() || *w < 0.0) || weights.iter().sum::<f64>() <= 0.0 {
                    return Err(invalid(format!("leaf {} has no usable class weights", node)));
                }
                continue;
            }

            // Children always come after their parent, so traversal terminates.
            for child in [left, right] {
                if child <= node as i64 || child >= nodes as i64 {
                    return Err(invalid(format!("node {} has out-of-order child {}", node, child)));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= n_features {
                return Err(invalid(format!("node {} splits on unknown feature {}", node, feature)));
            }
        }
        Ok(())
    }

    fn leaf(&self, sample: ArrayView1<'_, f64>) -> usize {
        let mut node = 0;
        while self.children_left[node] != LEAF {
            let value = sample[self.feature[node] as usize];
            node = if value <= self.threshold[node] {
                self.children_left[node]
            } else {
                self.children_right[node]
            } as usize;
        }
        node
    }

    fn accumulate_proba(&self, sample: ArrayView1<'_, f64>, out: &mut ArrayViewMut1<'_, f64>) {
        let weights = &self.value[self.leaf(sample)];
        let total: f64 = weights.iter().sum();
        for (slot, weight) in out.iter_mut().zip(weights) {
            *slot += weight / total;
        }
    }
}

/// Random-forest classifier deserialized from a JSON artifact.
///
/// Probabilities are the mean of each tree's normalized leaf weights.
#[derive(Debug, Clone, Deserialize)]
pub struct RandomForest {
    n_features: usize,
    classes: Vec<f64>,
    estimators: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, InferenceError> {
        let forest: RandomForest = serde_json::from_slice(bytes)?;
        forest.validate()?;
        Ok(forest)
    }

    pub fn n_estimators(&self) -> usize {
        self.estimators.len()
    }

    fn validate(&self) -> Result<(), InferenceError> {
        if self.n_features == 0 {
            return Err(InferenceError::InvalidArtifact("n_features must be positive".into()));
        }
        if self.classes.len() < 2 {
            return Err(InferenceError::InvalidArtifact(format!(
                "expected at least 2 classes, found {}",
                self.classes.len()
            )));
        }
        if self.estimators.is_empty() {
            return Err(InferenceError::InvalidArtifact("forest has no trees".into()));
        }
        for (index, tree) in self.estimators.iter().enumerate() {
            tree.validate(index, self.n_features, self.classes.len())?;
        }
        Ok(())
    }
}

impl Classifier for RandomForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn classes(&self) -> &[f64] {
        &self.classes
    }

    fn predict_proba(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>, InferenceError> {
        if x.ncols() != self.n_features {
            return Err(InferenceError::FeatureCount {
                expected: self.n_features,
                actual: x.ncols(),
            });
        }

        let n_trees = self.estimators.len() as f64;
        let mut proba = Array2::zeros((x.nrows(), self.classes.len()));
        for (sample, mut row) in x.outer_iter().zip(proba.outer_iter_mut()) {
            for tree in &self.estimators {
                tree.accumulate_proba(sample, &mut row);
            }
            row.mapv_inplace(|p| p / n_trees);
        }
        Ok(proba)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use ndarray::array;
    use serde_json::json;

    /// A stump splitting on `feature` at `threshold`: left leaf is mostly
    /// class 0, right leaf mostly class 1.
    pub(crate) fn stump(feature: usize, threshold: f64, left: [f64; 2], right: [f64; 2]) -> serde_json::Value {
        json!({
            "children_left": [1, -1, -1],
            "children_right": [2, -1, -1],
            "feature": [feature, -2, -2],
            "threshold": [threshold, -2.0, -2.0],
            "value": [[1.0, 1.0], left, right],
        })
    }

    pub(crate) fn forest(n_features: usize, trees: Vec<serde_json::Value>) -> RandomForest {
        let artifact = json!({
            "n_features": n_features,
            "classes": [0.0, 1.0],
            "estimators": trees,
        });
        RandomForest::from_slice(&serde_json::to_vec(&artifact).unwrap()).unwrap()
    }

    #[test]
    fn single_stump_probabilities() {
        let model = forest(2, vec![stump(0, 5.0, [3.0, 1.0], [1.0, 4.0])]);
        let proba = model.predict_proba(array![[4.0, 0.0], [5.0, 0.0], [6.0, 0.0]].view()).unwrap();
        assert_eq!(proba, array![[0.75, 0.25], [0.75, 0.25], [0.2, 0.8]]);
    }

    #[test]
    fn forest_averages_tree_probabilities() {
        let model = forest(
            2,
            vec![
                stump(0, 5.0, [1.0, 0.0], [0.0, 1.0]),
                stump(1, 1.0, [1.0, 1.0], [0.0, 2.0]),
            ],
        );
        assert_eq!(model.n_estimators(), 2);
        let proba = model.predict_proba(array![[6.0, 0.0]].view()).unwrap();
        assert!((proba[[0, 1]] - 0.75).abs() < 1e-12);
        assert!((proba[[0, 0]] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn predict_returns_most_probable_class() {
        let model = forest(1, vec![stump(0, 0.5, [9.0, 1.0], [1.0, 9.0])]);
        let labels = model.predict(array![[0.0], [1.0]].view()).unwrap();
        assert_eq!(labels, array![0.0, 1.0]);
    }

    #[test]
    fn predict_breaks_ties_towards_first_class() {
        let model = forest(1, vec![stump(0, 0.5, [1.0, 1.0], [1.0, 1.0])]);
        assert_eq!(model.predict(array![[3.0]].view()).unwrap(), array![0.0]);
    }

    #[test]
    fn rejects_wrong_feature_count() {
        let model = forest(3, vec![stump(0, 0.5, [1.0, 0.0], [0.0, 1.0])]);
        let err = model.predict_proba(array![[1.0, 2.0]].view()).unwrap_err();
        assert!(matches!(err, InferenceError::FeatureCount { expected: 3, actual: 2 }));
    }

    #[test]
    fn rejects_malformed_artifacts() {
        let cases = [
            json!({ "n_features": 2, "classes": [0.0, 1.0], "estimators": [] }),
            json!({ "n_features": 2, "classes": [1.0], "estimators": [stump(0, 1.0, [1.0, 0.0], [0.0, 1.0])] }),
            json!({ "n_features": 1, "classes": [0.0, 1.0], "estimators": [stump(4, 1.0, [1.0, 0.0], [0.0, 1.0])] }),
            json!({ "n_features": 1, "classes": [0.0, 1.0], "estimators": [{
                "children_left": [0, -1, -1],
                "children_right": [2, -1, -1],
                "feature": [0, -2, -2],
                "threshold": [1.0, -2.0, -2.0],
                "value": [[1.0, 1.0], [1.0, 0.0], [0.0, 1.0]],
            }] }),
            json!({ "n_features": 1, "classes": [0.0, 1.0], "estimators": [{
                "children_left": [-1],
                "children_right": [-1],
                "feature": [-2],
                "threshold": [-2.0],
                "value": [[0.0, 0.0]],
            }] }),
        ];
        for artifact in cases {
            let err = RandomForest::from_slice(&serde_json::to_vec(&artifact).unwrap()).unwrap_err();
            assert!(matches!(err, InferenceError::InvalidArtifact(_)), "{artifact}: {err}");
        }
    }

    #[test]
    fn rejects_non_json() {
        let err = RandomForest::from_slice(b"\x80\x04\x95pickle").unwrap_err();
        assert!(matches!(err, InferenceError::Parse(_)));
    }
}
