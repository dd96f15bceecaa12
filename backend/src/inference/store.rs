use std::path::Path;

use sha2::{Digest, Sha256};
use shared::{Disease, ModelSummary};

use crate::config::ModelPaths;
use crate::inference::model::{Classifier, InferenceError, RandomForest};

/// A classifier together with the digest of the artifact it was read from.
pub struct LoadedModel {
    disease: Disease,
    sha256: String,
    n_estimators: usize,
    classifier: Box<dyn Classifier>,
}

impl LoadedModel {
    fn load(disease: Disease, path: &Path) -> Result<Self, InferenceError> {
        let bytes = std::fs::read(path).map_err(|source| InferenceError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let sha256 = hex::encode(Sha256::digest(&bytes));
        let forest = RandomForest::from_slice(&bytes)?;

        if forest.n_features() != disease.feature_count() {
            return Err(InferenceError::InvalidArtifact(format!(
                "{} expects {} features but the {} form produces {}",
                path.display(),
                forest.n_features(),
                disease,
                disease.feature_count()
            )));
        }

        log::info!(
            "Loaded {} model from {} ({} trees, {} features, sha256 {})",
            disease,
            path.display(),
            forest.n_estimators(),
            forest.n_features(),
            sha256
        );

        Ok(Self {
            disease,
            sha256,
            n_estimators: forest.n_estimators(),
            classifier: Box::new(forest),
        })
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            disease: self.disease,
            n_features: self.classifier.n_features(),
            n_estimators: self.n_estimators,
            sha256: self.sha256.clone(),
        }
    }
}

/// The three models, loaded once at startup and read-only afterwards.
pub struct ModelStore {
    diabetes: LoadedModel,
    heart: LoadedModel,
    parkinsons: LoadedModel,
}

impl ModelStore {
    /// Loads every artifact. Any missing or corrupt file fails the whole load.
    pub fn load(paths: &ModelPaths) -> Result<Self, InferenceError> {
        Ok(Self {
            diabetes: LoadedModel::load(Disease::Diabetes, &paths.diabetes)?,
            heart: LoadedModel::load(Disease::Heart, &paths.heart)?,
            parkinsons: LoadedModel::load(Disease::Parkinsons, &paths.parkinsons)?,
        })
    }

    pub fn get(&self, disease: Disease) -> &LoadedModel {
        match disease {
            Disease::Diabetes => &self.diabetes,
            Disease::Heart => &self.heart,
            Disease::Parkinsons => &self.parkinsons,
        }
    }

    pub fn classifier(&self, disease: Disease) -> &dyn Classifier {
        self.get(disease).classifier()
    }

    pub fn summaries(&self) -> Vec<ModelSummary> {
        Disease::all().map(|disease| self.get(disease).summary()).collect()
    }

    #[cfg(test)]
    pub(crate) fn from_classifiers(
        diabetes: Box<dyn Classifier>,
        heart: Box<dyn Classifier>,
        parkinsons: Box<dyn Classifier>,
    ) -> Self {
        let wrap = |disease: Disease, classifier: Box<dyn Classifier>| LoadedModel {
            disease,
            sha256: String::new(),
            n_estimators: 1,
            classifier,
        };
        Self {
            diabetes: wrap(Disease::Diabetes, diabetes),
            heart: wrap(Disease::Heart, heart),
            parkinsons: wrap(Disease::Parkinsons, parkinsons),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::model::tests::stump;
    use serde_json::json;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_forest(dir: &TempDir, name: &str, n_features: usize) -> PathBuf {
        let artifact = json!({
            "n_features": n_features,
            "classes": [0.0, 1.0],
            "estimators": [stump(0, 1.0, [1.0, 0.0], [0.0, 1.0])],
        });
        let path = dir.path().join(name);
        std::fs::write(&path, serde_json::to_vec(&artifact).unwrap()).unwrap();
        path
    }

    fn paths(dir: &TempDir) -> ModelPaths {
        ModelPaths {
            diabetes: write_forest(dir, "diabetes.json", 8),
            heart: write_forest(dir, "heart.json", 13),
            parkinsons: write_forest(dir, "parkinsons.json", 22),
        }
    }

    #[test]
    fn loads_all_three_models() {
        let dir = TempDir::new().unwrap();
        let store = ModelStore::load(&paths(&dir)).unwrap();

        let summaries = store.summaries();
        assert_eq!(summaries.len(), 3);
        assert_eq!(summaries[2].disease, Disease::Parkinsons);
        assert_eq!(summaries[2].n_features, 22);
        assert_eq!(summaries[0].sha256.len(), 64);
        assert_eq!(store.classifier(Disease::Heart).n_features(), 13);
    }

    #[test]
    fn bundled_models_load() {
        let store = ModelStore::load(&ModelPaths::default()).unwrap();
        for summary in store.summaries() {
            assert_eq!(summary.n_features, summary.disease.feature_count());
            assert!(summary.n_estimators >= 3);
        }
    }

    #[test]
    fn missing_file_fails_the_whole_load() {
        let dir = TempDir::new().unwrap();
        let mut paths = paths(&dir);
        paths.heart = dir.path().join("absent.json");

        let err = ModelStore::load(&paths).err().unwrap();
        assert!(matches!(err, InferenceError::Io { .. }));
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn corrupt_file_fails_the_whole_load() {
        let dir = TempDir::new().unwrap();
        let paths = paths(&dir);
        std::fs::write(&paths.parkinsons, b"not a model").unwrap();

        assert!(matches!(ModelStore::load(&paths), Err(InferenceError::Parse(_))));
    }

    #[test]
    fn schema_mismatch_fails_the_load() {
        let dir = TempDir::new().unwrap();
        let mut paths = paths(&dir);
        paths.diabetes = write_forest(&dir, "short.json", 7);

        let err = ModelStore::load(&paths).err().unwrap();
        assert!(matches!(err, InferenceError::InvalidArtifact(_)));
    }
}
