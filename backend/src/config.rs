use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub models: ModelPaths,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub frontend_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8081,
            frontend_dir: project_root().join("frontend/dist"),
        }
    }
}

/// Artifact locations, one per flow.
#[derive(Debug, Clone)]
pub struct ModelPaths {
    pub diabetes: PathBuf,
    pub heart: PathBuf,
    pub parkinsons: PathBuf,
}

impl Default for ModelPaths {
    fn default() -> Self {
        let models = project_root().join("models");
        Self {
            diabetes: models.join("diabetes_model_rf.json"),
            heart: models.join("heart_model002_rf.json"),
            parkinsons: models.join("parkinsons001_model_rf.json"),
        }
    }
}

/// On-disk layout of `app.yaml`. Model paths stay optional so that only the
/// ones written in the file are resolved against its directory.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    server: ServerConfig,
    models: ModelEntries,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ModelEntries {
    diabetes: Option<PathBuf>,
    heart: Option<PathBuf>,
    parkinsons: Option<PathBuf>,
}

impl ModelEntries {
    fn resolve(self, base: &Path) -> ModelPaths {
        let relative_to_file = |path: PathBuf| {
            if path.is_relative() { base.join(path) } else { path }
        };
        let defaults = ModelPaths::default();
        ModelPaths {
            diabetes: self.diabetes.map_or(defaults.diabetes, relative_to_file),
            heart: self.heart.map_or(defaults.heart, relative_to_file),
            parkinsons: self.parkinsons.map_or(defaults.parkinsons, relative_to_file),
        }
    }
}

// Workspace root when launched through cargo, otherwise the working directory.
fn project_root() -> PathBuf {
    match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(manifest_dir) => PathBuf::from(manifest_dir).join(".."),
        Err(_) => PathBuf::from("."),
    }
}

fn default_config_path() -> PathBuf {
    project_root().join("config/app.yaml")
}

impl AppConfig {
    /// Reads `APP_CONFIG` (or the default path) and applies environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("APP_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_config_path());
        let mut config = Self::from_file_or_default(&path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// A missing file yields the defaults; an unreadable or invalid one is an error.
    /// Relative model paths in the file are taken from the file's own directory.
    pub fn from_file_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::warn!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let config_str = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let file: ConfigFile = serde_yaml::from_str(&config_str)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        log::info!("Loaded config from {}", path.display());
        Ok(Self {
            server: file.server,
            models: file.models.resolve(base),
        })
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidValue { key: "PORT", value: port.clone() })?;
        }
        if let Some(dir) = lookup("FRONTEND_DIR") {
            self.server.frontend_dir = PathBuf::from(dir);
        }
        if let Some(path) = lookup("DIABETES_MODEL") {
            self.models.diabetes = PathBuf::from(path);
        }
        if let Some(path) = lookup("HEART_MODEL") {
            self.models.heart = PathBuf::from(path);
        }
        if let Some(path) = lookup("PARKINSONS_MODEL") {
            self.models.parkinsons = PathBuf::from(path);
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
