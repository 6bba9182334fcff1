use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading or saving a learned value table.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read model file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse model file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to write model file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize model: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failures during a training run.
#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

/// Failures while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_error_display() {
        let err = ModelError::NotFound(PathBuf::from("models/kuba.json"));
        assert_eq!(err.to_string(), "model file not found: models/kuba.json");
    }

    #[test]
    fn test_config_validation_display() {
        let err = ConfigError::Validation("epsilon must be within [0, 1]".into());
        assert_eq!(
            err.to_string(),
            "invalid config: epsilon must be within [0, 1]"
        );
    }

    #[test]
    fn test_training_error_wraps_model_error() {
        let inner = ModelError::NotFound(PathBuf::from("x.json"));
        let err = TrainingError::from(inner);
        assert!(err.to_string().contains("model file not found"));
    }
}
