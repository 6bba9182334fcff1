use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ai::{MinimaxConfig, QLearningConfig};
use crate::error::ConfigError;
use crate::training::TrainerConfig;

/// Top-level application configuration, loaded from a TOML file. Every
/// section and field is optional and falls back to its default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: MinimaxConfig,
    pub qlearning: QLearningConfig,
    pub training: TrainerConfig,
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` when it exists, otherwise fall back to defaults. Parse
    /// and validation failures in an existing file still surface.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(AppConfig::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.search.epsilon) {
            return Err(ConfigError::Validation(
                "search.epsilon must be within [0, 1]".into(),
            ));
        }
        if self.search.depth == 0 {
            return Err(ConfigError::Validation(
                "search.depth must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.qlearning.epsilon) {
            return Err(ConfigError::Validation(
                "qlearning.epsilon must be within [0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.qlearning.alpha) {
            return Err(ConfigError::Validation(
                "qlearning.alpha must be within [0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.qlearning.gamma) {
            return Err(ConfigError::Validation(
                "qlearning.gamma must be within [0, 1]".into(),
            ));
        }
        if self.training.num_episodes == 0 {
            return Err(ConfigError::Validation(
                "training.num_episodes must be at least 1".into(),
            ));
        }
        if self.training.max_moves_per_episode == 0 {
            return Err(ConfigError::Validation(
                "training.max_moves_per_episode must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        AppConfig::default().validate().unwrap();
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [qlearning]
            alpha = 0.2

            [training]
            num_episodes = 42
            "#,
        )
        .unwrap();
        assert_eq!(config.qlearning.alpha, 0.2);
        assert_eq!(config.training.num_episodes, 42);
        assert_eq!(config.search.depth, MinimaxConfig::default().depth);
        assert_eq!(config.qlearning.gamma, QLearningConfig::default().gamma);
    }

    #[test]
    fn test_rejects_out_of_range_epsilon() {
        let mut config = AppConfig::default();
        config.qlearning.epsilon = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_depth() {
        let mut config = AppConfig::default();
        config.search.depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_errors() {
        assert!(matches!(
            AppConfig::load("definitely/not/here.toml"),
            Err(ConfigError::FileRead { .. })
        ));
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let config = AppConfig::load_or_default("definitely/not/here.toml").unwrap();
        assert_eq!(
            config.training.num_episodes,
            TrainerConfig::default().num_episodes
        );
    }

    #[test]
    fn test_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let written = AppConfig::default();
        fs::write(&path, toml::to_string(&written).unwrap()).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.search.depth, written.search.depth);
        assert_eq!(loaded.training.model_path, written.training.model_path);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[search]\nepsilon = 2.0\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));
    }
}
