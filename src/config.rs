//! Application configuration, loaded from a JSON file. Every section falls back to defaults.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Data directory (history file)
    pub data_dir: PathBuf,
    /// Path to the ONNX cycle-length regression model
    pub model_path: PathBuf,
    /// Optional hex SHA-256 the model artifact must match
    pub model_sha256: Option<String>,
    pub history: HistoryConfig,
    /// Forward projection of period dates
    pub projection: ProjectionConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// File name of the CSV log inside `data_dir`
    pub file_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Number of upcoming period dates shown after a prediction
    pub upcoming_periods: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .map(|d| d.join("cycle-predictor"))
            .unwrap_or_else(|| PathBuf::from(".cycle-predictor"));
        Self {
            data_dir,
            model_path: PathBuf::from("models/menstrual_model.onnx"),
            model_sha256: None,
            history: HistoryConfig::default(),
            projection: ProjectionConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            file_name: "cycle_history.csv".to_string(),
        }
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self { upcoming_periods: 4 }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load from JSON file if present; otherwise return default.
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(&self.history.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let c = AppConfig::load(Path::new("does-not-exist.json")).unwrap();
        assert_eq!(c.projection.upcoming_periods, 4);
        assert_eq!(c.history.file_name, "cycle_history.csv");
        assert!(c.model_sha256.is_none());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"data_dir": "/tmp/cp", "projection": {"upcoming_periods": 6}}"#)
            .unwrap();
        let c = AppConfig::load(&path).unwrap();
        assert_eq!(c.data_dir, PathBuf::from("/tmp/cp"));
        assert_eq!(c.projection.upcoming_periods, 6);
        assert_eq!(c.log.level, "info");
        assert_eq!(c.history_path(), PathBuf::from("/tmp/cp/cycle_history.csv"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(AppConfig::load(&path), Err(ConfigError::Parse { .. })));
    }
}
