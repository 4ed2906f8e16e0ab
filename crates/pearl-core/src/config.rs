use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ai::GenerationOptions;
use crate::error::ConfigError;
use crate::prompt::DEFAULT_INSTRUCTION_PREFIX;

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama3";

/// What to do with a submission that arrives while a request is outstanding
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// Ignore the new submission
    #[default]
    Reject,
    /// Cancel the outstanding request and send the new one
    Supersede,
}

/// Deployment configuration. Read once at startup, never written back.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub model: String,
    pub instruction_prefix: String,
    pub options: Option<GenerationOptions>,
    pub request_timeout_secs: Option<u64>,
    pub overlap_policy: OverlapPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            instruction_prefix: DEFAULT_INSTRUCTION_PREFIX.to_string(),
            options: Some(GenerationOptions {
                temperature: Some(0.5),
                num_predict: Some(100),
                top_k: None,
                top_p: None,
            }),
            request_timeout_secs: None,
            overlap_policy: OverlapPolicy::default(),
        }
    }

    /// Load from the default location, falling back to defaults when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&config_content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn get_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("pearl").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::new());
        assert_eq!(config.model, "llama3");
        assert_eq!(config.overlap_policy, OverlapPolicy::Reject);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"model": "llama3.2", "overlap_policy": "supersede", "request_timeout_secs": 30}}"#
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.model, "llama3.2");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.overlap_policy, OverlapPolicy::Supersede);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.instruction_prefix, DEFAULT_INSTRUCTION_PREFIX);
    }

    #[test]
    fn test_options_can_be_disabled() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"options": null}}"#).unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.options, None);
    }

    #[test]
    fn test_invalid_json_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
