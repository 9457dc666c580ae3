//! Bootstrap configuration loading
//!
//! Configuration source priority:
//! 1. Explicit path (command-line argument or SYLLABUS_CONFIG environment variable)
//! 2. User config file (`~/.config/syllabus-expander/config.toml`)
//! 3. Built-in defaults
//!
//! A missing file at priority 2 is not an error. A file that exists but does
//! not parse is always an error.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "syllabus-expander";

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "SYLLABUS_CONFIG";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Interface the HTTP server binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Fixed random seed for every request (optional)
    ///
    /// Leave unset in production so generated syllabi vary between runs.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Pipeline tuning
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Pipeline tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Keywords requested from the phrase extractor
    #[serde(default = "default_keyword_count")]
    pub keyword_count: usize,

    /// Maximum distinct topics distributed over modules
    #[serde(default = "default_max_topics")]
    pub max_topics: usize,

    /// Sample questions generated per module
    #[serde(default = "default_questions_per_module")]
    pub questions_per_module: usize,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_keyword_count() -> usize {
    20
}

fn default_max_topics() -> usize {
    15
}

fn default_questions_per_module() -> usize {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            seed: None,
            pipeline: PipelineConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            keyword_count: default_keyword_count(),
            max_topics: default_max_topics(),
            questions_per_module: default_questions_per_module(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Read config {} failed: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Reject values the pipeline cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.pipeline.keyword_count == 0 {
            return Err(Error::Config("pipeline.keyword_count must be at least 1".to_string()));
        }
        if self.pipeline.max_topics == 0 {
            return Err(Error::Config("pipeline.max_topics must be at least 1".to_string()));
        }
        if self.pipeline.questions_per_module == 0 {
            return Err(Error::Config(
                "pipeline.questions_per_module must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Resolve and load the bootstrap configuration
///
/// `explicit_path` comes from the command line (clap also reads
/// [`CONFIG_ENV_VAR`] into it). When absent, the user config file is used if
/// it exists, otherwise built-in defaults.
pub fn load_config(explicit_path: Option<&Path>) -> Result<TomlConfig> {
    // Priority 1: explicit path, must exist
    if let Some(path) = explicit_path {
        info!("Loading configuration from {}", path.display());
        return TomlConfig::from_file(path);
    }

    // Priority 2: user config file, optional
    if let Some(path) = default_config_path() {
        if path.exists() {
            info!("Loading configuration from {}", path.display());
            return TomlConfig::from_file(&path);
        }
        debug!("No config file at {}", path.display());
    }

    // Priority 3: built-in defaults
    info!("No configuration file found, using built-in defaults");
    Ok(TomlConfig::default())
}

/// Platform default config file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TomlConfig::default();
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.port, 5000);
        assert_eq!(config.seed, None);
        assert_eq!(config.pipeline.questions_per_module, 5);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config, TomlConfig::default());
    }

    #[test]
    fn test_zero_questions_rejected() {
        let err = TomlConfig::from_toml_str("[pipeline]\nquestions_per_module = 0\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
