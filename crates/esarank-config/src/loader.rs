//! Configuration loading: a YAML file overlaid with environment variables, optionally read from `.env`.

use crate::schema::Config;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Environment variable naming an optional YAML configuration file.
pub const CONFIG_PATH_VAR: &str = "ESARANK_CONFIG";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading a configuration file
    #[error("Failed to read configuration file '{path}': {source}")]
    IoError {
        /// File that could not be read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        /// Variable name
        var: String,
        /// Underlying parse error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Missing required configuration
    #[error("Missing required configuration: {0} is not set")]
    MissingConfig(String),

    /// A value is present but unusable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for esarank_common::RankingError {
    fn from(err: ConfigError) -> Self {
        esarank_common::RankingError::config_with_source(err.to_string(), err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory is read first when present; variables
    /// already set in the process take precedence over it. The YAML file at
    /// `config_path`, or else the one named by `ESARANK_CONFIG`, provides the base
    /// values; otherwise defaults are used.
    pub fn load_from(config_path: Option<&Path>) -> Result<Config, ConfigError> {
        match dotenv::dotenv() {
            Ok(path) => debug!(path = %path.display(), "Loaded .env file"),
            Err(e) if e.not_found() => debug!("No .env file found"),
            Err(e) => {
                return Err(ConfigError::EnvParseError {
                    var: ".env".to_string(),
                    source: Box::new(e),
                })
            }
        }

        match config_path {
            Some(path) => {
                let mut config = Self::load_from_file(path)?;
                Self::apply_env_overrides(&mut config, |var| env::var(var).ok())?;
                Ok(config)
            }
            None => Self::load_with(|var| env::var(var).ok()),
        }
    }

    /// Load configuration using `lookup` to resolve environment variables.
    pub fn load_with<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_PATH_VAR) {
            Some(path) if !path.trim().is_empty() => Self::load_from_file(path.trim())?,
            _ => Config::default(),
        };

        Self::apply_env_overrides(&mut config, &lookup)?;
        Ok(config)
    }

    /// Load configuration from a YAML file, without environment overrides.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Read configuration file");
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML text. Omitted keys keep their defaults.
    pub fn from_yaml_str(content: &str) -> Result<Config, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        // Paths
        if let Some(path) = get("JSON_PATH") {
            config.paths.input_json = Some(PathBuf::from(path));
        }
        if let Some(path) = get("ESA_RANKING") {
            config.paths.ranking_output = Some(PathBuf::from(path));
        }
        if let Some(path) = get("ESA_RANKING_ALL") {
            config.paths.ranking_all_output = Some(PathBuf::from(path));
        }
        if let Some(path) = get("YAML_PATH") {
            config.paths.author_list = Some(PathBuf::from(path));
        }

        // Academic years
        if let Some(value) = get("ESARANK_LOOKBACK") {
            config.ranking.lookback = parse_var("ESARANK_LOOKBACK", &value)?;
        }
        if let Some(value) = get("ESARANK_UTC_OFFSET_HOURS") {
            config.ranking.utc_offset_hours = parse_var("ESARANK_UTC_OFFSET_HOURS", &value)?;
        }

        // esa.io
        if let Some(token) = get("ESA_ACCESS_TOKEN") {
            config.esa.access_token = Some(token);
        }
        if let Some(team) = get("ESA_TEAM_NAME") {
            config.esa.team_name = Some(team);
        }
        if let Some(category) = get("ESA_CATEGORY") {
            config.esa.category = category;
        }

        // Logging
        if let Some(level) = get("ESARANK_LOG").or_else(|| get("RUST_LOG")) {
            config.logging.level = level;
        }

        Ok(())
    }
}

fn parse_var<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::EnvParseError {
            var: var.to_string(),
            source: Box::new(e),
        })
}
