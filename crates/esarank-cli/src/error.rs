//! Application-wide error types using thiserror.

use esarank_common::RankingError;
use esarank_config::ConfigError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A pipeline stage failed.
    #[error(transparent)]
    Ranking(#[from] RankingError),

    /// The async runtime could not be started.
    #[error("Runtime error: {0}")]
    Runtime(#[source] std::io::Error),
}

impl CliError {
    /// Whether the run failed before any data was read.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        match self {
            Self::Config(_) => true,
            Self::Ranking(err) => err.is_config(),
            Self::Runtime(_) => false,
        }
    }
}

/// Result type for the command-line application.
pub type CliResult<T> = Result<T, CliError>;
