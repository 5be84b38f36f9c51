//! Error types and utilities for esarank

use thiserror::Error;

/// Result type alias for esarank operations
pub type Result<T> = std::result::Result<T, RankingError>;

/// Main error type for esarank operations
#[derive(Error, Debug)]
pub enum RankingError {
    /// A required parameter is missing or invalid
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Malformed input collection (snapshot or API payload)
    #[error("Data format error: {message}")]
    DataFormat {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A requested academic year is absent from the aggregated counts
    #[error("Lookup error: academic year {year} is not present in the aggregated counts")]
    Lookup { year: i32 },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Network related errors (HTTP requests, etc.)
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// esa.io API related errors
    #[error("esa API error: {message}")]
    EsaApi {
        message: String,
        status_code: Option<u16>,
    },

    /// Chart rendering errors
    #[error("Graph error: {message}")]
    Graph {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl RankingError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new data format error
    pub fn data_format(msg: impl Into<String>) -> Self {
        Self::DataFormat {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new data format error with source
    pub fn data_format_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::DataFormat {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new lookup error for a missing academic year
    #[must_use]
    pub const fn lookup(year: i32) -> Self {
        Self::Lookup { year }
    }

    /// Create a new network error with source
    pub fn network_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Network {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new esa API error with status code
    pub fn esa_with_status(msg: impl Into<String>, status: u16) -> Self {
        Self::EsaApi {
            message: msg.into(),
            status_code: Some(status),
        }
    }

    /// Create a new graph error
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new graph error with source
    pub fn graph_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Graph {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether a request that failed with this error is worth repeating.
    ///
    /// Transport failures and 5xx responses are retried; 4xx responses are not.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::EsaApi { status_code, .. } => status_code.map_or(false, |s| s >= 500),
            _ => false,
        }
    }

    /// Whether this error should abort before any aggregation happens.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

// Error conversion implementations for external types

/// Convert from `reqwest::Error` to `RankingError`
impl From<reqwest::Error> for RankingError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network_with_source("Request timeout", err)
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err)
        } else if err.is_decode() {
            Self::data_format_with_source("Malformed API response", err)
        } else if let Some(status) = err.status() {
            Self::network_with_source(format!("HTTP error: {}", status.as_u16()), err)
        } else {
            Self::network_with_source("Network request failed", err)
        }
    }
}

/// Convert from `serde_yaml::Error` to `RankingError`
impl From<serde_yaml::Error> for RankingError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::config_with_source("YAML parsing error", err)
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to `RankingError`
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for RankingError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::graph_with_source("Graph rendering failed", err)
    }
}
