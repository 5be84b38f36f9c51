//! Author allow-list file (`YAML_PATH`).
//!
//! ```yaml
//! valid_users:
//!   - suzuki
//!   - tanaka
//! groups:
//!   staff: [suzuki]
//!   students: [tanaka, sato]
//! ```

use crate::loader::ConfigError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Ordered allow-list and optional author groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorListConfig {
    /// Authors to keep, in display order. `None` keeps everyone.
    pub valid_users: Option<Vec<String>>,
    /// Named groups of authors, in definition order.
    pub groups: Option<IndexMap<String, Vec<String>>>,
}

impl AuthorListConfig {
    /// Read an author list file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        let list = Self::from_yaml_str(&content)?;
        debug!(
            path = %path.display(),
            users = list.valid_users.as_ref().map_or(0, Vec::len),
            groups = list.groups.as_ref().map_or(0, IndexMap::len),
            "Loaded author list"
        );
        Ok(list)
    }

    /// Parse an author list from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// True when the file restricts nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.valid_users.is_none() && self.groups.is_none()
    }
}
