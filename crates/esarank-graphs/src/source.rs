//! Where the post collection comes from.

use async_trait::async_trait;
use esarank_common::{
    load_snapshot, save_snapshot, EsaClient, PostCollection, RankingError, Result,
};
use std::{io, path::PathBuf};
use tracing::{info, instrument};

/// Produces the post collection a run works on.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Loads the complete collection into memory.
    async fn load(&self) -> Result<PostCollection>;

    /// Short human-readable description for logs.
    fn describe(&self) -> String;
}

/// Reads a JSON snapshot from disk.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    /// Source backed by the snapshot at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PostSource for SnapshotSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<PostCollection> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || load_snapshot(path))
            .await
            .map_err(|e| RankingError::Io(io::Error::new(io::ErrorKind::Other, e)))?
    }

    fn describe(&self) -> String {
        format!("snapshot {}", self.path.display())
    }
}

/// Fetches posts from the esa.io API, optionally saving them as a snapshot.
#[derive(Debug, Clone)]
pub struct EsaSource {
    client: EsaClient,
    save_to: Option<PathBuf>,
}

impl EsaSource {
    /// Source backed by `client`.
    pub const fn new(client: EsaClient) -> Self {
        Self {
            client,
            save_to: None,
        }
    }

    /// Also write the fetched collection to `path`.
    #[must_use]
    pub fn saving_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_to = Some(path.into());
        self
    }
}

#[async_trait]
impl PostSource for EsaSource {
    #[instrument(skip(self))]
    async fn load(&self) -> Result<PostCollection> {
        let collection = self.client.fetch_collection().await?;
        if let Some(path) = &self.save_to {
            save_snapshot(&collection, path)?;
            info!(path = %path.display(), "Saved fetched posts");
        }
        Ok(collection)
    }

    fn describe(&self) -> String {
        let config = self.client.config();
        format!("esa team {} category {}", config.team_name, config.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esarank_common::test_utils::reference_collection;
    use esarank_common::EsaConfig;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_snapshot_source_loads_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("author_stats.json");
        save_snapshot(&reference_collection(), &path).unwrap();

        let source = SnapshotSource::new(&path);
        let collection = source.load().await.unwrap();

        assert_eq!(collection, reference_collection());
        assert!(source.describe().contains("author_stats.json"));
    }

    #[tokio::test]
    async fn test_snapshot_source_missing_file() {
        let dir = tempdir().unwrap();
        let source = SnapshotSource::new(dir.path().join("missing.json"));
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, RankingError::Io(_)));
    }

    #[test]
    fn test_esa_source_describe() {
        let client = EsaClient::new(EsaConfig::new("mylab.esa.io", "token")).unwrap();
        let source = EsaSource::new(client).saving_to("snapshot.json");
        assert_eq!(source.describe(), "esa team mylab category Survey");
    }
}
