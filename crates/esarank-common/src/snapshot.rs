//! JSON snapshot persistence for post collections.

use crate::error::{RankingError, Result};
use crate::types::PostCollection;
use std::{fs, io, path::Path};
use tracing::{debug, info};

/// Parses a snapshot document.
///
/// Syntax errors and missing keys both surface as data format errors.
pub fn parse_snapshot(content: &str) -> Result<PostCollection> {
    let collection: PostCollection = serde_json::from_str(content).map_err(|e| {
        let reason = if e.is_data() {
            "Snapshot is missing required keys or has wrong value types"
        } else {
            "Snapshot is not valid JSON"
        };
        RankingError::data_format_with_source(reason, e)
    })?;

    debug!(
        authors = collection.authors.len(),
        posts = collection.post_total(),
        "Parsed snapshot"
    );
    Ok(collection)
}

/// Loads a snapshot from a JSON file.
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<PostCollection> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| with_path(e, path))?;
    let collection = parse_snapshot(&content)?;
    info!(
        path = %path.display(),
        authors = collection.total_authors,
        "Loaded post snapshot"
    );
    Ok(collection)
}

/// Writes a snapshot as pretty-printed UTF-8 JSON.
pub fn save_snapshot(collection: &PostCollection, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let content = serde_json::to_string_pretty(collection)?;
    fs::write(path, content).map_err(|e| with_path(e, path))?;
    info!(path = %path.display(), "Saved post snapshot");
    Ok(())
}

pub(crate) fn with_path(err: io::Error, path: &Path) -> RankingError {
    RankingError::Io(io::Error::new(
        err.kind(),
        format!("{}: {err}", path.display()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Author, Post};
    use chrono::DateTime;

    const SNAPSHOT: &str = r#"{
        "total_authors": 2,
        "authors": {
            "yamada": {
                "screen_name": "yamada",
                "post_count": 1,
                "posts": [
                    {
                        "title": "Attention Is All You Need",
                        "created_at": "2024-04-01T00:00:00+09:00",
                        "url": "https://lab.esa.io/posts/12",
                        "post_number": 12
                    }
                ]
            },
            "abe": { "screen_name": "abe", "post_count": 0, "posts": [] }
        }
    }"#;

    #[test]
    fn test_parse_snapshot() {
        let collection = parse_snapshot(SNAPSHOT).unwrap();
        assert_eq!(collection.total_authors, 2);
        let keys: Vec<&String> = collection.authors.keys().collect();
        assert_eq!(keys, vec!["yamada", "abe"]);

        let post = &collection.get("yamada").unwrap().posts[0];
        assert_eq!(post.post_number, 12);
        assert_eq!(post.created_at.offset().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn test_missing_top_level_key_is_data_format_error() {
        let err = parse_snapshot(r#"{"authors": {}}"#).unwrap_err();
        assert!(matches!(err, RankingError::DataFormat { .. }));
    }

    #[test]
    fn test_missing_post_key_is_data_format_error() {
        let doc = r#"{"total_authors": 1, "authors": {"abe": {
            "screen_name": "abe", "post_count": 1,
            "posts": [{"title": "x", "url": "u", "post_number": 1}]
        }}}"#;
        let err = parse_snapshot(doc).unwrap_err();
        assert!(matches!(err, RankingError::DataFormat { .. }));
    }

    #[test]
    fn test_invalid_json_is_data_format_error() {
        let err = parse_snapshot("{ not json").unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn test_missing_file_mentions_path() {
        let err = load_snapshot("/nonexistent/esarank/posts.json").unwrap_err();
        assert!(matches!(err, RankingError::Io(_)));
        assert!(err.to_string().contains("/nonexistent/esarank/posts.json"));
    }

    #[test]
    fn test_save_then_load_keeps_non_ascii() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("author_stats.json");
        let collection = PostCollection::from_authors(vec![Author::from_posts(
            "山田",
            vec![Post {
                title: "サーベイ".to_string(),
                created_at: DateTime::parse_from_rfc3339("2023-10-01T09:00:00+09:00").unwrap(),
                url: "https://lab.esa.io/posts/3".to_string(),
                post_number: 3,
            }],
        )]);

        save_snapshot(&collection, &path).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("サーベイ"));
        assert_eq!(load_snapshot(&path).unwrap(), collection);
    }
}
