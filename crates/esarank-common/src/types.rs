//! Data model shared by the loaders, the aggregation core and the renderer.

use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single authored post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Post title.
    pub title: String,
    /// Creation instant, always carrying its UTC offset.
    pub created_at: DateTime<FixedOffset>,
    /// Source URL.
    pub url: String,
    /// Number assigned by the knowledge base.
    pub post_number: u64,
}

/// An author and the posts they own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Display name, unique within a collection.
    pub screen_name: String,
    /// Post count as reported by the source.
    pub post_count: u64,
    /// Posts in source order.
    pub posts: Vec<Post>,
}

impl Author {
    /// Creates an author whose reported count is derived from `posts`.
    pub fn from_posts(screen_name: impl Into<String>, posts: Vec<Post>) -> Self {
        Self {
            screen_name: screen_name.into(),
            post_count: posts.len() as u64,
            posts,
        }
    }
}

/// Top-level container: every author keyed by name, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostCollection {
    /// Number of authors reported by the source.
    pub total_authors: usize,
    /// Authors keyed by screen name.
    pub authors: IndexMap<String, Author>,
}

impl PostCollection {
    /// Builds a collection from authors, keeping their order and deriving `total_authors`.
    ///
    /// A later author with an already-seen name replaces the earlier one in place.
    pub fn from_authors(authors: impl IntoIterator<Item = Author>) -> Self {
        let authors: IndexMap<String, Author> = authors
            .into_iter()
            .map(|author| (author.screen_name.clone(), author))
            .collect();
        Self {
            total_authors: authors.len(),
            authors,
        }
    }

    /// Looks an author up by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Author> {
        self.authors.get(name)
    }

    /// Total number of posts across every author.
    #[must_use]
    pub fn post_total(&self) -> usize {
        self.authors.values().map(|a| a.posts.len()).sum()
    }

    /// Iterates over every `(author name, post)` pair.
    pub fn posts(&self) -> impl Iterator<Item = (&str, &Post)> {
        self.authors
            .iter()
            .flat_map(|(name, author)| author.posts.iter().map(move |post| (name.as_str(), post)))
    }

    /// Whether the collection has no authors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }
}
