//! Allow-list filtering and author grouping.

use esarank_common::{Author, PostCollection};
use indexmap::{IndexMap, IndexSet};
use std::fmt;
use tracing::{debug, warn};

/// Names from the allow-list that the collection does not contain.
///
/// Not an error: filtering continues with the authors that were found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialDataWarning {
    /// Missing names, in allow-list order.
    pub missing: Vec<String>,
}

impl fmt::Display for PartialDataWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} allow-listed author(s) not found: {}",
            self.missing.len(),
            self.missing.join(", ")
        )
    }
}

/// Result of [`AuthorFilter::filter`].
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    /// Retained authors, in allow-list order.
    pub collection: PostCollection,
    /// Present when some names were not found.
    pub warning: Option<PartialDataWarning>,
}

/// Group name to resolved authors, both in definition order.
pub type GroupedAuthors<'a> = IndexMap<String, Vec<&'a Author>>;

/// Restricts, reorders and partitions a collection by author name.
pub struct AuthorFilter;

impl AuthorFilter {
    /// Keeps only the listed authors, in list order.
    ///
    /// Duplicate names are kept once. Unknown names are logged and reported in
    /// the outcome's warning.
    pub fn filter<S: AsRef<str>>(collection: &PostCollection, names: &[S]) -> FilterOutcome {
        let wanted: IndexSet<&str> = names.iter().map(AsRef::as_ref).collect();

        let mut missing = Vec::new();
        let mut authors = Vec::with_capacity(wanted.len());
        for name in wanted {
            match collection.get(name) {
                Some(author) => authors.push(author.clone()),
                None => missing.push(name.to_string()),
            }
        }

        let warning = (!missing.is_empty()).then(|| PartialDataWarning { missing });
        if let Some(warning) = &warning {
            warn!(missing = ?warning.missing, "{warning}");
        }

        let collection = PostCollection::from_authors(authors);
        debug!(retained = collection.total_authors, "Filtered authors");
        FilterOutcome {
            collection,
            warning,
        }
    }

    /// Resolves each group's members against the collection.
    ///
    /// Unknown members are dropped from the group without a warning.
    pub fn group<'a>(
        collection: &'a PostCollection,
        groups: &IndexMap<String, Vec<String>>,
    ) -> GroupedAuthors<'a> {
        groups
            .iter()
            .map(|(group, members)| {
                let resolved: Vec<&Author> = members
                    .iter()
                    .filter_map(|name| {
                        let author = collection.get(name);
                        if author.is_none() {
                            debug!(%group, member = %name, "Dropping unknown group member");
                        }
                        author
                    })
                    .collect();
                (group.clone(), resolved)
            })
            .collect()
    }
}
