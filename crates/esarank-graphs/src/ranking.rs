//! Author rankings derived from aggregated counts.

use crate::academic_year::AcademicYear;
use crate::aggregator::AggregatedCounts;
use esarank_common::{RankingError, Result};
use indexmap::IndexSet;
use serde::Serialize;

/// One ranked entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedAuthor {
    /// Author name.
    pub name: String,
    /// Post count the ranking is ordered by.
    pub count: u64,
}

impl RankedAuthor {
    fn new(name: impl Into<String>, count: u64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// Orders authors by post count.
///
/// Higher counts come first; equal counts are ordered by name, byte-wise ascending.
pub struct AuthorRanker;

impl AuthorRanker {
    /// Ranks the authors recorded for `year`.
    ///
    /// Fails with a lookup error when `year` was not aggregated.
    pub fn rank_by_year(counts: &AggregatedCounts, year: AcademicYear) -> Result<Vec<RankedAuthor>> {
        let by_author = counts.year(year).ok_or(RankingError::lookup(year))?;
        let mut ranked: Vec<RankedAuthor> = by_author
            .iter()
            .map(|(name, &count)| RankedAuthor::new(name.as_str(), count))
            .collect();
        sort_ranked(&mut ranked);
        Ok(ranked)
    }

    /// Ranks every author recorded in any of `years` by their summed count.
    ///
    /// Years that were not aggregated contribute nothing. Authors with an explicit
    /// zero entry are kept.
    #[must_use]
    pub fn rank_by_total(counts: &AggregatedCounts, years: &[AcademicYear]) -> Vec<RankedAuthor> {
        let authors: IndexSet<&str> = years
            .iter()
            .filter_map(|&year| counts.year(year))
            .flat_map(|by_author| by_author.keys().map(String::as_str))
            .collect();

        let mut ranked: Vec<RankedAuthor> = authors
            .into_iter()
            .map(|name| {
                let total = years.iter().map(|&year| counts.count(year, name)).sum();
                RankedAuthor::new(name, total)
            })
            .collect();
        sort_ranked(&mut ranked);
        ranked
    }
}

fn sort_ranked(ranked: &mut [RankedAuthor]) {
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pairs(ranked: &[RankedAuthor]) -> Vec<(&str, u64)> {
        ranked.iter().map(|r| (r.name.as_str(), r.count)).collect()
    }

    fn reference_counts() -> AggregatedCounts {
        let mut counts = AggregatedCounts::with_years(&[2024, 2023]);
        counts.set(2024, "A", 5);
        counts.set(2024, "B", 3);
        counts.set(2023, "A", 2);
        counts
    }

    #[test]
    fn test_rank_by_year() {
        let ranked = AuthorRanker::rank_by_year(&reference_counts(), 2024).unwrap();
        assert_eq!(pairs(&ranked), vec![("A", 5), ("B", 3)]);
    }

    #[test]
    fn test_rank_by_year_missing_year() {
        let err = AuthorRanker::rank_by_year(&reference_counts(), 2019).unwrap_err();
        assert!(matches!(err, RankingError::Lookup { year: 2019 }));
    }

    #[test]
    fn test_rank_by_total() {
        let ranked = AuthorRanker::rank_by_total(&reference_counts(), &[2024, 2023]);
        assert_eq!(pairs(&ranked), vec![("A", 7), ("B", 3)]);
    }

    #[test]
    fn test_ties_break_by_name() {
        let mut counts = AggregatedCounts::with_years(&[2024]);
        counts.set(2024, "suzuki", 2);
        counts.set(2024, "abe", 2);
        counts.set(2024, "Zeta", 2);
        counts.set(2024, "kato", 4);

        let ranked = AuthorRanker::rank_by_year(&counts, 2024).unwrap();
        assert_eq!(
            pairs(&ranked),
            vec![("kato", 4), ("Zeta", 2), ("abe", 2), ("suzuki", 2)]
        );
    }

    #[test]
    fn test_explicit_zero_is_ranked() {
        let mut counts = AggregatedCounts::with_years(&[2024, 2023]);
        counts.set(2023, "ghost", 0);
        counts.set(2024, "A", 1);

        let ranked = AuthorRanker::rank_by_total(&counts, &[2024, 2023]);
        assert_eq!(pairs(&ranked), vec![("A", 1), ("ghost", 0)]);
    }

    #[test]
    fn test_rank_by_total_only_considers_given_years() {
        let counts = reference_counts();
        let ranked = AuthorRanker::rank_by_total(&counts, &[2023]);
        assert_eq!(pairs(&ranked), vec![("A", 2)]);
        assert!(AuthorRanker::rank_by_total(&counts, &[2010]).is_empty());
    }

    proptest! {
        #[test]
        fn prop_total_is_sum_over_years(
            entries in prop::collection::vec((0usize..3, 0usize..6, 0u64..20), 0..40)
        ) {
            let years = [2024, 2023, 2022];
            let mut counts = AggregatedCounts::with_years(&years);
            for (y, a, c) in &entries {
                counts.set(years[*y], format!("author{a}"), *c);
            }

            let ranked = AuthorRanker::rank_by_total(&counts, &years);
            for entry in &ranked {
                let expected: u64 = years.iter().map(|&y| counts.count(y, &entry.name)).sum();
                prop_assert_eq!(entry.count, expected);
            }
            for pair in ranked.windows(2) {
                prop_assert!(
                    pair[0].count > pair[1].count
                        || (pair[0].count == pair[1].count && pair[0].name < pair[1].name)
                );
            }
        }
    }
}
