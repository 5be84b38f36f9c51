//! Per-year, per-author post counting.

use crate::academic_year::{AcademicYear, AcademicYearCalculator};
use esarank_common::PostCollection;
use indexmap::IndexMap;
use tracing::{debug, instrument};

/// Post counts keyed by academic year, then author.
///
/// A missing author entry means zero. Years keep the order they were requested in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedCounts {
    years: IndexMap<AcademicYear, IndexMap<String, u64>>,
}

impl AggregatedCounts {
    /// Empty counts with an entry for every year in `years`.
    pub fn with_years(years: &[AcademicYear]) -> Self {
        Self {
            years: years.iter().map(|&year| (year, IndexMap::new())).collect(),
        }
    }

    /// Adds one post for `author` in `year`.
    pub fn increment(&mut self, year: AcademicYear, author: &str) {
        let by_author = self.years.entry(year).or_default();
        match by_author.get_mut(author) {
            Some(count) => *count += 1,
            None => {
                by_author.insert(author.to_string(), 1);
            }
        }
    }

    /// Records an explicit count, creating the year if needed.
    pub fn set(&mut self, year: AcademicYear, author: impl Into<String>, count: u64) {
        self.years
            .entry(year)
            .or_default()
            .insert(author.into(), count);
    }

    /// Author counts for `year`, if the year was aggregated.
    #[must_use]
    pub fn year(&self, year: AcademicYear) -> Option<&IndexMap<String, u64>> {
        self.years.get(&year)
    }

    /// Count for `author` in `year`; zero when either is absent.
    #[must_use]
    pub fn count(&self, year: AcademicYear, author: &str) -> u64 {
        self.year(year)
            .and_then(|by_author| by_author.get(author))
            .copied()
            .unwrap_or(0)
    }

    /// Whether `year` has an entry.
    #[must_use]
    pub fn contains_year(&self, year: AcademicYear) -> bool {
        self.years.contains_key(&year)
    }

    /// Aggregated years in request order.
    pub fn years(&self) -> impl Iterator<Item = AcademicYear> + '_ {
        self.years.keys().copied()
    }
}

/// Counts posts per author for a set of academic years.
#[derive(Debug, Clone, Copy)]
pub struct PostAggregator<'a> {
    calculator: &'a AcademicYearCalculator,
}

impl<'a> PostAggregator<'a> {
    /// Creates an aggregator classifying with `calculator`.
    pub const fn new(calculator: &'a AcademicYearCalculator) -> Self {
        Self { calculator }
    }

    /// Counts every post against every target year independently.
    ///
    /// Every target year is present in the result, even when nobody posted in it.
    #[instrument(skip(self, collection), fields(authors = collection.authors.len()))]
    pub fn count_by_year(
        &self,
        collection: &PostCollection,
        target_years: &[AcademicYear],
    ) -> AggregatedCounts {
        let mut counts = AggregatedCounts::with_years(target_years);
        let mut unmatched = 0usize;

        for (author, post) in collection.posts() {
            let mut matched = false;
            for &year in target_years {
                if self.calculator.in_year(&post.created_at, year) {
                    counts.increment(year, author);
                    matched = true;
                }
            }
            if !matched {
                unmatched += 1;
            }
        }

        debug!(unmatched, "Posts outside the target years");
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use esarank_common::test_utils::{
        collection_from, jst, jst_instant, posts_in_year, reference_collection,
    };

    fn calculator() -> AcademicYearCalculator {
        AcademicYearCalculator::new(jst(), jst_instant(2024, 10, 1, 9, 0, 0).with_timezone(&Utc))
    }

    #[test]
    fn test_reference_scenario() {
        let calc = calculator();
        let counts = PostAggregator::new(&calc).count_by_year(&reference_collection(), &[2024, 2023]);

        assert_eq!(counts.count(2024, "A"), 5);
        assert_eq!(counts.count(2024, "B"), 3);
        assert_eq!(counts.count(2023, "A"), 2);
        assert_eq!(counts.year(2023).unwrap().len(), 1);
        assert!(counts.year(2023).unwrap().get("B").is_none());
    }

    #[test]
    fn test_every_target_year_present() {
        let calc = calculator();
        let counts = PostAggregator::new(&calc).count_by_year(&reference_collection(), &[2024, 2023, 2022]);

        let years: Vec<i32> = counts.years().collect();
        assert_eq!(years, vec![2024, 2023, 2022]);
        assert!(counts.year(2022).unwrap().is_empty());
    }

    #[test]
    fn test_posts_outside_targets_are_ignored() {
        let calc = calculator();
        let collection = collection_from(&[("old", posts_in_year(2010, 4))]);
        let counts = PostAggregator::new(&calc).count_by_year(&collection, &[2024]);
        assert_eq!(counts.count(2024, "old"), 0);
        assert!(counts.year(2024).unwrap().is_empty());
    }

    #[test]
    fn test_zero_post_author_tolerated() {
        let calc = calculator();
        let collection = collection_from(&[("idle", vec![]), ("busy", posts_in_year(2024, 1))]);
        let counts = PostAggregator::new(&calc).count_by_year(&collection, &[2024]);
        assert_eq!(counts.count(2024, "busy"), 1);
        assert!(counts.year(2024).unwrap().get("idle").is_none());
    }

    #[test]
    fn test_repeated_year_double_counts() {
        let calc = calculator();
        let collection = collection_from(&[("A", posts_in_year(2024, 2))]);
        let counts = PostAggregator::new(&calc).count_by_year(&collection, &[2024, 2024]);
        assert_eq!(counts.count(2024, "A"), 4);
    }

    #[test]
    fn test_idempotent() {
        let calc = calculator();
        let aggregator = PostAggregator::new(&calc);
        let collection = reference_collection();
        let first = aggregator.count_by_year(&collection, &[2024, 2023, 2022]);
        let second = aggregator.count_by_year(&collection, &[2024, 2023, 2022]);
        assert_eq!(first, second);
    }
}
