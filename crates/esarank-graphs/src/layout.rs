//! Chart layout: category order, series heights, stack offsets, labels and titles.
//!
//! Layouts are plain data. The renderer draws them without further arithmetic
//! beyond axis scaling.

use crate::academic_year::AcademicYear;
use crate::aggregator::AggregatedCounts;
use crate::ranking::AuthorRanker;
use chrono::{DateTime, FixedOffset};
use esarank_common::utils::format_update_date;
use esarank_common::{RankingError, Result};
use serde::Serialize;
use tracing::debug;

/// Fraction of the tallest stack used as the gap between a stack and its total label.
pub const TOTAL_LABEL_MARGIN: f64 = 0.003;

/// A value label anchored at the bottom-center of its text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarLabel {
    /// Category index on the x axis.
    pub index: usize,
    /// Vertical anchor in data units.
    pub y: f64,
    /// Label text.
    pub text: String,
}

/// Bar chart for a single academic year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SingleYearLayout {
    /// Chart title.
    pub title: String,
    /// Year shown.
    pub year: AcademicYear,
    /// Author names in x-axis order.
    pub categories: Vec<String>,
    /// Bar heights, aligned with `categories`.
    pub values: Vec<u64>,
    /// Bar color.
    pub color: String,
    /// One label per non-zero bar.
    pub labels: Vec<BarLabel>,
}

/// One year's slice of a stacked chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackedSeries {
    /// Year drawn by this series.
    pub year: AcademicYear,
    /// Segment heights, aligned with the layout categories.
    pub values: Vec<u64>,
    /// Height each segment starts from.
    pub bottoms: Vec<u64>,
    /// Segment color.
    pub color: String,
}

/// Stacked bar chart across several academic years.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackedLayout {
    /// Chart title.
    pub title: String,
    /// Author names in x-axis order.
    pub categories: Vec<String>,
    /// Series from the oldest year (bottom) to the newest (top).
    pub series: Vec<StackedSeries>,
    /// Stack heights after every series is applied.
    pub totals: Vec<u64>,
    /// One label per stack with a positive total.
    pub labels: Vec<BarLabel>,
}

impl StackedLayout {
    /// Tallest stack, zero for an empty chart.
    #[must_use]
    pub fn max_total(&self) -> u64 {
        self.totals.iter().copied().max().unwrap_or(0)
    }
}

/// Builds both chart layouts from one set of counts and one clock reading.
#[derive(Debug, Clone)]
pub struct ChartLayoutBuilder {
    title_prefix: String,
    palette: Vec<String>,
    updated: String,
}

impl ChartLayoutBuilder {
    /// Creates a builder stamping titles with `updated_at` in its own timezone.
    ///
    /// Fails when `palette` is empty.
    pub fn new(
        title_prefix: impl Into<String>,
        palette: Vec<String>,
        updated_at: &DateTime<FixedOffset>,
    ) -> Result<Self> {
        if palette.is_empty() {
            return Err(RankingError::config("chart palette needs at least one color"));
        }
        Ok(Self {
            title_prefix: title_prefix.into(),
            palette,
            updated: format_update_date(updated_at, *updated_at.offset()),
        })
    }

    /// Color for the `index`-th series, wrapping around the palette.
    #[must_use]
    pub fn color_for(&self, index: usize) -> &str {
        &self.palette[index % self.palette.len()]
    }

    /// Ranking of `year` as a plain bar chart.
    ///
    /// Fails with a lookup error when `year` was not aggregated.
    pub fn single_year(&self, counts: &AggregatedCounts, year: AcademicYear) -> Result<SingleYearLayout> {
        let ranked = AuthorRanker::rank_by_year(counts, year)?;

        let labels = ranked
            .iter()
            .enumerate()
            .filter(|(_, r)| r.count > 0)
            .map(|(index, r)| BarLabel {
                index,
                y: r.count as f64,
                text: r.count.to_string(),
            })
            .collect();

        let (categories, values): (Vec<String>, Vec<u64>) =
            ranked.into_iter().map(|r| (r.name, r.count)).unzip();

        Ok(SingleYearLayout {
            title: format!("{} {year} / updated: {}", self.title_prefix, self.updated),
            year,
            categories,
            values,
            color: self.color_for(0).to_string(),
            labels,
        })
    }

    /// Ranking by total over `years`, stacked oldest year at the bottom.
    ///
    /// `years` is newest first, as produced by
    /// [`AcademicYearCalculator::target_years`](crate::AcademicYearCalculator::target_years).
    /// Every year must have been aggregated.
    pub fn stacked(&self, counts: &AggregatedCounts, years: &[AcademicYear]) -> Result<StackedLayout> {
        let (Some(&min), Some(&max)) = (years.iter().min(), years.iter().max()) else {
            return Err(RankingError::config("stacked chart needs at least one year"));
        };
        if let Some(&missing) = years.iter().find(|&&y| !counts.contains_year(y)) {
            return Err(RankingError::lookup(missing));
        }

        let ranked = AuthorRanker::rank_by_total(counts, years);
        let categories: Vec<String> = ranked.iter().map(|r| r.name.clone()).collect();

        let mut offsets = vec![0u64; categories.len()];
        let series: Vec<StackedSeries> = years
            .iter()
            .rev()
            .enumerate()
            .map(|(i, &year)| {
                let values: Vec<u64> = categories
                    .iter()
                    .map(|name| counts.count(year, name))
                    .collect();
                let bottoms = offsets.clone();
                for (offset, value) in offsets.iter_mut().zip(&values) {
                    *offset += value;
                }
                StackedSeries {
                    year,
                    values,
                    bottoms,
                    color: self.color_for(i).to_string(),
                }
            })
            .collect();

        let totals: Vec<u64> = ranked.iter().map(|r| r.count).collect();
        debug_assert_eq!(offsets, totals);

        let margin = totals.iter().copied().max().unwrap_or(0) as f64 * TOTAL_LABEL_MARGIN;
        let labels = totals
            .iter()
            .enumerate()
            .filter(|&(_, &total)| total > 0)
            .map(|(index, &total)| BarLabel {
                index,
                y: total as f64 + margin,
                text: total.to_string(),
            })
            .collect();

        debug!(
            categories = categories.len(),
            series = series.len(),
            "Built stacked layout"
        );

        Ok(StackedLayout {
            title: format!(
                "{} {min}-{max} / updated: {}",
                self.title_prefix, self.updated
            ),
            categories,
            series,
            totals,
            labels,
        })
    }
}
