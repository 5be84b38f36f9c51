//! # esarank Graphs
//!
//! Academic-year bucketing, per-author aggregation, ranking and chart layout,
//! plus the plotters renderer that draws the two ranking charts.
//!
//! Everything up to [`layout`] is pure computation over an in-memory
//! [`PostCollection`](esarank_common::PostCollection); only [`source`] and
//! [`renderer`] touch the outside world.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod academic_year;
pub mod aggregator;
pub mod filter;
pub mod layout;
pub mod ranking;
pub mod renderer;
pub mod source;

pub use academic_year::{AcademicYear, AcademicYearCalculator};
pub use aggregator::{AggregatedCounts, PostAggregator};
pub use filter::{AuthorFilter, FilterOutcome, GroupedAuthors, PartialDataWarning};
pub use layout::{BarLabel, ChartLayoutBuilder, SingleYearLayout, StackedLayout, StackedSeries};
pub use ranking::{AuthorRanker, RankedAuthor};
pub use renderer::{parse_color, ChartRenderer, ChartStyle};
pub use source::{EsaSource, PostSource, SnapshotSource};
