//! Test utilities and shared fixtures for esarank.
//!
//! Available to other crates through the `testing` feature.

use crate::types::{Author, Post, PostCollection};
use chrono::{DateTime, FixedOffset, TimeZone, Utc};

/// The reference timezone used throughout the fixtures (UTC+9).
pub fn jst() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).expect("UTC+9 is a valid offset")
}

/// A JST instant.
pub fn jst_instant(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    min: u32,
    sec: u32,
) -> DateTime<FixedOffset> {
    jst()
        .with_ymd_and_hms(year, month, day, hour, min, sec)
        .single()
        .expect("fixture instant must be valid")
}

/// A UTC instant, handy for clock readings.
pub fn utc_instant(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
        .single()
        .expect("fixture instant must be valid")
}

/// A post created at the given instant.
pub fn post_at(post_number: u64, created_at: DateTime<FixedOffset>) -> Post {
    Post {
        title: format!("Survey #{post_number}"),
        created_at,
        url: format!("https://lab.esa.io/posts/{post_number}"),
        post_number,
    }
}

/// Builds a collection from `(author, creation instants)` pairs, numbering posts sequentially.
pub fn collection_from(authors: &[(&str, Vec<DateTime<FixedOffset>>)]) -> PostCollection {
    let mut number = 0;
    PostCollection::from_authors(authors.iter().map(|(name, instants)| {
        let posts = instants
            .iter()
            .map(|instant| {
                number += 1;
                post_at(number, *instant)
            })
            .collect();
        Author::from_posts(*name, posts)
    }))
}

/// `count` posts spread over the first days of May of fiscal year `year`.
pub fn posts_in_year(year: i32, count: u32) -> Vec<DateTime<FixedOffset>> {
    (0..count)
        .map(|i| jst_instant(year, 5, 1 + i % 28, 12, 0, 0))
        .collect()
}

/// The collection from the reference scenario: A has 5 posts in FY2024 and 2 in FY2023,
/// B has 3 in FY2024.
pub fn reference_collection() -> PostCollection {
    let mut a_posts = posts_in_year(2024, 5);
    a_posts.extend(posts_in_year(2023, 2));
    collection_from(&[("A", a_posts), ("B", posts_in_year(2024, 3))])
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}
