//! End-to-end checks of the aggregation core on fixed scenarios.

use chrono::Utc;
use esarank_common::test_utils::{collection_from, jst, jst_instant, posts_in_year, reference_collection};
use esarank_common::FixedClock;
use esarank_graphs::{
    AcademicYearCalculator, AuthorFilter, AuthorRanker, ChartLayoutBuilder, PostAggregator,
};

fn calculator() -> AcademicYearCalculator {
    let clock = FixedClock(jst_instant(2024, 11, 20, 9, 30, 0).with_timezone(&Utc));
    AcademicYearCalculator::from_clock(jst(), &clock)
}

fn palette() -> Vec<String> {
    vec!["#4c72b0".into(), "#dd8453".into(), "#55a868".into()]
}

#[test]
fn test_two_author_two_year_scenario() {
    let calc = calculator();
    let years = calc.target_years(1);
    assert_eq!(years, vec![2024, 2023]);

    let counts = PostAggregator::new(&calc).count_by_year(&reference_collection(), &years);
    assert_eq!(counts.count(2024, "A"), 5);
    assert_eq!(counts.count(2024, "B"), 3);
    assert_eq!(counts.count(2023, "A"), 2);
    assert_eq!(counts.count(2023, "B"), 0);

    let totals: Vec<(String, u64)> = AuthorRanker::rank_by_total(&counts, &years)
        .into_iter()
        .map(|r| (r.name, r.count))
        .collect();
    assert_eq!(totals, vec![("A".to_string(), 7), ("B".to_string(), 3)]);

    let builder = ChartLayoutBuilder::new("Survey ranking", palette(), &calc.now()).unwrap();
    let stacked = builder.stacked(&counts, &years).unwrap();
    assert_eq!(stacked.categories, vec!["A", "B"]);
    assert_eq!(stacked.series[0].year, 2023);
    assert_eq!(stacked.series[0].values, vec![2, 0]);
    assert_eq!(stacked.series[1].year, 2024);
    assert_eq!(stacked.series[1].values, vec![5, 3]);
    assert_eq!(stacked.totals, vec![7, 3]);
    assert_eq!(
        stacked.title,
        "Survey ranking 2023-2024 / updated: 2024/11/20"
    );

    let single = builder.single_year(&counts, calc.current_year()).unwrap();
    assert_eq!(single.title, "Survey ranking 2024 / updated: 2024/11/20");
    assert_eq!(single.values, vec![5, 3]);
}

#[test]
fn test_allow_list_scenario() {
    let collection = collection_from(&[("A", posts_in_year(2024, 2)), ("B", posts_in_year(2024, 4))]);

    let outcome = AuthorFilter::filter(&collection, &["C", "A"]);
    let names: Vec<&String> = outcome.collection.authors.keys().collect();
    assert_eq!(names, vec!["A"]);
    assert_eq!(outcome.warning.unwrap().missing, vec!["C"]);

    let calc = calculator();
    let counts = PostAggregator::new(&calc).count_by_year(&outcome.collection, &[2024]);
    let ranked = AuthorRanker::rank_by_year(&counts, 2024).unwrap();
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].name, "A");
}

#[test]
fn test_single_and_stacked_orders_differ() {
    // B leads this year, A leads overall
    let mut a_posts = posts_in_year(2024, 1);
    a_posts.extend(posts_in_year(2022, 6));
    let collection = collection_from(&[("A", a_posts), ("B", posts_in_year(2024, 3))]);

    let calc = calculator();
    let years = calc.target_years(2);
    let counts = PostAggregator::new(&calc).count_by_year(&collection, &years);
    let builder = ChartLayoutBuilder::new("Survey ranking", palette(), &calc.now()).unwrap();

    let single = builder.single_year(&counts, 2024).unwrap();
    let stacked = builder.stacked(&counts, &years).unwrap();
    assert_eq!(single.categories, vec!["B", "A"]);
    assert_eq!(stacked.categories, vec!["A", "B"]);
    assert_eq!(stacked.series.len(), 3);
    assert_eq!(stacked.series[0].year, 2022);
}

#[test]
fn test_fiscal_year_boundary_posts() {
    let collection = collection_from(&[(
        "edge",
        vec![
            jst_instant(2024, 3, 31, 23, 59, 59),
            jst_instant(2024, 4, 1, 0, 0, 0),
        ],
    )]);
    let calc = calculator();
    let counts = PostAggregator::new(&calc).count_by_year(&collection, &[2024, 2023]);
    assert_eq!(counts.count(2024, "edge"), 1);
    assert_eq!(counts.count(2023, "edge"), 1);
}
