//! Fiscal-year classification.
//!
//! Academic year `Y` runs from April 1 of `Y` 00:00:00 to March 31 of `Y + 1`
//! 23:59:59 in the reference timezone, both ends inclusive.

use chrono::{DateTime, Datelike, FixedOffset, TimeZone, Utc};
use esarank_common::Clock;

/// Academic year label: the calendar year in which it starts.
pub type AcademicYear = i32;

/// Classifies instants into academic years relative to one clock reading.
#[derive(Debug, Clone, Copy)]
pub struct AcademicYearCalculator {
    offset: FixedOffset,
    now: DateTime<FixedOffset>,
}

impl AcademicYearCalculator {
    /// Creates a calculator for the reference timezone `offset` and the reading `now`.
    pub fn new(offset: FixedOffset, now: DateTime<Utc>) -> Self {
        Self {
            offset,
            now: now.with_timezone(&offset),
        }
    }

    /// Creates a calculator from a single reading of `clock`.
    pub fn from_clock(offset: FixedOffset, clock: &dyn Clock) -> Self {
        Self::new(offset, clock.now())
    }

    /// Reference timezone.
    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// The clock reading, in the reference timezone.
    #[must_use]
    pub const fn now(&self) -> DateTime<FixedOffset> {
        self.now
    }

    /// The academic year containing "now".
    #[must_use]
    pub fn current_year(&self) -> AcademicYear {
        fiscal_year(self.now.year(), self.now.month())
    }

    /// `[current, current - 1, ..., current - lookback]`, newest first.
    #[must_use]
    pub fn target_years(&self, lookback: u32) -> Vec<AcademicYear> {
        let current = self.current_year();
        (0..=lookback)
            .filter_map(|back| i32::try_from(back).ok())
            .map(|back| current - back)
            .collect()
    }

    /// The academic year an instant belongs to.
    #[must_use]
    pub fn year_of(&self, instant: &DateTime<FixedOffset>) -> AcademicYear {
        let local = instant.with_timezone(&self.offset);
        fiscal_year(local.year(), local.month())
    }

    /// First and last second of `year`, or `None` if the year is out of chrono's range.
    #[must_use]
    pub fn year_bounds(
        &self,
        year: AcademicYear,
    ) -> Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
        let start = self.offset.with_ymd_and_hms(year, 4, 1, 0, 0, 0).single()?;
        let end = self
            .offset
            .with_ymd_and_hms(year.checked_add(1)?, 3, 31, 23, 59, 59)
            .single()?;
        Some((start, end))
    }

    /// Whether `instant` falls inside `year`, compared at whole-second precision.
    #[must_use]
    pub fn in_year(&self, instant: &DateTime<FixedOffset>, year: AcademicYear) -> bool {
        self.year_bounds(year).map_or(false, |(start, end)| {
            let t = instant.timestamp();
            start.timestamp() <= t && t <= end.timestamp()
        })
    }
}

const fn fiscal_year(calendar_year: i32, month: u32) -> AcademicYear {
    if month <= 3 {
        calendar_year - 1
    } else {
        calendar_year
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use esarank_common::test_utils::{jst, jst_instant, utc_instant};
    use esarank_common::FixedClock;
    use proptest::prelude::*;

    fn calculator_at(year: i32, month: u32, day: u32) -> AcademicYearCalculator {
        let now = jst_instant(year, month, day, 12, 0, 0).with_timezone(&Utc);
        AcademicYearCalculator::new(jst(), now)
    }

    #[test]
    fn test_current_year_around_april() {
        assert_eq!(calculator_at(2025, 3, 31).current_year(), 2024);
        assert_eq!(calculator_at(2025, 4, 1).current_year(), 2025);
        assert_eq!(calculator_at(2025, 1, 1).current_year(), 2024);
        assert_eq!(calculator_at(2024, 12, 31).current_year(), 2024);
    }

    #[test]
    fn test_current_year_uses_reference_timezone() {
        // 16:00 UTC on March 31 is already April 1 in UTC+9
        let clock = FixedClock(utc_instant(2025, 3, 31, 16, 0, 0));
        let calc = AcademicYearCalculator::from_clock(jst(), &clock);
        assert_eq!(calc.current_year(), 2025);

        let utc = FixedOffset::east_opt(0).unwrap();
        let calc = AcademicYearCalculator::from_clock(utc, &clock);
        assert_eq!(calc.current_year(), 2024);
    }

    #[test]
    fn test_target_years() {
        let calc = calculator_at(2024, 10, 1);
        assert_eq!(calc.target_years(2), vec![2024, 2023, 2022]);
        assert_eq!(calc.target_years(0), vec![2024]);
    }

    #[test]
    fn test_inclusive_boundaries() {
        let calc = calculator_at(2024, 10, 1);
        assert!(calc.in_year(&jst_instant(2024, 4, 1, 0, 0, 0), 2024));
        assert!(calc.in_year(&jst_instant(2025, 3, 31, 23, 59, 59), 2024));
        assert!(!calc.in_year(&jst_instant(2025, 4, 1, 0, 0, 0), 2024));
        assert!(!calc.in_year(&jst_instant(2024, 3, 31, 23, 59, 59), 2024));
        assert!(calc.in_year(&jst_instant(2025, 4, 1, 0, 0, 0), 2025));
    }

    #[test]
    fn test_boundaries_in_other_offsets() {
        let calc = calculator_at(2024, 10, 1);
        // 2024-03-31T15:00:00Z is April 1 00:00 in UTC+9
        let utc = FixedOffset::east_opt(0).unwrap();
        let start = utc.with_ymd_and_hms(2024, 3, 31, 15, 0, 0).unwrap();
        assert!(calc.in_year(&start, 2024));
        assert!(!calc.in_year(&(start - Duration::seconds(1)), 2024));
    }

    #[test]
    fn test_sub_second_instant_on_last_second() {
        let calc = calculator_at(2024, 10, 1);
        let last = jst_instant(2025, 3, 31, 23, 59, 59) + Duration::milliseconds(500);
        assert!(calc.in_year(&last, 2024));
        assert_eq!(calc.year_of(&last), 2024);
    }

    #[test]
    fn test_year_bounds() {
        let calc = calculator_at(2024, 10, 1);
        let (start, end) = calc.year_bounds(2023).unwrap();
        assert_eq!(start, jst_instant(2023, 4, 1, 0, 0, 0));
        assert_eq!(end, jst_instant(2024, 3, 31, 23, 59, 59));
        assert!(calc.year_bounds(i32::MAX).is_none());
    }

    proptest! {
        #[test]
        fn prop_current_year_follows_month(year in 1990i32..2100, month in 1u32..=12, day in 1u32..=28) {
            let calc = calculator_at(year, month, day);
            let expected = if month <= 3 { year - 1 } else { year };
            prop_assert_eq!(calc.current_year(), expected);
        }

        #[test]
        fn prop_year_of_agrees_with_in_year(secs in 0i64..4_000_000_000) {
            let calc = calculator_at(2024, 10, 1);
            let instant = DateTime::from_timestamp(secs, 0).unwrap().with_timezone(&jst());
            let year = calc.year_of(&instant);
            prop_assert!(calc.in_year(&instant, year));
            prop_assert!(!calc.in_year(&instant, year - 1));
            prop_assert!(!calc.in_year(&instant, year + 1));
        }
    }
}
