//! Shared utility functions.

use chrono::{DateTime, FixedOffset, TimeZone};

/// Formats an instant as `YYYY/MM/DD` in the given timezone.
pub fn format_update_date<Tz: TimeZone>(instant: &DateTime<Tz>, offset: FixedOffset) -> String {
    instant
        .with_timezone(&offset)
        .format("%Y/%m/%d")
        .to_string()
}

/// Builds a fixed offset from whole hours east of UTC.
///
/// Returns `None` outside the valid `-23..=23` range.
#[must_use]
pub fn offset_from_hours(hours: i32) -> Option<FixedOffset> {
    FixedOffset::east_opt(hours.checked_mul(3600)?)
}

/// Strips the `.esa.io` host suffix users commonly paste into the team name.
pub fn normalize_team_name(team: &str) -> String {
    team.trim().trim_end_matches(".esa.io").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_format_update_date_uses_offset() {
        // 15:30 UTC on March 31 is already April 1 in JST
        let instant = Utc.with_ymd_and_hms(2025, 3, 31, 15, 30, 0).unwrap();
        let jst = offset_from_hours(9).unwrap();
        assert_eq!(format_update_date(&instant, jst), "2025/04/01");
        assert_eq!(
            format_update_date(&instant, offset_from_hours(0).unwrap()),
            "2025/03/31"
        );
    }

    #[test]
    fn test_offset_from_hours_bounds() {
        assert_eq!(offset_from_hours(9).unwrap().local_minus_utc(), 9 * 3600);
        assert_eq!(offset_from_hours(-5).unwrap().local_minus_utc(), -5 * 3600);
        assert!(offset_from_hours(24).is_none());
        assert!(offset_from_hours(i32::MAX).is_none());
    }

    #[test]
    fn test_normalize_team_name() {
        assert_eq!(normalize_team_name("mylab.esa.io"), "mylab");
        assert_eq!(normalize_team_name(" mylab "), "mylab");
        assert_eq!(normalize_team_name("mylab"), "mylab");
    }
}
