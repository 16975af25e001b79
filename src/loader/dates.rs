use chrono::{NaiveDate, NaiveDateTime};

/// Formats tried in order against the `date` column. Bout logs collected
/// from different sources mix ISO dates, US slash dates, and spelled-out
/// month forms; month always comes before day in the ambiguous cases.
/// The two-digit-year form sits before the four-digit forms because
/// chrono accepts short years for `%Y`, which would swallow "6/5/21" as
/// the year 6 or 21.
pub const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
];

/// Timestamp form occasionally produced by spreadsheet exports.
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Try every supported format against one raw date value. Empty and
/// unrecognized values both come back as `None`; the loader drops and
/// counts those rows rather than failing the load.
pub fn parse_flexible(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    NaiveDateTime::parse_from_str(trimmed, DATETIME_FORMAT)
        .map(|stamp| stamp.date())
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_flexible("2021-01-01"), Some(date(2021, 1, 1)));
        assert_eq!(parse_flexible("2021/06/15"), Some(date(2021, 6, 15)));
    }

    #[test]
    fn parses_us_slash_dates_month_first() {
        assert_eq!(parse_flexible("06/15/2021"), Some(date(2021, 6, 15)));
        assert_eq!(parse_flexible("6/5/21"), Some(date(2021, 6, 5)));
    }

    #[test]
    fn parses_textual_month_forms() {
        assert_eq!(parse_flexible("Jun 15, 2021"), Some(date(2021, 6, 15)));
        assert_eq!(parse_flexible("June 15, 2021"), Some(date(2021, 6, 15)));
        assert_eq!(parse_flexible("15 Jun 2021"), Some(date(2021, 6, 15)));
    }

    #[test]
    fn parses_export_timestamps() {
        assert_eq!(
            parse_flexible("2021-06-15 18:30:00"),
            Some(date(2021, 6, 15))
        );
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(parse_flexible("  2021-01-01  "), Some(date(2021, 1, 1)));
    }

    #[test]
    fn rejects_garbage_and_empty_values() {
        assert_eq!(parse_flexible(""), None);
        assert_eq!(parse_flexible("   "), None);
        assert_eq!(parse_flexible("TBD"), None);
        assert_eq!(parse_flexible("2021-13-45"), None);
    }
}
