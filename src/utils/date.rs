//! Date string parsing and ordering.
//!
//! Records carry date strings verbatim (`2020/11/11` style); parsing is only
//! for ordering posts and validating `updated >= date`.

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use std::time::SystemTime;

/// Accepted date string layouts, tried in order.
const DATE_FORMATS: &[&str] = &["%Y/%m/%d", "%Y-%m-%d"];

/// Parse a date string in any accepted layout.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .ok_or_else(|| anyhow!("Invalid date `{text}` (expected YYYY/MM/DD or YYYY-MM-DD)"))
}

/// Sort key for reverse-chronological ordering.
///
/// Unparseable dates sort last so one bad post does not hide the rest.
pub fn sort_key(text: &str) -> NaiveDate {
    parse_date(text).unwrap_or(NaiveDate::MIN)
}

/// Format a filesystem timestamp as `YYYY/MM/DD`.
///
/// Used as the page date when front matter supplies none.
pub fn from_system_time(time: SystemTime) -> String {
    let datetime: chrono::DateTime<chrono::Local> = time.into();
    datetime.format("%Y/%m/%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_slash_format() {
        let date = parse_date("2020/11/11").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2020, 11, 11).unwrap());
    }

    #[test]
    fn test_parse_date_unpadded() {
        // Single-digit month/day, as real front matter writes them
        let date = parse_date("2020/12/7").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2020, 12, 7).unwrap());
    }

    #[test]
    fn test_parse_date_dash_format() {
        let date = parse_date("2025-01-15").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
    }

    #[test]
    fn test_parse_date_trims_whitespace() {
        assert!(parse_date(" 2020/11/11 ").is_ok());
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(parse_date("11/11/2020").is_err());
        assert!(parse_date("2020/13/01").is_err());
        assert!(parse_date("not a date").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_sort_key_invalid_sorts_last() {
        let good = sort_key("2020/11/11");
        let bad = sort_key("garbage");

        // Reverse-chronological order puts MIN at the end
        assert!(bad < good);
        assert_eq!(bad, NaiveDate::MIN);
    }

    #[test]
    fn test_from_system_time_epoch() {
        let formatted = from_system_time(std::time::UNIX_EPOCH);
        // Local offset may shift the day around 1970-01-01
        assert!(formatted.starts_with("1970/01/") || formatted.starts_with("1969/12/"));
    }
}
