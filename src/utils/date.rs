//! Date parsing and formatting for post metadata.
//!
//! CMS dates arrive as loosely formatted strings. Everything is normalized
//! to UTC; a string that does not parse yields `None` and callers decide how
//! to degrade (empty display string, "now" for feeds, etc).

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Accepted layouts for naive (zone-less) datetimes, tried in order.
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

/// UTC datetime wrapper with the formats the site needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DateTimeUtc(DateTime<Utc>);

impl DateTimeUtc {
    #[cfg(test)]
    pub const fn new(inner: DateTime<Utc>) -> Self {
        Self(inner)
    }

    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Parse RFC 3339, naive datetimes (treated as UTC), `YYYY-MM-DD`
    /// or RFC 2822.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self(dt.with_timezone(&Utc)));
        }

        for fmt in NAIVE_DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(Self(dt.and_utc()));
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return date.and_hms_opt(0, 0, 0).map(|dt| Self(dt.and_utc()));
        }

        DateTime::parse_from_rfc2822(s)
            .ok()
            .map(|dt| Self(dt.with_timezone(&Utc)))
    }

    /// Human display format, e.g. `Jan 15, 2024`.
    pub fn to_display(self) -> String {
        self.0.format("%b %d, %Y").to_string()
    }

    /// RFC 2822 in GMT, e.g. `Mon, 15 Jan 2024 10:30:45 GMT`.
    pub fn to_rfc2822(self) -> String {
        self.0.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
    }

    /// Date-only form used by sitemaps, e.g. `2024-01-15`.
    pub fn to_ymd(self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }

    /// Rendering for the `DateTime` rich-text component.
    ///
    /// `iso` is `2025-06-01`, `utc` is `Sun, 01 Jun 2025 12:00:00 GMT+00:00`,
    /// and `local` or no format is the US short date `06/01/2025`.
    pub fn to_embed_format(self, format: Option<&str>) -> String {
        let layout = match format {
            Some("iso") => "%Y-%m-%d",
            Some("utc") => "%a, %d %b %Y %H:%M:%S GMT+00:00",
            _ => "%m/%d/%Y",
        };
        self.0.format(layout).to_string()
    }

    /// Milliseconds since the epoch, for sorting.
    pub fn timestamp_millis(self) -> i64 {
        self.0.timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339() {
        let dt = DateTimeUtc::parse("2024-01-15T10:30:45Z").unwrap();
        assert_eq!(dt.to_rfc2822(), "Mon, 15 Jan 2024 10:30:45 GMT");
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let dt = DateTimeUtc::parse("2024-01-15T10:30:45+02:00").unwrap();
        assert_eq!(dt.to_rfc2822(), "Mon, 15 Jan 2024 08:30:45 GMT");
    }

    #[test]
    fn test_parse_millis_utc() {
        let dt = DateTimeUtc::parse("2024-06-15T14:30:45.123Z").unwrap();
        assert_eq!(dt.to_ymd(), "2024-06-15");
    }

    #[test]
    fn test_parse_naive_datetime() {
        let dt = DateTimeUtc::parse("2024-06-15T14:30:45").unwrap();
        assert_eq!(dt.to_rfc2822(), "Sat, 15 Jun 2024 14:30:45 GMT");
    }

    #[test]
    fn test_parse_date_only() {
        let dt = DateTimeUtc::parse("2024-12-25").unwrap();
        assert_eq!(dt.to_display(), "Dec 25, 2024");
        assert_eq!(dt.to_ymd(), "2024-12-25");
    }

    #[test]
    fn test_parse_rfc2822() {
        let dt = DateTimeUtc::parse("Mon, 15 Jan 2024 10:30:45 GMT").unwrap();
        assert_eq!(dt.to_ymd(), "2024-01-15");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(DateTimeUtc::parse("").is_none());
        assert!(DateTimeUtc::parse("   ").is_none());
        assert!(DateTimeUtc::parse("not a date").is_none());
        assert!(DateTimeUtc::parse("2024-13-01").is_none());
        assert!(DateTimeUtc::parse("2023-02-29").is_none());
    }

    #[test]
    fn test_display_zero_padded_day() {
        let dt = DateTimeUtc::parse("2024-03-05").unwrap();
        assert_eq!(dt.to_display(), "Mar 05, 2024");
    }

    #[test]
    fn test_embed_formats() {
        let dt = DateTimeUtc::parse("2025-06-01T12:00:00Z").unwrap();
        assert_eq!(dt.to_embed_format(Some("iso")), "2025-06-01");
        assert_eq!(dt.to_embed_format(Some("utc")), "Sun, 01 Jun 2025 12:00:00 GMT+00:00");
        assert_eq!(dt.to_embed_format(Some("local")), "06/01/2025");
        assert_eq!(dt.to_embed_format(None), "06/01/2025");
        assert_eq!(dt.to_embed_format(Some("unknown")), "06/01/2025");
    }

    #[test]
    fn test_ordering_follows_time() {
        let older = DateTimeUtc::parse("2023-01-01").unwrap();
        let newer = DateTimeUtc::parse("2024-01-01").unwrap();
        assert!(older < newer);
        assert!(older.timestamp_millis() < newer.timestamp_millis());
    }
}
