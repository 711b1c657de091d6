//! Date helper functions

use chrono::{DateTime, Local, TimeZone};
use chrono_tz::Tz;

/// Moment.js tokens and their chrono equivalents, longest first
const MOMENT_TOKENS: [(&str, &str); 18] = [
    ("YYYY", "%Y"),
    ("MMMM", "%B"),
    ("dddd", "%A"),
    ("MMM", "%b"),
    ("ddd", "%a"),
    ("SSS", "%3f"),
    ("YY", "%y"),
    ("MM", "%m"),
    ("DD", "%d"),
    ("HH", "%H"),
    ("hh", "%I"),
    ("mm", "%M"),
    ("ss", "%S"),
    ("ZZ", "%z"),
    ("M", "%-m"),
    ("D", "%-d"),
    ("A", "%p"),
    ("Z", "%:z"),
];

/// Format a date using a Moment.js-style format string
///
/// # Examples
/// ```ignore
/// format_date(&date, "MMMM DD, YYYY") // -> "March 04, 2021"
/// ```
pub fn format_date<Tz2: TimeZone>(date: &DateTime<Tz2>, format: &str) -> String
where
    Tz2::Offset: std::fmt::Display,
{
    date.format(&moment_to_chrono_format(format)).to_string()
}

/// Format a date in the configured IANA timezone; an empty or unknown
/// zone name falls back to local time
pub fn format_date_in(date: &DateTime<Local>, format: &str, timezone: &str) -> String {
    match parse_timezone(timezone) {
        Some(tz) => format_date(&date.with_timezone(&tz), format),
        None => format_date(date, format),
    }
}

/// Format a date in ISO 8601 / XML format
pub fn date_xml<Tz2: TimeZone>(date: &DateTime<Tz2>) -> String
where
    Tz2::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

fn parse_timezone(name: &str) -> Option<Tz> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    match name.parse::<Tz>() {
        Ok(tz) => Some(tz),
        Err(_) => {
            tracing::warn!("Unknown timezone {:?}, using local time", name);
            None
        }
    }
}

/// Convert a Moment.js format to a chrono format string.
/// Text inside `[...]` is copied literally.
fn moment_to_chrono_format(format: &str) -> String {
    let mut result = String::with_capacity(format.len() * 2);
    let mut rest = format;

    'outer: while let Some(c) = rest.chars().next() {
        if c == '[' {
            if let Some(end) = rest.find(']') {
                result.push_str(&rest[1..end].replace('%', "%%"));
                rest = &rest[end + 1..];
                continue;
            }
        }

        for (token, chrono) in MOMENT_TOKENS {
            if let Some(after) = rest.strip_prefix(token) {
                result.push_str(chrono);
                rest = after;
                continue 'outer;
            }
        }

        if c == '%' {
            result.push_str("%%");
        } else {
            result.push(c);
        }
        rest = &rest[c.len_utf8()..];
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        let date = Local.with_ymd_and_hms(2021, 3, 4, 10, 30, 0).unwrap();
        assert_eq!(format_date(&date, "YYYY-MM-DD"), "2021-03-04");
        assert_eq!(format_date(&date, "MMMM DD, YYYY"), "March 04, 2021");
        assert_eq!(format_date(&date, "YYYY.M.D"), "2021.3.4");
    }

    #[test]
    fn test_format_date_in_timezone() {
        let utc = chrono::Utc.with_ymd_and_hms(2021, 3, 4, 20, 0, 0).unwrap();
        let date = utc.with_timezone(&Local);
        assert_eq!(format_date_in(&date, "YYYY-MM-DD HH", "Asia/Seoul"), "2021-03-05 05");
        assert_eq!(format_date_in(&date, "YYYY-MM-DD HH", "UTC"), "2021-03-04 20");
    }

    #[test]
    fn test_unknown_timezone_falls_back() {
        let date = Local.with_ymd_and_hms(2021, 3, 4, 10, 30, 0).unwrap();
        assert_eq!(format_date_in(&date, "YYYY", "Mars/Base"), "2021");
    }

    #[test]
    fn test_moment_to_chrono() {
        assert_eq!(moment_to_chrono_format("YYYY-MM-DD"), "%Y-%m-%d");
        assert_eq!(moment_to_chrono_format("HH:mm:ss"), "%H:%M:%S");
        assert_eq!(moment_to_chrono_format("[Day] DD"), "Day %d");
        assert_eq!(moment_to_chrono_format("100%"), "100%%");
    }

    #[test]
    fn test_date_xml() {
        let date = chrono::Utc.with_ymd_and_hms(2021, 3, 4, 10, 30, 0).unwrap();
        assert_eq!(date_xml(&date), "2021-03-04T10:30:00+00:00");
    }
}
