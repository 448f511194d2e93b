//! Date decoding and encoding.
//!
//! Decoding tries each caller-registered format (chrono syntax) in
//! registration order, then the default ISO-8601-extended family: date only,
//! date plus time to seconds, optional fractional seconds, and an optional
//! timezone offset or bare `Z`. The first successful format wins. Formats
//! without timezone information are interpreted as UTC.
//!
//! Encoding renders an ISO-8601 string, or a `new Date("...")` constructor
//! expression when the non-standard eval-compatible mode is requested by the
//! writer.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};

fn from_naive(ndt: NaiveDateTime) -> DateTime<Utc> {
    Utc.from_utc_datetime(&ndt)
}

fn try_format(text: &str, format: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_str(text, format) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(text, format) {
        return Some(from_naive(ndt));
    }
    if let Ok(nd) = NaiveDate::parse_from_str(text, format) {
        return Some(from_naive(nd.and_hms_opt(0, 0, 0)?));
    }
    None
}

/// Parses a date literal, trying `custom_formats` in order before the
/// ISO-8601 defaults. Returns `None` when nothing matches.
///
/// # Examples
///
/// ```rust
/// use loose_json::dates::parse_date;
///
/// let dt = parse_date("2016-01-02T03:04:05Z", &[]).unwrap();
/// assert_eq!(dt.to_rfc3339(), "2016-01-02T03:04:05+00:00");
///
/// let dt = parse_date("02/01/2016", &["%d/%m/%Y".to_string()]).unwrap();
/// assert_eq!(dt.to_rfc3339(), "2016-01-02T00:00:00+00:00");
/// ```
#[must_use]
pub fn parse_date(text: &str, custom_formats: &[String]) -> Option<DateTime<Utc>> {
    for format in custom_formats {
        if let Some(dt) = try_format(text, format) {
            return Some(dt);
        }
    }

    // ISO-8601-extended defaults. RFC 3339 covers `Z`, colon offsets, and
    // fractional seconds; the rest cover naive and colonless-offset forms.
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(from_naive(ndt));
    }
    if let Ok(nd) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(from_naive(nd.and_hms_opt(0, 0, 0)?));
    }
    None
}

/// Renders `dt` as an ISO-8601 string: second precision when there are no
/// sub-second digits, millisecond precision otherwise, always with `Z`.
///
/// # Examples
///
/// ```rust
/// use loose_json::dates::format_date;
/// use chrono::{TimeZone, Utc};
///
/// let dt = Utc.with_ymd_and_hms(2016, 1, 2, 3, 4, 5).unwrap();
/// assert_eq!(format_date(&dt), "2016-01-02T03:04:05Z");
/// ```
#[must_use]
pub fn format_date(dt: &DateTime<Utc>) -> String {
    if chrono::Timelike::nanosecond(dt) == 0 {
        dt.to_rfc3339_opts(SecondsFormat::Secs, true)
    } else {
        dt.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}
