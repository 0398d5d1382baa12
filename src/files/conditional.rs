//! HTTP-date handling and If-Modified-Since evaluation.

use std::time::SystemTime;

use axum::http::{header, HeaderMap};
use chrono::{DateTime, NaiveDateTime, Utc, Weekday};

const IMF_FIXDATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Zone-less forms with the weekday already stripped, interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &[
    // IMF-fixdate with the zone missing
    "%d %b %Y %H:%M:%S",
    // RFC 850
    "%d-%b-%y %H:%M:%S GMT",
    // asctime
    "%b %e %H:%M:%S %Y",
];

/// Parse an HTTP-date, normalizing to UTC.
///
/// The leading weekday is ignored, so a weekday that disagrees with the date
/// does not make the value unparseable. Zoned dates are converted to UTC and
/// dates without a zone are taken to be UTC already. Returns `None` for
/// anything unparseable.
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    let value = strip_weekday(value.trim());
    if let Ok(date) = DateTime::parse_from_rfc2822(value) {
        return Some(date.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}

fn strip_weekday(value: &str) -> &str {
    let end = value
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(value.len());
    let (word, rest) = value.split_at(end);
    if word.parse::<Weekday>().is_ok() {
        rest.trim_start_matches(',').trim_start()
    } else {
        value
    }
}

/// Format a timestamp as an IMF-fixdate (`Sun, 06 Nov 1994 08:49:37 GMT`).
pub fn format_http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).format(IMF_FIXDATE).to_string()
}

/// Decide whether a request can be answered with 304 Not Modified.
///
/// Only `If-Modified-Since` is honoured, and only when `If-None-Match` is
/// absent. The modification time is truncated to whole seconds before the
/// comparison since HTTP-dates carry no fraction.
pub fn is_not_modified(headers: &HeaderMap, modified: SystemTime) -> bool {
    if headers.contains_key(header::IF_NONE_MATCH) {
        return false;
    }
    let Some(since) = headers
        .get(header::IF_MODIFIED_SINCE)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_http_date)
    else {
        return false;
    };

    DateTime::<Utc>::from(modified).timestamp() <= since.timestamp()
}
