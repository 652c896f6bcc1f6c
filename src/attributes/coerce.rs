//! JSON value classification and coercion
//!
//! Every helper is total: a value that does not fit the target yields `None`.
//! A JSON-native value of the expected kind is always accepted first. Number,
//! boolean and date fields then fall back to the value's textual rendering
//! (its JSON text with enclosing quotes stripped), because attribute bags are
//! written by loosely-typed clients that send `"42"` or `"true"`.
//!
//! `null` never coerces to anything.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Date-times carrying an explicit numeric offset
const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

/// Date-times without an offset; also used for `Z`-suffixed text
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d %B %Y %H:%M:%S",
    "%d %B %Y %H:%M",
    "%B %d, %Y %H:%M:%S",
    "%B %d, %Y %H:%M",
    "%B %d %Y %H:%M:%S",
    "%B %d %Y %H:%M",
];

/// Year and month only, resolved to the first of the month. Each entry is
/// the day suffix appended to the text and the format that reads it back.
const YEAR_MONTH_FORMATS: &[(&str, &str)] = &[
    ("-01", "%Y-%m-%d"),
    ("/01", "%Y/%m/%d"),
    (" 1", "%B %Y %d"),
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%B %d %Y",
];

/// Returns the textual rendering used by the lenient fallbacks.
pub fn render(value: &Value) -> String {
    serde_json::to_string(value)
        .unwrap_or_default()
        .trim_matches('"')
        .to_string()
}

/// Classifies the value as a string. Only native JSON strings qualify.
pub fn as_text(value: &Value) -> Option<&str> {
    value.as_str()
}

/// Coerces the value to a finite number.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Null => None,
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        other => parse_number(&render(other)),
    }
}

/// Coerces the value to a boolean.
pub fn as_boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(*b),
        other => parse_boolean(&render(other)),
    }
}

/// Coerces the value to a calendar date-time, normalized to UTC.
///
/// Date-only text resolves to midnight.
pub fn as_date(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::Null => None,
        other => parse_date(&render(other)),
    }
}

/// Parses decimal text, allowing surrounding whitespace and `,` digit
/// grouping in the integer part. Non-finite results are rejected so `"NaN"`
/// cannot slip past range checks.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    strip_group_separators(text)?
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
}

/// Removes `,` group separators from the integer part. Each separator must
/// sit between two digits; one anywhere else makes the text unparsable.
fn strip_group_separators(text: &str) -> Option<Cow<'_, str>> {
    if !text.contains(',') {
        return Some(Cow::Borrowed(text));
    }

    let end = text.find(['.', 'e', 'E']).unwrap_or(text.len());
    let (integer, rest) = text.split_at(end);
    if rest.contains(',') {
        return None;
    }

    let bytes = integer.as_bytes();
    let digit_at = |j: usize| bytes.get(j).is_some_and(u8::is_ascii_digit);

    let mut out = String::with_capacity(text.len());
    for (i, c) in integer.char_indices() {
        if c != ',' {
            out.push(c);
            continue;
        }
        if i == 0 || !digit_at(i - 1) || !digit_at(i + 1) {
            return None;
        }
    }
    out.push_str(rest);
    Some(Cow::Owned(out))
}

/// Parses `true` / `false`, case-insensitively, allowing surrounding whitespace.
pub fn parse_boolean(text: &str) -> Option<bool> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Parses ISO-8601, RFC 2822 and common locale-neutral date text.
pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.naive_utc());
    }

    if let Some(utc) = text.strip_suffix('Z').or_else(|| text.strip_suffix('z')) {
        return parse_naive_datetime(utc);
    }

    for fmt in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(text, fmt) {
            return Some(dt.naive_utc());
        }
    }

    if let Some(dt) = parse_naive_datetime(text) {
        return Some(dt);
    }

    // Year-month first: "%B %d %Y" would read "March 2024" as day 20 of year 24
    YEAR_MONTH_FORMATS
        .iter()
        .find_map(|(day, fmt)| NaiveDate::parse_from_str(&format!("{}{}", text, day), fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        })
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn parse_naive_datetime(text: &str) -> Option<NaiveDateTime> {
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
}
