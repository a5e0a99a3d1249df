//! Compiled regex patterns for class names, date/time values and charsets.
//!
//! All patterns are compiled once at first use via `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Class Names
// =============================================================================

/// A microformats2 class token: `h-card`, `p-name`, `dt-start`, `u-in-reply-to`.
pub static MF2_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(h|p|u|dt|e)-([a-z0-9]+-)?[a-z]+(-[a-z]+)*$").expect("MF2_CLASS regex")
});

// =============================================================================
// Date/Time Fragments
// =============================================================================

/// A timezone offset: `Z`, `-8`, `-08`, `+0100`, `+01:00`.
///
/// Every offset-bearing pattern below uses this grammar.
const OFFSET: &str = r"(?:[Zz]|[+-]\d{1,2}(?::?\d{2})?)";

/// A complete ISO-8601 date-time, optionally with a timezone.
pub static ISO_DATETIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^\d{{4}}-\d{{2}}-\d{{2}}[ T]\d{{2}}:\d{{2}}(:\d{{2}})?{OFFSET}?$"))
        .expect("ISO_DATETIME regex")
});

/// A 24-hour time, optionally with a timezone: `21:18`, `9:30:05-08:00`.
pub static TIME_24H: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^\d{{1,2}}:\d{{2}}(:\d{{2}})?{OFFSET}?$")).expect("TIME_24H regex")
});

/// A 12-hour time with meridiem: `9pm`, `10:30a.m.`.
pub static TIME_12H: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\d{1,2}(:\d{2})?(:\d{2})?[ap]\.?m\.?$").expect("TIME_12H regex")
});

/// Components of a 12-hour time for conversion to 24-hour form.
pub static MERIDIEM_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{1,2}):?(\d{2})?:?(\d{2})?(a\.?m\.?|p\.?m\.?)?").expect("MERIDIEM_TIME regex")
});

/// A full calendar date and nothing else.
pub static DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("DATE regex"));

/// A calendar date anywhere in a value.
pub static DATE_IN_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").expect("DATE_IN_VALUE regex"));

/// An ordinal date: `2012-281`.
pub static ORDINAL_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{3})$").expect("ORDINAL_DATE regex"));

/// A bare timezone offset and nothing else.
pub static TIMEZONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{OFFSET}$")).expect("TIMEZONE regex"));

/// A timezone offset at the end of a value.
pub static TIMEZONE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("{OFFSET}$")).expect("TIMEZONE_SUFFIX regex"));

/// A timezone offset directly after a time digit at the end of a value.
pub static TIMEZONE_ATTACHED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"\d({OFFSET})$")).expect("TIMEZONE_ATTACHED regex"));

/// Any `HH:MM` time component within a value.
pub static HAS_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,2}:\d{2}").expect("HAS_TIME regex"));

// =============================================================================
// Charset Sniffing
// =============================================================================

/// Match `<meta charset="...">` tag
pub static CHARSET_META: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>/;]+)"#).expect("CHARSET_META regex")
});

/// Match `<meta http-equiv="Content-Type" content="...; charset=...">` tag
pub static CONTENT_TYPE_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#)
        .expect("CONTENT_TYPE_CHARSET regex")
});
