//! Date/time values for `dt-*` properties.
//!
//! Handles value-class assembly of separate date, time and timezone parts,
//! 12-hour to 24-hour conversion, ordinal dates, and completing time-only
//! values from dates seen earlier in the same item.

use chrono::NaiveDate;
use dom_query::NodeRef;

use crate::dom::{get_attribute, has_class_token, tag_name};
use crate::patterns::{
    DATE, DATE_IN_VALUE, HAS_TIME, ISO_DATETIME, MERIDIEM_TIME, ORDINAL_DATE, TIMEZONE,
    TIMEZONE_ATTACHED, TIMEZONE_SUFFIX, TIME_12H, TIME_24H,
};
use crate::url_utils::UrlResolver;

use super::text::text_content;
use super::value_class::value_class_parts;

/// Dates and timezone seen so far among one item's `dt-*` properties.
#[derive(Debug, Default)]
pub struct DateAccumulator {
    dates: Vec<String>,
    implied_timezone: Option<String>,
}

impl DateAccumulator {
    /// Record a `YYYY-MM-DD` date; a repeated date becomes the most recent.
    pub fn record_date(&mut self, date: &str) {
        self.dates.retain(|d| d != date);
        self.dates.push(date.to_string());
    }

    /// Most recently recorded date.
    #[must_use]
    pub fn last_date(&self) -> Option<&str> {
        self.dates.last().map(String::as_str)
    }

    #[must_use]
    pub fn implied_timezone(&self) -> Option<&str> {
        self.implied_timezone.as_deref()
    }

    /// First timezone seen wins.
    fn imply_timezone(&mut self, timezone: &str) {
        if self.implied_timezone.is_none() {
            self.implied_timezone = Some(timezone.to_string());
        }
    }

    /// Append the implied timezone to a value that has a time but no offset.
    #[must_use]
    pub fn apply_implied_timezone(&self, value: &str) -> String {
        match self.implied_timezone() {
            Some(tz) if HAS_TIME.is_match(value) && attached_timezone(value).is_none() => {
                format!("{value}{tz}")
            }
            _ => value.to_string(),
        }
    }
}

/// A trailing timezone offset that directly follows a time digit.
fn attached_timezone(value: &str) -> Option<&str> {
    TIMEZONE_ATTACHED
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map(|offset| offset.as_str())
}

/// Split a time into its clock part and an optional trailing offset.
fn split_timezone(time: &str) -> (&str, Option<&str>) {
    match TIMEZONE_SUFFIX.find(time) {
        Some(found) if found.start() > 0 => (&time[..found.start()], Some(found.as_str())),
        _ => (time, None),
    }
}

/// Normalize a timezone offset to `±HHMM`; `Z` stays `Z`.
#[must_use]
pub fn normalize_timezone(timezone: &str) -> String {
    let timezone = timezone.trim();
    if timezone.eq_ignore_ascii_case("z") {
        return "Z".to_string();
    }

    let (sign, rest) = timezone.split_at(timezone.len().min(1));
    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() > 2 => rest.split_at(rest.len() - 2),
        None => (rest, "00"),
    };
    let minutes = if minutes.is_empty() { "00" } else { minutes };

    format!("{sign}{hours:0>2}{minutes}")
}

/// Convert an ordinal date (`2012-281`) to calendar form (`2012-10-07`).
#[must_use]
pub fn normalize_ordinal_date(value: &str) -> Option<String> {
    let caps = ORDINAL_DATE.captures(value)?;
    let year: i32 = caps.get(1)?.as_str().parse().ok()?;
    let day: u32 = caps.get(2)?.as_str().parse().ok()?;
    NaiveDate::from_yo_opt(year, day).map(|date| date.format("%Y-%m-%d").to_string())
}

/// Convert a 12-hour time to 24-hour `HH:MM[:SS]`; 24-hour input is unchanged.
///
/// A bare hour gets minutes `00`; midnight (`12am`) becomes `00`.
#[must_use]
pub fn convert_time_format(time: &str) -> String {
    let Some(caps) = MERIDIEM_TIME.captures(time) else {
        return time.to_string();
    };
    let Some(meridiem) = caps.get(4) else {
        return time.to_string();
    };
    let Some(hour) = caps.get(1).and_then(|h| h.as_str().parse::<u32>().ok()) else {
        return time.to_string();
    };

    let pm = meridiem.as_str().to_ascii_lowercase().starts_with('p');
    let hour = hour % 12 + if pm { 12 } else { 0 };
    let minutes = caps.get(2).map_or("00", |m| m.as_str());

    match caps.get(3) {
        Some(seconds) => format!("{hour:02}:{minutes}:{}", seconds.as_str()),
        None => format!("{hour:02}:{minutes}"),
    }
}

fn is_time(value: &str) -> bool {
    TIME_24H.is_match(value) || TIME_12H.is_match(value)
}

/// One fragment of a value-class date/time.
fn fragment_value(part: &NodeRef, urls: &UrlResolver) -> String {
    if has_class_token(part, "value-title") {
        return get_attribute(part, "title").unwrap_or_default();
    }
    let attr = match tag_name(part).as_str() {
        "img" | "area" => return get_attribute(part, "alt").unwrap_or_default(),
        "data" => get_attribute(part, "value"),
        "abbr" => get_attribute(part, "title"),
        "del" | "ins" | "time" => get_attribute(part, "datetime"),
        _ => None,
    };
    attr.unwrap_or_else(|| text_content(part, urls, false))
}

/// Assemble a value from value-class parts.
fn assemble_value_class(parts: &[NodeRef], urls: &UrlResolver, dates: &mut DateAccumulator) -> Option<String> {
    let mut date: Option<String> = None;
    let mut time: Option<(String, Option<String>)> = None;
    let mut timezone: Option<String> = None;

    for part in parts {
        let fragment = fragment_value(part, urls);
        let fragment = fragment.trim();
        if fragment.is_empty() {
            continue;
        }

        if ISO_DATETIME.is_match(fragment) {
            dates.record_date(&fragment[..10]);
            if let Some(tz) = attached_timezone(fragment) {
                dates.imply_timezone(&normalize_timezone(tz));
            }
            tracing::trace!(value = fragment, "value-class part is a complete date-time");
            return Some(fragment.to_string());
        }

        if is_time(fragment) {
            if time.is_none() {
                let (clock, tz) = split_timezone(fragment);
                let tz = tz.map(normalize_timezone);
                if let Some(tz) = &tz {
                    dates.imply_timezone(tz);
                }
                time = Some((clock.to_string(), tz));
            }
        } else if DATE.is_match(fragment) {
            date.get_or_insert_with(|| fragment.to_string());
        } else if ORDINAL_DATE.is_match(fragment) {
            if date.is_none() {
                date = normalize_ordinal_date(fragment);
            }
        } else if TIMEZONE.is_match(fragment) && timezone.is_none() {
            let tz = normalize_timezone(fragment);
            dates.imply_timezone(&tz);
            timezone = Some(tz);
        }
    }

    let mut value = String::new();
    if let Some(date) = &date {
        dates.record_date(date);
        value.push_str(date);
    }
    if let Some((clock, time_tz)) = time {
        if !value.is_empty() {
            value.push('T');
        }
        value.push_str(&convert_time_format(&clock));
        if let Some(tz) = time_tz.or(timezone) {
            value.push_str(&tz);
        }
    }

    tracing::trace!(value = %value, date = ?date, "assembled value-class date-time");
    (!value.is_empty()).then_some(value)
}

/// Value of an element without the value-class pattern.
fn plain_value(node: &NodeRef, urls: &UrlResolver, dates: &mut DateAccumulator) -> Option<String> {
    let attr = match tag_name(node).as_str() {
        "img" | "area" => get_attribute(node, "alt"),
        "data" => get_attribute(node, "value"),
        "abbr" => get_attribute(node, "title"),
        "del" | "ins" | "time" => get_attribute(node, "datetime"),
        _ => None,
    };
    let raw = attr.unwrap_or_else(|| text_content(node, urls, false));
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if HAS_TIME.is_match(value) {
        if let Some(tz) = attached_timezone(value) {
            dates.imply_timezone(tz);
        }
    }
    if let Some(date) = DATE_IN_VALUE.find(value) {
        dates.record_date(date.as_str());
    }

    Some(value.to_string())
}

/// Prefix a time-only value with the most recent date.
fn complete_time_only(value: String, dates: &DateAccumulator) -> String {
    if !is_time(&value) {
        return value;
    }
    let Some(date) = dates.last_date() else {
        return value;
    };

    let (clock, tz) = split_timezone(&value);
    let tz = tz.map(normalize_timezone).unwrap_or_default();
    format!("{date}T{}{tz}", convert_time_format(clock))
}

/// Value of one `dt-*` element, or `None` when nothing usable is present.
///
/// The implied timezone is not applied here; callers do that once every
/// `dt-*` property of the item has been seen.
#[must_use]
pub fn dt_value(node: &NodeRef, urls: &UrlResolver, dates: &mut DateAccumulator) -> Option<String> {
    let parts = value_class_parts(node);
    let value = if parts.is_empty() {
        plain_value(node, urls, dates)?
    } else {
        assemble_value_class(&parts, urls, dates)?
    };
    Some(complete_time_only(value, dates))
}
