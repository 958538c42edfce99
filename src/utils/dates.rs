//! Conversion of loosely formatted date strings into XML schema lexical form.
//!
//! Accepts RFC 3339 date-times, local date-times, plain dates, and the `~t`
//! prefixed datetime encoding used by data-hub JSON entities.

use crate::utils::error::DateParseError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat};

const DATA_HUB_DATETIME_PREFIX: &str = "~t";

/// Parses `raw` and returns the `xs:date` / `xs:dateTime` representation.
pub fn to_xml_date(raw: &str) -> Result<String, DateParseError> {
    let value = raw.trim();
    let value = value.strip_prefix(DATA_HUB_DATETIME_PREFIX).unwrap_or(value);

    if value.is_empty() {
        return Err(DateParseError {
            value: raw.to_string(),
            reason: "empty date".to_string(),
        });
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string());
        }
    }

    // xs:date allows a trailing timezone designator
    let (date_part, zone) = split_date_zone(value);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => Ok(format!("{}{}", date.format("%Y-%m-%d"), zone)),
        Err(e) => Err(DateParseError {
            value: raw.to_string(),
            reason: e.to_string(),
        }),
    }
}

fn split_date_zone(value: &str) -> (&str, &str) {
    if let Some(date) = value.strip_suffix('Z') {
        return (date, "Z");
    }
    // YYYY-MM-DD+hh:mm
    if value.len() == 16 && value.is_char_boundary(10) {
        let (date, zone) = value.split_at(10);
        if (zone.starts_with('+') || zone.starts_with('-')) && zone.as_bytes()[3] == b':' {
            return (date, zone);
        }
    }
    (value, "")
}
