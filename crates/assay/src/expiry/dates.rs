//! Date parsing for expiry columns.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Date-only formats accepted in every mode.
const STRICT_DATE_FORMATS: &[&str] = &["%Y-%m-%d"];

/// Date-time formats accepted in every mode.
const STRICT_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Additional date-only formats accepted when parsing permissively.
///
/// Order matters: month-first wins over day-first for ambiguous slashed and
/// dashed dates.
const PERMISSIVE_DATE_FORMATS: &[&str] = &[
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%m/%d/%y",
    "%d-%b-%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%Y%m%d",
];

/// Additional date-time formats accepted when parsing permissively.
const PERMISSIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// How leniently date cells are read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateParseMode {
    /// ISO 8601 dates and date-times only.
    Strict,
    /// ISO plus common slashed, dashed, named-month and compact layouts.
    #[default]
    Permissive,
}

/// Parse a cell into a timestamp. Date-only values are taken at midnight.
///
/// Offsets in RFC 3339 values are normalised to UTC.
pub fn parse_timestamp(value: &str, mode: DateParseMode) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }

    let (date_formats, datetime_formats): (Vec<&str>, Vec<&str>) = match mode {
        DateParseMode::Strict => (
            STRICT_DATE_FORMATS.to_vec(),
            STRICT_DATETIME_FORMATS.to_vec(),
        ),
        DateParseMode::Permissive => (
            [STRICT_DATE_FORMATS, PERMISSIVE_DATE_FORMATS].concat(),
            [STRICT_DATETIME_FORMATS, PERMISSIVE_DATETIME_FORMATS].concat(),
        ),
    };

    datetime_formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            date_formats
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}
