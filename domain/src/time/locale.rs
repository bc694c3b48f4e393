//! Locale-specific timestamp parsing.
//!
//! Schedules are created from wall-clock strings typed by a user. The string
//! format depends on the locale: the same raw text can mean two different
//! instants depending on whether day or month comes first, so the locale tag
//! picks the parse pattern and anything else is rejected up front.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while normalizing a raw timestamp.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    /// The locale tag is not one of the supported tags. Raised before any
    /// other work happens, with zero side effects.
    #[error("unsupported locale '{0}'")]
    UnsupportedLocale(String),

    /// The raw string does not match the locale's timestamp pattern.
    #[error("'{raw}' is not a valid '{locale}' timestamp")]
    InvalidTimestamp { raw: String, locale: Locale },
}

/// Supported input locales.
///
/// Exactly two tags are recognized; each maps to one fixed date/time pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// `MM-DD-YYYY h:mm AM/PM`, e.g. `01-15-2024 2:00 PM`
    En,
    /// `DD-MM-YYYY HH:mm`, e.g. `15-01-2024 14:00`
    Fr,
}

impl Locale {
    /// The chrono format pattern for this locale's wall-clock timestamps.
    pub fn timestamp_pattern(&self) -> &'static str {
        match self {
            Locale::En => "%m-%d-%Y %I:%M %p",
            Locale::Fr => "%d-%m-%Y %H:%M",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => write!(f, "en"),
            Locale::Fr => write!(f, "fr"),
        }
    }
}

impl FromStr for Locale {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "fr" => Ok(Locale::Fr),
            _ => Err(TimeParseError::UnsupportedLocale(s.trim().to_string())),
        }
    }
}

/// Parses a raw wall-clock string with the locale's pattern.
///
/// The parsed value is interpreted as UTC; no timezone inference is applied.
///
/// # Example
///
/// ```
/// use loodle_domain::time::{parse_timestamp, Locale};
///
/// let begin = parse_timestamp("01-15-2024 2:00 PM", Locale::En).unwrap();
/// assert_eq!(begin.to_rfc3339(), "2024-01-15T14:00:00+00:00");
/// ```
pub fn parse_timestamp(raw: &str, locale: Locale) -> Result<DateTime<Utc>, TimeParseError> {
    NaiveDateTime::parse_from_str(raw.trim(), locale.timestamp_pattern())
        .map(|naive| naive.and_utc())
        .map_err(|_| TimeParseError::InvalidTimestamp {
            raw: raw.to_string(),
            locale,
        })
}
