//! Time handling: locale-aware timestamp normalization.

mod locale;

pub use locale::{Locale, TimeParseError, parse_timestamp};
