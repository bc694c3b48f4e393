//! Schedule subdomain: candidate time slots and their validity rules.

mod entities;

pub use entities::{InvalidTimeWindow, Schedule, TimeWindow};
