//! Schedule entity - one candidate time slot belonging to a poll.

use crate::core::ids::{PollId, ScheduleId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when a window's end does not lie strictly after its begin.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("window end {end} is not after begin {begin}")]
pub struct InvalidTimeWindow {
    pub begin: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Half-open time window of a candidate slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub begin: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Creates a window, enforcing `begin < end`.
    pub fn new(begin: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, InvalidTimeWindow> {
        if begin < end {
            Ok(Self { begin, end })
        } else {
            Err(InvalidTimeWindow { begin, end })
        }
    }

    /// Duration of the slot.
    pub fn duration(&self) -> chrono::Duration {
        self.end - self.begin
    }
}

/// One candidate time slot of a poll.
///
/// The identifier is generated locally at construction time, before any row
/// is persisted, so every sub-operation of the creation workflow can address
/// the schedule without waiting for a persisted-id round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: ScheduleId,
    pub poll_id: PollId,
    pub window: TimeWindow,
}

impl Schedule {
    /// Creates a new schedule for the poll with a freshly generated id.
    pub fn new(poll_id: PollId, window: TimeWindow) -> Self {
        Self {
            id: ScheduleId::generate(),
            poll_id,
            window,
        }
    }
}
