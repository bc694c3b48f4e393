//! Domain layer for loodle
//!
//! This crate contains the core business logic, entities, and value objects
//! of the group scheduling system. It has no dependencies on infrastructure
//! or async runtime concerns.
//!
//! # Core Concepts
//!
//! ## Poll lifecycle
//!
//! A poll ("loodle") proposes candidate time slots (schedules); each member
//! casts one vote per slot; the poll resolves to the slot(s) with the best
//! support.
//!
//! ## Workflow reports
//!
//! Lifecycle operations fan out independent sub-operations and never roll
//! back completed work. [`WorkflowReport`] captures every step outcome so a
//! partial failure names exactly what happened.

pub mod configuration;
pub mod core;
pub mod poll;
pub mod schedule;
pub mod time;
pub mod vote;
pub mod workflow;

// Re-export commonly used types
pub use configuration::Configuration;
pub use core::ids::{MemberId, PollId, ScheduleId, VoteId};
pub use poll::{InvalidPollName, Poll};
pub use schedule::{InvalidTimeWindow, Schedule, TimeWindow};
pub use time::{Locale, TimeParseError, parse_timestamp};
pub use vote::{Answer, InvalidAnswer, SlotSupport, Vote, best_slots};
pub use workflow::{StageReport, StepName, StepOutcome, WorkflowFailure, WorkflowReport};
