//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod configure;
pub mod create_poll;
pub mod create_schedule;
pub mod remove_schedule;
pub mod update_votes;
pub mod vote_fanout;
pub mod workflow;
