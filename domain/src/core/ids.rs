//! Entity identifiers - UUID-backed newtypes for the four linked entity kinds.
//!
//! Each identifier wraps a v4 UUID so that lifecycle operations can generate
//! ids locally, before any row is persisted, and reference them from every
//! sub-operation of a workflow.
//!
//! - [`PollId`] - Identifies a poll (loodle)
//! - [`ScheduleId`] - Identifies a candidate time slot within a poll
//! - [`VoteId`] - Identifies one member's vote on one schedule
//! - [`MemberId`] - Identifies a poll participant (externally managed identity)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PollId(Uuid);

/// Unique identifier for a schedule (candidate time slot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleId(Uuid);

/// Unique identifier for a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoteId(Uuid);

/// Unique identifier for a member.
///
/// Members are managed by an external identity service; this type only
/// carries the id around, membership itself is never mutated here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(Uuid);

macro_rules! impl_id {
    ($name:ident) => {
        impl $name {
            /// Generates a fresh random identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an existing UUID.
            pub fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            /// Returns the underlying UUID.
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

impl_id!(PollId);
impl_id!(ScheduleId);
impl_id!(VoteId);
impl_id!(MemberId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = ScheduleId::generate();
        let b = ScheduleId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_id_display_parses_back() {
        let id = VoteId::generate();
        let parsed: VoteId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_invalid_string_is_rejected() {
        assert!("not-a-uuid".parse::<PollId>().is_err());
    }
}
