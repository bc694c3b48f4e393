//! Poll entity - a group scheduling event proposing candidate time slots.

use crate::core::ids::{MemberId, PollId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when a poll name is empty after trimming.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("poll name must not be empty")]
pub struct InvalidPollName;

/// A group scheduling poll ("loodle").
///
/// The member set always contains the owner and never holds duplicates;
/// the constructors keep it that way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    pub id: PollId,
    pub name: String,
    pub description: String,
    pub owner: MemberId,
    pub members: Vec<MemberId>,
}

impl Poll {
    /// Creates a poll with a freshly generated id and the owner as the sole
    /// member. The name must be non-empty.
    pub fn try_new(
        name: impl Into<String>,
        description: impl Into<String>,
        owner: MemberId,
    ) -> Result<Self, InvalidPollName> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(InvalidPollName);
        }

        Ok(Self {
            id: PollId::generate(),
            name,
            description: description.into(),
            owner,
            members: vec![owner],
        })
    }

    /// Adds members, skipping ids already present.
    pub fn with_members(mut self, members: impl IntoIterator<Item = MemberId>) -> Self {
        for member in members {
            if !self.members.contains(&member) {
                self.members.push(member);
            }
        }
        self
    }

    /// Whether the given member participates in this poll.
    pub fn has_member(&self, member: MemberId) -> bool {
        self.members.contains(&member)
    }
}
