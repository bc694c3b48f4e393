//! Workflow steps - the named sub-operations of a lifecycle call.

use crate::core::ids::{MemberId, VoteId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of one sub-operation within a lifecycle workflow.
///
/// Fan-out steps carry the entity they act on, so a partial failure can name
/// exactly which member's vote creation or which vote's deletion went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum StepName {
    PersistSchedule,
    BindScheduleToPoll,
    ListPollMembers,
    CreateDefaultVote { member: MemberId },
    DeleteSchedule,
    CollectVoteIds,
    DeleteVote { vote: VoteId },
    RemoveVoteAssociations,
    UpdateVote { vote: VoteId },
    PersistPoll,
    PersistConfiguration { member: MemberId },
}

impl fmt::Display for StepName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepName::PersistSchedule => write!(f, "persist schedule"),
            StepName::BindScheduleToPoll => write!(f, "bind schedule to poll"),
            StepName::ListPollMembers => write!(f, "list poll members"),
            StepName::CreateDefaultVote { member } => {
                write!(f, "create default vote for member {}", member)
            }
            StepName::DeleteSchedule => write!(f, "delete schedule"),
            StepName::CollectVoteIds => write!(f, "collect vote ids"),
            StepName::DeleteVote { vote } => write!(f, "delete vote {}", vote),
            StepName::RemoveVoteAssociations => write!(f, "remove vote associations"),
            StepName::UpdateVote { vote } => write!(f, "update vote {}", vote),
            StepName::PersistPoll => write!(f, "persist poll"),
            StepName::PersistConfiguration { member } => {
                write!(f, "persist configuration for member {}", member)
            }
        }
    }
}

/// Result of one sub-operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// The sub-operation this outcome belongs to.
    #[serde(flatten)]
    pub step: StepName,
    /// Whether the sub-operation completed.
    pub success: bool,
    /// Cause of the failure, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StepOutcome {
    /// Records a completed sub-operation.
    pub fn success(step: StepName) -> Self {
        Self {
            step,
            success: true,
            error: None,
        }
    }

    /// Records a failed sub-operation with its cause.
    pub fn failure(step: StepName, error: impl Into<String>) -> Self {
        Self {
            step,
            success: false,
            error: Some(error.into()),
        }
    }

    /// Returns `true` if the sub-operation completed.
    pub fn is_success(&self) -> bool {
        self.success
    }
}
