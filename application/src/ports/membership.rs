//! Membership provider port
//!
//! Poll membership is managed by an external collaborator; the orchestrator
//! only ever reads the current member set.

use crate::ports::store::StoreError;
use async_trait::async_trait;
use loodle_domain::{MemberId, PollId};

/// Read-only view of a poll's current members.
#[async_trait]
pub trait MembershipProvider: Send + Sync {
    /// List the current member ids of the poll.
    async fn list_members(&self, poll_id: PollId) -> Result<Vec<MemberId>, StoreError>;
}
