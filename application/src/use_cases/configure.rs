//! Configuration service
//!
//! Single-row operations over per-member notification preferences. Nothing
//! here is staged; each call maps to one store call.

use crate::ports::store::{ConfigurationStore, StoreError};
use loodle_domain::{Configuration, MemberId, PollId};
use std::sync::Arc;
use tracing::debug;

/// Service for reading and writing member configurations
pub struct ConfigurationService<C> {
    store: Arc<C>,
}

impl<C> ConfigurationService<C>
where
    C: ConfigurationStore,
{
    pub fn new(store: Arc<C>) -> Self {
        Self { store }
    }

    /// Creates the member's default configuration on the poll, all flags
    /// off. `Conflict` when the member already has one there.
    pub async fn create_default(
        &self,
        member_id: MemberId,
        poll_id: PollId,
    ) -> Result<Configuration, StoreError> {
        debug!(
            "Creating default configuration for member {} on poll {}",
            member_id, poll_id
        );
        self.store
            .create(Configuration::default_for(member_id, poll_id))
            .await
    }

    /// Reads the member's configuration on the poll.
    pub async fn get(
        &self,
        poll_id: PollId,
        member_id: MemberId,
    ) -> Result<Configuration, StoreError> {
        self.store.get(poll_id, member_id).await
    }

    /// Replaces the member's notification flags.
    pub async fn update(
        &self,
        poll_id: PollId,
        member_id: MemberId,
        notification: bool,
        notification_by_email: bool,
    ) -> Result<Configuration, StoreError> {
        self.store
            .update(poll_id, member_id, notification, notification_by_email)
            .await
    }
}
