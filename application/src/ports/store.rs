//! Store adapter ports
//!
//! Defines the storage contracts the orchestrator depends on. The backing
//! store offers single-row CRUD only: every call touches one logical row and
//! there is no cross-row atomicity, so multi-entity consistency is the
//! workflows' job, not the store's. Implementations (adapters) live in the
//! infrastructure layer.

use async_trait::async_trait;
use loodle_domain::{
    Answer, Configuration, MemberId, Poll, PollId, Schedule, ScheduleId, Vote, VoteId,
};
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The referenced row does not exist at the point of use.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// The write would violate a uniqueness rule of the row's table.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The backing store failed to execute the call.
    #[error("backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    /// Builds a `NotFound` for the given entity kind and id.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        StoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Check if this error is a missing-row error
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Row store for schedules and their poll association.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Persist the schedule row. The id was generated by the caller.
    async fn create(&self, schedule: Schedule) -> Result<Schedule, StoreError>;

    /// Create the poll-to-schedule association row.
    async fn bind_to_poll(
        &self,
        poll_id: PollId,
        schedule_id: ScheduleId,
    ) -> Result<(), StoreError>;

    /// Read a schedule through its poll binding.
    async fn get(&self, poll_id: PollId, schedule_id: ScheduleId) -> Result<Schedule, StoreError>;

    /// Remove the schedule row and its poll binding.
    ///
    /// `NotFound` when no schedule row existed; the binding is cleaned up
    /// regardless of which of the two rows were present.
    async fn delete(&self, poll_id: PollId, schedule_id: ScheduleId) -> Result<(), StoreError>;
}

/// Row store for votes and their schedule association.
#[async_trait]
pub trait VoteStore: Send + Sync {
    /// Persist the vote row and its schedule association.
    ///
    /// `Conflict` when the member already has a vote on this schedule.
    async fn create(&self, vote: Vote) -> Result<Vote, StoreError>;

    /// Read one vote row.
    async fn get(&self, vote_id: VoteId) -> Result<Vote, StoreError>;

    /// Replace a vote's answer. `NotFound` when the row does not exist.
    async fn update(&self, vote_id: VoteId, answer: Answer) -> Result<Vote, StoreError>;

    /// Remove one vote row. Association rows are untouched; cleaning them is
    /// a separate call. `NotFound` when the row does not exist.
    async fn delete(&self, vote_id: VoteId) -> Result<(), StoreError>;

    /// List the vote ids associated with a schedule, in association order.
    /// Yields an empty sequence (not an error) when the schedule has none.
    async fn list_ids_by_schedule(
        &self,
        schedule_id: ScheduleId,
        poll_id: PollId,
    ) -> Result<Vec<VoteId>, StoreError>;

    /// Remove every vote-to-schedule association row of the schedule.
    /// Idempotent: succeeds when there were none.
    async fn delete_associations_by_schedule(
        &self,
        poll_id: PollId,
        schedule_id: ScheduleId,
    ) -> Result<(), StoreError>;
}

/// Row store for polls.
#[async_trait]
pub trait PollStore: Send + Sync {
    /// Persist the poll row.
    async fn create(&self, poll: Poll) -> Result<Poll, StoreError>;

    /// Read one poll row.
    async fn get(&self, poll_id: PollId) -> Result<Poll, StoreError>;
}

/// Row store for per-member notification preferences.
#[async_trait]
pub trait ConfigurationStore: Send + Sync {
    /// Persist a configuration row. `Conflict` when the (poll, member) pair
    /// already has one.
    async fn create(&self, configuration: Configuration) -> Result<Configuration, StoreError>;

    /// Read the configuration of one member on one poll.
    async fn get(&self, poll_id: PollId, member_id: MemberId)
    -> Result<Configuration, StoreError>;

    /// Replace the notification flags of an existing configuration row.
    async fn update(
        &self,
        poll_id: PollId,
        member_id: MemberId,
        notification: bool,
        notification_by_email: bool,
    ) -> Result<Configuration, StoreError>;
}
