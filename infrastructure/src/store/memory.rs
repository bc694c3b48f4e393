//! Process-local store backed by hash maps.
//!
//! One `RwLock`-guarded map per table. Locks are always taken one at a time
//! and released before the next one, so concurrent workflow steps interleave
//! freely, exactly like independent single-row statements against a real
//! backend. Votes and their schedule associations live in separate tables:
//! deleting a vote row leaves its association behind until the association
//! cleanup call runs.

use async_trait::async_trait;
use loodle_application::ports::membership::MembershipProvider;
use loodle_application::ports::store::{
    ConfigurationStore, PollStore, ScheduleStore, StoreError, VoteStore,
};
use loodle_domain::{
    Answer, Configuration, MemberId, Poll, PollId, Schedule, ScheduleId, Vote, VoteId,
};
use std::collections::HashMap;
use std::sync::RwLock;

fn poisoned() -> StoreError {
    StoreError::Backend("store lock poisoned".to_string())
}

/// In-memory adapter for every store port.
#[derive(Default)]
pub struct InMemoryStore {
    polls: RwLock<HashMap<PollId, Poll>>,
    schedules: RwLock<HashMap<ScheduleId, Schedule>>,
    bindings: RwLock<HashMap<PollId, Vec<ScheduleId>>>,
    votes: RwLock<HashMap<VoteId, Vote>>,
    associations: RwLock<HashMap<(PollId, ScheduleId), Vec<VoteId>>>,
    configurations: RwLock<HashMap<(PollId, MemberId), Configuration>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vote rows currently stored, across all schedules.
    pub fn vote_count(&self) -> usize {
        self.votes.read().map(|v| v.len()).unwrap_or(0)
    }

    /// Number of vote associations currently stored for one schedule.
    pub fn association_count(&self, poll_id: PollId, schedule_id: ScheduleId) -> usize {
        self.associations
            .read()
            .ok()
            .and_then(|a| a.get(&(poll_id, schedule_id)).map(Vec::len))
            .unwrap_or(0)
    }
}

#[async_trait]
impl ScheduleStore for InMemoryStore {
    async fn create(&self, schedule: Schedule) -> Result<Schedule, StoreError> {
        let mut schedules = self.schedules.write().map_err(|_| poisoned())?;
        schedules.insert(schedule.id, schedule.clone());
        Ok(schedule)
    }

    async fn bind_to_poll(
        &self,
        poll_id: PollId,
        schedule_id: ScheduleId,
    ) -> Result<(), StoreError> {
        let mut bindings = self.bindings.write().map_err(|_| poisoned())?;
        let bound = bindings.entry(poll_id).or_default();
        if !bound.contains(&schedule_id) {
            bound.push(schedule_id);
        }
        Ok(())
    }

    async fn get(&self, poll_id: PollId, schedule_id: ScheduleId) -> Result<Schedule, StoreError> {
        let bound = {
            let bindings = self.bindings.read().map_err(|_| poisoned())?;
            bindings
                .get(&poll_id)
                .is_some_and(|ids| ids.contains(&schedule_id))
        };
        if !bound {
            return Err(StoreError::not_found("schedule", schedule_id));
        }

        let schedules = self.schedules.read().map_err(|_| poisoned())?;
        schedules
            .get(&schedule_id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("schedule", schedule_id))
    }

    async fn delete(&self, poll_id: PollId, schedule_id: ScheduleId) -> Result<(), StoreError> {
        {
            let mut bindings = self.bindings.write().map_err(|_| poisoned())?;
            if let Some(bound) = bindings.get_mut(&poll_id) {
                bound.retain(|id| *id != schedule_id);
            }
        }

        let mut schedules = self.schedules.write().map_err(|_| poisoned())?;
        match schedules.remove(&schedule_id) {
            Some(_) => Ok(()),
            None => Err(StoreError::not_found("schedule", schedule_id)),
        }
    }
}

#[async_trait]
impl VoteStore for InMemoryStore {
    async fn create(&self, vote: Vote) -> Result<Vote, StoreError> {
        {
            let mut votes = self.votes.write().map_err(|_| poisoned())?;
            let duplicate = votes.values().any(|v| {
                v.poll_id == vote.poll_id
                    && v.schedule_id == vote.schedule_id
                    && v.member_id == vote.member_id
            });
            if duplicate {
                return Err(StoreError::Conflict(format!(
                    "member {} already voted on schedule {}",
                    vote.member_id, vote.schedule_id
                )));
            }
            votes.insert(vote.id, vote.clone());
        }

        let mut associations = self.associations.write().map_err(|_| poisoned())?;
        associations
            .entry((vote.poll_id, vote.schedule_id))
            .or_default()
            .push(vote.id);
        Ok(vote)
    }

    async fn get(&self, vote_id: VoteId) -> Result<Vote, StoreError> {
        let votes = self.votes.read().map_err(|_| poisoned())?;
        votes
            .get(&vote_id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("vote", vote_id))
    }

    async fn update(&self, vote_id: VoteId, answer: Answer) -> Result<Vote, StoreError> {
        let mut votes = self.votes.write().map_err(|_| poisoned())?;
        let vote = votes
            .get_mut(&vote_id)
            .ok_or_else(|| StoreError::not_found("vote", vote_id))?;
        vote.answer = answer;
        Ok(vote.clone())
    }

    async fn delete(&self, vote_id: VoteId) -> Result<(), StoreError> {
        let mut votes = self.votes.write().map_err(|_| poisoned())?;
        match votes.remove(&vote_id) {
            Some(_) => Ok(()),
            None => Err(StoreError::not_found("vote", vote_id)),
        }
    }

    async fn list_ids_by_schedule(
        &self,
        schedule_id: ScheduleId,
        poll_id: PollId,
    ) -> Result<Vec<VoteId>, StoreError> {
        let associations = self.associations.read().map_err(|_| poisoned())?;
        Ok(associations
            .get(&(poll_id, schedule_id))
            .cloned()
            .unwrap_or_default())
    }

    async fn delete_associations_by_schedule(
        &self,
        poll_id: PollId,
        schedule_id: ScheduleId,
    ) -> Result<(), StoreError> {
        let mut associations = self.associations.write().map_err(|_| poisoned())?;
        associations.remove(&(poll_id, schedule_id));
        Ok(())
    }
}

#[async_trait]
impl PollStore for InMemoryStore {
    async fn create(&self, poll: Poll) -> Result<Poll, StoreError> {
        let mut polls = self.polls.write().map_err(|_| poisoned())?;
        polls.insert(poll.id, poll.clone());
        Ok(poll)
    }

    async fn get(&self, poll_id: PollId) -> Result<Poll, StoreError> {
        let polls = self.polls.read().map_err(|_| poisoned())?;
        polls
            .get(&poll_id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("poll", poll_id))
    }
}

#[async_trait]
impl ConfigurationStore for InMemoryStore {
    async fn create(&self, configuration: Configuration) -> Result<Configuration, StoreError> {
        let key = (configuration.poll_id, configuration.member_id);
        let mut configurations = self.configurations.write().map_err(|_| poisoned())?;
        if configurations.contains_key(&key) {
            return Err(StoreError::Conflict(format!(
                "member {} already configured on poll {}",
                configuration.member_id, configuration.poll_id
            )));
        }
        configurations.insert(key, configuration.clone());
        Ok(configuration)
    }

    async fn get(
        &self,
        poll_id: PollId,
        member_id: MemberId,
    ) -> Result<Configuration, StoreError> {
        let configurations = self.configurations.read().map_err(|_| poisoned())?;
        configurations
            .get(&(poll_id, member_id))
            .cloned()
            .ok_or_else(|| StoreError::not_found("configuration", member_id))
    }

    async fn update(
        &self,
        poll_id: PollId,
        member_id: MemberId,
        notification: bool,
        notification_by_email: bool,
    ) -> Result<Configuration, StoreError> {
        let mut configurations = self.configurations.write().map_err(|_| poisoned())?;
        let configuration = configurations
            .get_mut(&(poll_id, member_id))
            .ok_or_else(|| StoreError::not_found("configuration", member_id))?;
        configuration.notification = notification;
        configuration.notification_by_email = notification_by_email;
        Ok(configuration.clone())
    }
}

#[async_trait]
impl MembershipProvider for InMemoryStore {
    async fn list_members(&self, poll_id: PollId) -> Result<Vec<MemberId>, StoreError> {
        let polls = self.polls.read().map_err(|_| poisoned())?;
        polls
            .get(&poll_id)
            .map(|p| p.members.clone())
            .ok_or_else(|| StoreError::not_found("poll", poll_id))
    }
}
