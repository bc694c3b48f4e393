//! Vote fan-out engine
//!
//! Per-member and per-vote fan-out around the vote store: creating one
//! default vote per member when a schedule appears, and locating/deleting
//! every vote tied to a schedule when it goes away. All fan-outs are
//! best-effort: each call runs to completion and individual failures are
//! collected, never short-circuited.

use crate::ports::store::{StoreError, VoteStore};
use loodle_domain::{
    Answer, MemberId, PollId, ScheduleId, StageReport, StepName, StepOutcome, Vote, VoteId,
    WorkflowReport,
};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Result of a default-vote fan-out: the votes that were created plus one
/// outcome per member, failed creations included.
#[derive(Debug)]
pub struct DefaultVotesOutcome {
    pub votes: Vec<Vote>,
    pub outcomes: Vec<StepOutcome>,
}

/// Fan-out engine over a vote store.
pub struct VoteFanout<V> {
    store: Arc<V>,
    default_answer: Answer,
}

impl<V: VoteStore + 'static> VoteFanout<V> {
    pub fn new(store: Arc<V>) -> Self {
        Self {
            store,
            default_answer: Answer::default(),
        }
    }

    /// Overrides the answer given to newly created default votes.
    pub fn with_default_answer(mut self, answer: Answer) -> Self {
        self.default_answer = answer;
        self
    }

    /// Creates one default vote per member for the schedule.
    ///
    /// All creations are launched together; a failure on one member's vote
    /// does not cancel the in-flight siblings. The outcome list holds one
    /// entry per member in completion order.
    pub async fn create_default_votes(
        &self,
        poll_id: PollId,
        schedule_id: ScheduleId,
        members: &[MemberId],
    ) -> DefaultVotesOutcome {
        let mut join_set = JoinSet::new();

        for &member in members {
            let store = Arc::clone(&self.store);
            let vote = Vote::new(poll_id, schedule_id, member, self.default_answer);

            join_set.spawn(async move {
                let result = store.create(vote).await;
                (member, result)
            });
        }

        let mut votes = Vec::new();
        let mut outcomes = Vec::new();

        while let Some(result) = join_set.join_next().await {
            match result {
                Ok((member, Ok(vote))) => {
                    debug!("Created default vote {} for member {}", vote.id, member);
                    outcomes.push(StepOutcome::success(StepName::CreateDefaultVote { member }));
                    votes.push(vote);
                }
                Ok((member, Err(e))) => {
                    warn!("Default vote creation failed for member {}: {}", member, e);
                    outcomes.push(StepOutcome::failure(
                        StepName::CreateDefaultVote { member },
                        e.to_string(),
                    ));
                }
                Err(e) => {
                    warn!("Vote creation task join error: {}", e);
                }
            }
        }

        DefaultVotesOutcome { votes, outcomes }
    }

    /// Lists the vote ids currently associated with the schedule.
    pub async fn vote_ids(
        &self,
        schedule_id: ScheduleId,
        poll_id: PollId,
    ) -> Result<Vec<VoteId>, StoreError> {
        self.store.list_ids_by_schedule(schedule_id, poll_id).await
    }

    /// Removes the vote-to-schedule association rows of the schedule.
    pub async fn remove_associations(
        &self,
        poll_id: PollId,
        schedule_id: ScheduleId,
    ) -> Result<(), StoreError> {
        self.store
            .delete_associations_by_schedule(poll_id, schedule_id)
            .await
    }

    /// The delete-votes sub-workflow of a schedule removal.
    ///
    /// Three ordered stages: enumerate the schedule's vote ids; delete each
    /// enumerated vote concurrently, collecting individual failures; remove
    /// the association rows as a final cleanup. An enumeration failure ends
    /// the sub-workflow early, since without the id list there is nothing
    /// safe to delete or clean up. Vote-delete failures do not block the
    /// cleanup stage.
    pub async fn remove_votes_for_schedule(
        &self,
        poll_id: PollId,
        schedule_id: ScheduleId,
    ) -> WorkflowReport {
        let mut report = WorkflowReport::new();

        let vote_ids = match self.vote_ids(schedule_id, poll_id).await {
            Ok(ids) => {
                debug!("Schedule {} has {} vote(s) to delete", schedule_id, ids.len());
                report.push_stage(StageReport::new(vec![StepOutcome::success(
                    StepName::CollectVoteIds,
                )]));
                ids
            }
            Err(e) => {
                warn!("Vote enumeration failed for schedule {}: {}", schedule_id, e);
                report.push_stage(StageReport::new(vec![StepOutcome::failure(
                    StepName::CollectVoteIds,
                    e.to_string(),
                )]));
                return report;
            }
        };

        if !vote_ids.is_empty() {
            report.push_stage(self.delete_votes(vote_ids).await);
        }

        let cleanup = match self.remove_associations(poll_id, schedule_id).await {
            Ok(()) => StepOutcome::success(StepName::RemoveVoteAssociations),
            Err(e) => {
                warn!(
                    "Association cleanup failed for schedule {}: {}",
                    schedule_id, e
                );
                StepOutcome::failure(StepName::RemoveVoteAssociations, e.to_string())
            }
        };
        report.push_stage(StageReport::new(vec![cleanup]));

        report
    }

    /// Deletes the given votes concurrently, one outcome per vote.
    async fn delete_votes(&self, vote_ids: Vec<VoteId>) -> StageReport {
        let mut join_set = JoinSet::new();

        for vote_id in vote_ids {
            let store = Arc::clone(&self.store);
            join_set.spawn(async move {
                let result = store.delete(vote_id).await;
                (vote_id, result)
            });
        }

        let mut outcomes = Vec::new();

        while let Some(result) = join_set.join_next().await {
            match result {
                Ok((vote_id, Ok(()))) => {
                    outcomes.push(StepOutcome::success(StepName::DeleteVote { vote: vote_id }));
                }
                Ok((vote_id, Err(e))) => {
                    warn!("Vote {} deletion failed: {}", vote_id, e);
                    outcomes.push(StepOutcome::failure(
                        StepName::DeleteVote { vote: vote_id },
                        e.to_string(),
                    ));
                }
                Err(e) => {
                    warn!("Vote deletion task join error: {}", e);
                }
            }
        }

        StageReport::new(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use loodle_domain::Answer;
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    #[derive(Default)]
    struct MockVoteStore {
        created: Mutex<Vec<Vote>>,
        deleted: Mutex<Vec<VoteId>>,
        cleaned: Mutex<Vec<(PollId, ScheduleId)>>,
        listed_ids: Vec<VoteId>,
        fail_create_for: Option<MemberId>,
        fail_delete_of: Option<VoteId>,
        fail_list: bool,
    }

    #[async_trait]
    impl VoteStore for MockVoteStore {
        async fn create(&self, vote: Vote) -> Result<Vote, StoreError> {
            if self.fail_create_for == Some(vote.member_id) {
                return Err(StoreError::Backend("create refused".to_string()));
            }
            self.created.lock().unwrap().push(vote.clone());
            Ok(vote)
        }

        async fn get(&self, vote_id: VoteId) -> Result<Vote, StoreError> {
            Err(StoreError::not_found("vote", vote_id))
        }

        async fn update(&self, vote_id: VoteId, _answer: Answer) -> Result<Vote, StoreError> {
            Err(StoreError::not_found("vote", vote_id))
        }

        async fn delete(&self, vote_id: VoteId) -> Result<(), StoreError> {
            if self.fail_delete_of == Some(vote_id) {
                return Err(StoreError::Backend("delete refused".to_string()));
            }
            self.deleted.lock().unwrap().push(vote_id);
            Ok(())
        }

        async fn list_ids_by_schedule(
            &self,
            _schedule_id: ScheduleId,
            _poll_id: PollId,
        ) -> Result<Vec<VoteId>, StoreError> {
            if self.fail_list {
                return Err(StoreError::Backend("listing down".to_string()));
            }
            Ok(self.listed_ids.clone())
        }

        async fn delete_associations_by_schedule(
            &self,
            poll_id: PollId,
            schedule_id: ScheduleId,
        ) -> Result<(), StoreError> {
            self.cleaned.lock().unwrap().push((poll_id, schedule_id));
            Ok(())
        }
    }

    fn members(n: usize) -> Vec<MemberId> {
        (0..n).map(|_| MemberId::generate()).collect()
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_creates_one_default_vote_per_member() {
        let store = Arc::new(MockVoteStore::default());
        let engine = VoteFanout::new(Arc::clone(&store));
        let members = members(3);

        let result = engine
            .create_default_votes(PollId::generate(), ScheduleId::generate(), &members)
            .await;

        assert_eq!(result.votes.len(), 3);
        assert_eq!(result.outcomes.len(), 3);
        assert!(result.outcomes.iter().all(StepOutcome::is_success));

        let created = store.created.lock().unwrap();
        assert_eq!(created.len(), 3);
        assert!(created.iter().all(|v| v.answer == Answer::No));
    }

    #[tokio::test]
    async fn test_default_answer_is_configurable() {
        let store = Arc::new(MockVoteStore::default());
        let engine = VoteFanout::new(Arc::clone(&store)).with_default_answer(Answer::IfNeeded);

        engine
            .create_default_votes(PollId::generate(), ScheduleId::generate(), &members(2))
            .await;

        let created = store.created.lock().unwrap();
        assert!(created.iter().all(|v| v.answer == Answer::IfNeeded));
    }

    #[tokio::test]
    async fn test_one_failing_member_does_not_stop_the_others() {
        let members = members(3);
        let store = Arc::new(MockVoteStore {
            fail_create_for: Some(members[1]),
            ..Default::default()
        });
        let engine = VoteFanout::new(Arc::clone(&store));

        let result = engine
            .create_default_votes(PollId::generate(), ScheduleId::generate(), &members)
            .await;

        assert_eq!(result.votes.len(), 2);
        assert_eq!(result.outcomes.len(), 3);

        let failed: Vec<_> = result.outcomes.iter().filter(|o| !o.is_success()).collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(
            failed[0].step,
            StepName::CreateDefaultVote { member: members[1] }
        );
    }

    #[tokio::test]
    async fn test_removal_runs_enumerate_delete_cleanup() {
        let ids = vec![VoteId::generate(), VoteId::generate()];
        let store = Arc::new(MockVoteStore {
            listed_ids: ids.clone(),
            ..Default::default()
        });
        let engine = VoteFanout::new(Arc::clone(&store));

        let poll_id = PollId::generate();
        let schedule_id = ScheduleId::generate();
        let report = engine.remove_votes_for_schedule(poll_id, schedule_id).await;

        assert!(report.is_success());
        assert_eq!(report.stages.len(), 3);
        assert_eq!(report.stages[1].outcomes.len(), 2);

        let deleted = store.deleted.lock().unwrap();
        assert_eq!(deleted.len(), 2);
        assert!(deleted.contains(&ids[0]) && deleted.contains(&ids[1]));
        assert_eq!(*store.cleaned.lock().unwrap(), vec![(poll_id, schedule_id)]);
    }

    #[tokio::test]
    async fn test_enumeration_failure_short_circuits() {
        let store = Arc::new(MockVoteStore {
            fail_list: true,
            ..Default::default()
        });
        let engine = VoteFanout::new(Arc::clone(&store));

        let report = engine
            .remove_votes_for_schedule(PollId::generate(), ScheduleId::generate())
            .await;

        assert!(!report.is_success());
        assert_eq!(report.stages.len(), 1);
        assert!(store.deleted.lock().unwrap().is_empty());
        assert!(store.cleaned.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_failure_does_not_block_cleanup() {
        let ids = vec![VoteId::generate(), VoteId::generate()];
        let store = Arc::new(MockVoteStore {
            listed_ids: ids.clone(),
            fail_delete_of: Some(ids[0]),
            ..Default::default()
        });
        let engine = VoteFanout::new(Arc::clone(&store));

        let report = engine
            .remove_votes_for_schedule(PollId::generate(), ScheduleId::generate())
            .await;

        assert!(!report.is_success());
        let failed: Vec<_> = report.failures().collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].step, StepName::DeleteVote { vote: ids[0] });

        // Cleanup still ran after the failed delete attempt
        assert_eq!(store.cleaned.lock().unwrap().len(), 1);
        assert_eq!(*store.deleted.lock().unwrap(), vec![ids[1]]);
    }

    #[tokio::test]
    async fn test_schedule_without_votes_skips_the_delete_stage() {
        let store = Arc::new(MockVoteStore::default());
        let engine = VoteFanout::new(Arc::clone(&store));

        let report = engine
            .remove_votes_for_schedule(PollId::generate(), ScheduleId::generate())
            .await;

        assert!(report.is_success());
        assert_eq!(report.stages.len(), 2);
        assert_eq!(store.cleaned.lock().unwrap().len(), 1);
    }
}
