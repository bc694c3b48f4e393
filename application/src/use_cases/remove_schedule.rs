//! Remove Schedule use case
//!
//! Tears a schedule down: the schedule row itself and the vote clean-up
//! branch (enumerate, delete each vote, drop the associations) run
//! concurrently, and every outcome lands in one aggregated report.

use crate::ports::journal::{JournalEntry, NoJournal, WorkflowJournal};
use crate::ports::store::{ScheduleStore, StoreError, VoteStore};
use crate::use_cases::vote_fanout::VoteFanout;
use loodle_domain::{PollId, ScheduleId, StageReport, StepName, StepOutcome, WorkflowFailure};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur during schedule removal
#[derive(Error, Debug)]
pub enum RemoveScheduleError {
    /// The schedule does not exist under this poll; nothing was touched.
    #[error("schedule {schedule} not found in poll {poll}")]
    NotFound { poll: PollId, schedule: ScheduleId },

    /// The existence check itself failed.
    #[error("schedule lookup failed: {0}")]
    Store(StoreError),

    /// One or more teardown steps failed. The rest of the teardown still
    /// ran; the failure names what remains.
    #[error("schedule removal incomplete: {0}")]
    Workflow(#[from] WorkflowFailure),
}

/// Use case for removing a schedule together with its votes
pub struct RemoveScheduleUseCase<S, V> {
    schedules: Arc<S>,
    votes: VoteFanout<V>,
    journal: Arc<dyn WorkflowJournal>,
}

impl<S, V> RemoveScheduleUseCase<S, V>
where
    S: ScheduleStore,
    V: VoteStore + 'static,
{
    pub fn new(schedules: Arc<S>, votes: VoteFanout<V>) -> Self {
        Self {
            schedules,
            votes,
            journal: Arc::new(NoJournal),
        }
    }

    /// Attaches a workflow journal; every call records its report there.
    pub fn with_journal(mut self, journal: Arc<dyn WorkflowJournal>) -> Self {
        self.journal = journal;
        self
    }

    /// Execute the use case.
    ///
    /// The schedule must exist before teardown starts; a missing row is a
    /// plain `NotFound` with no other mutation. Past that point the two
    /// branches run to completion regardless of each other's outcome.
    pub async fn execute(
        &self,
        poll_id: PollId,
        schedule_id: ScheduleId,
    ) -> Result<(), RemoveScheduleError> {
        match self.schedules.get(poll_id, schedule_id).await {
            Ok(_) => {}
            Err(e) if e.is_not_found() => {
                return Err(RemoveScheduleError::NotFound {
                    poll: poll_id,
                    schedule: schedule_id,
                });
            }
            Err(e) => return Err(RemoveScheduleError::Store(e)),
        }

        info!("Removing schedule {} from poll {}", schedule_id, poll_id);

        let delete_row = async {
            match self.schedules.delete(poll_id, schedule_id).await {
                Ok(()) => StepOutcome::success(StepName::DeleteSchedule),
                Err(e) => {
                    warn!("Schedule row delete failed for {}: {}", schedule_id, e);
                    StepOutcome::failure(StepName::DeleteSchedule, e.to_string())
                }
            }
        };
        let (row_outcome, mut report) = tokio::join!(
            delete_row,
            self.votes.remove_votes_for_schedule(poll_id, schedule_id),
        );

        // The row delete ran alongside the first vote stage; fold it in there
        match report.stages.first_mut() {
            Some(stage) => stage.outcomes.insert(0, row_outcome),
            None => report.push_stage(StageReport::new(vec![row_outcome])),
        }

        self.journal.record(
            JournalEntry::new("remove_schedule", report.clone())
                .with_poll(poll_id)
                .with_schedule(schedule_id),
        );

        if let Err(failure) = report.into_result() {
            warn!("Schedule {} removal incomplete: {}", schedule_id, failure);
            return Err(failure.into());
        }

        info!("Removed schedule {} and its votes", schedule_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use loodle_domain::{Answer, Locale, Schedule, TimeWindow, Vote, VoteId, parse_timestamp};
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    struct MockScheduleStore {
        exists: Mutex<bool>,
        deleted: Mutex<Vec<ScheduleId>>,
        fail_delete: bool,
    }

    impl MockScheduleStore {
        fn containing_schedule() -> Self {
            Self {
                exists: Mutex::new(true),
                deleted: Mutex::new(vec![]),
                fail_delete: false,
            }
        }

        fn empty() -> Self {
            Self {
                exists: Mutex::new(false),
                deleted: Mutex::new(vec![]),
                fail_delete: false,
            }
        }
    }

    #[async_trait]
    impl ScheduleStore for MockScheduleStore {
        async fn create(&self, schedule: Schedule) -> Result<Schedule, StoreError> {
            Ok(schedule)
        }

        async fn bind_to_poll(
            &self,
            _poll_id: PollId,
            _schedule_id: ScheduleId,
        ) -> Result<(), StoreError> {
            Ok(())
        }

        async fn get(
            &self,
            poll_id: PollId,
            schedule_id: ScheduleId,
        ) -> Result<Schedule, StoreError> {
            if !*self.exists.lock().unwrap() {
                return Err(StoreError::not_found("schedule", schedule_id));
            }
            let window = TimeWindow::new(
                parse_timestamp("01-15-2024 2:00 PM", Locale::En).unwrap(),
                parse_timestamp("01-15-2024 3:00 PM", Locale::En).unwrap(),
            )
            .unwrap();
            Ok(Schedule::new(poll_id, window))
        }

        async fn delete(
            &self,
            _poll_id: PollId,
            schedule_id: ScheduleId,
        ) -> Result<(), StoreError> {
            if self.fail_delete {
                return Err(StoreError::Backend("row delete refused".to_string()));
            }
            *self.exists.lock().unwrap() = false;
            self.deleted.lock().unwrap().push(schedule_id);
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockVoteStore {
        ids: Vec<VoteId>,
        deleted: Mutex<Vec<VoteId>>,
        cleaned: Mutex<Vec<(PollId, ScheduleId)>>,
        fail_list: bool,
        fail_delete_of: Option<VoteId>,
    }

    #[async_trait]
    impl VoteStore for MockVoteStore {
        async fn create(&self, vote: Vote) -> Result<Vote, StoreError> {
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
                return Err(StoreError::Backend("vote delete refused".to_string()));
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
                return Err(StoreError::Backend("enumeration refused".to_string()));
            }
            Ok(self.ids.clone())
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

    fn use_case(
        schedules: &Arc<MockScheduleStore>,
        votes: &Arc<MockVoteStore>,
    ) -> RemoveScheduleUseCase<MockScheduleStore, MockVoteStore> {
        RemoveScheduleUseCase::new(Arc::clone(schedules), VoteFanout::new(Arc::clone(votes)))
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_removes_schedule_votes_and_associations() {
        let ids = vec![VoteId::generate(), VoteId::generate()];
        let schedules = Arc::new(MockScheduleStore::containing_schedule());
        let votes = Arc::new(MockVoteStore {
            ids: ids.clone(),
            ..Default::default()
        });

        let poll_id = PollId::generate();
        let schedule_id = ScheduleId::generate();
        use_case(&schedules, &votes)
            .execute(poll_id, schedule_id)
            .await
            .unwrap();

        assert_eq!(*schedules.deleted.lock().unwrap(), vec![schedule_id]);
        let deleted = votes.deleted.lock().unwrap();
        assert_eq!(deleted.len(), 2);
        assert!(ids.iter().all(|id| deleted.contains(id)));
        assert_eq!(*votes.cleaned.lock().unwrap(), vec![(poll_id, schedule_id)]);
    }

    #[tokio::test]
    async fn test_missing_schedule_is_not_found_with_no_mutation() {
        let schedules = Arc::new(MockScheduleStore::empty());
        let votes = Arc::new(MockVoteStore {
            ids: vec![VoteId::generate()],
            ..Default::default()
        });

        let err = use_case(&schedules, &votes)
            .execute(PollId::generate(), ScheduleId::generate())
            .await
            .unwrap_err();

        assert!(matches!(err, RemoveScheduleError::NotFound { .. }));
        assert!(schedules.deleted.lock().unwrap().is_empty());
        assert!(votes.deleted.lock().unwrap().is_empty());
        assert!(votes.cleaned.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_vote_delete_failure_does_not_stop_the_rest() {
        let ids = vec![VoteId::generate(), VoteId::generate()];
        let schedules = Arc::new(MockScheduleStore::containing_schedule());
        let votes = Arc::new(MockVoteStore {
            ids: ids.clone(),
            fail_delete_of: Some(ids[0]),
            ..Default::default()
        });

        let err = use_case(&schedules, &votes)
            .execute(PollId::generate(), ScheduleId::generate())
            .await
            .unwrap_err();

        let RemoveScheduleError::Workflow(failure) = err else {
            panic!("expected workflow failure");
        };

        assert!(failure.step_failed(StepName::DeleteVote { vote: ids[0] }));
        assert!(failure.step_completed(StepName::DeleteSchedule));
        assert!(failure.step_completed(StepName::RemoveVoteAssociations));
        assert_eq!(*votes.deleted.lock().unwrap(), vec![ids[1]]);
        assert_eq!(votes.cleaned.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_enumeration_failure_still_deletes_the_row() {
        let schedules = Arc::new(MockScheduleStore::containing_schedule());
        let votes = Arc::new(MockVoteStore {
            fail_list: true,
            ..Default::default()
        });

        let err = use_case(&schedules, &votes)
            .execute(PollId::generate(), ScheduleId::generate())
            .await
            .unwrap_err();

        let RemoveScheduleError::Workflow(failure) = err else {
            panic!("expected workflow failure");
        };

        assert!(failure.step_failed(StepName::CollectVoteIds));
        assert!(failure.step_completed(StepName::DeleteSchedule));
        // The vote branch stopped at enumeration: no deletes, no cleanup
        assert!(votes.deleted.lock().unwrap().is_empty());
        assert!(votes.cleaned.lock().unwrap().is_empty());
        assert_eq!(schedules.deleted.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_row_delete_failure_still_clears_votes() {
        let ids = vec![VoteId::generate()];
        let schedules = Arc::new(MockScheduleStore {
            exists: Mutex::new(true),
            deleted: Mutex::new(vec![]),
            fail_delete: true,
        });
        let votes = Arc::new(MockVoteStore {
            ids,
            ..Default::default()
        });

        let err = use_case(&schedules, &votes)
            .execute(PollId::generate(), ScheduleId::generate())
            .await
            .unwrap_err();

        let RemoveScheduleError::Workflow(failure) = err else {
            panic!("expected workflow failure");
        };

        assert!(failure.step_failed(StepName::DeleteSchedule));
        assert_eq!(votes.deleted.lock().unwrap().len(), 1);
        assert_eq!(votes.cleaned.lock().unwrap().len(), 1);
    }
}
