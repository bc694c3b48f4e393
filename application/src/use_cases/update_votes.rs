//! Update Votes use case
//!
//! Applies a batch of answer changes concurrently. Each mutation gets its
//! own outcome in the returned report, so one unknown vote id never blocks
//! the rest of the batch.

use crate::ports::journal::{JournalEntry, NoJournal, WorkflowJournal};
use crate::ports::store::VoteStore;
use loodle_domain::{Answer, StageReport, StepName, StepOutcome, VoteId, WorkflowReport};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// A single requested answer change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteMutation {
    pub vote_id: VoteId,
    pub answer: Answer,
}

impl VoteMutation {
    pub fn new(vote_id: VoteId, answer: Answer) -> Self {
        Self { vote_id, answer }
    }
}

/// Use case for updating a batch of votes
pub struct UpdateVotesUseCase<V> {
    store: Arc<V>,
    journal: Arc<dyn WorkflowJournal>,
}

impl<V> UpdateVotesUseCase<V>
where
    V: VoteStore + 'static,
{
    pub fn new(store: Arc<V>) -> Self {
        Self {
            store,
            journal: Arc::new(NoJournal),
        }
    }

    /// Attaches a workflow journal; every call records its report there.
    pub fn with_journal(mut self, journal: Arc<dyn WorkflowJournal>) -> Self {
        self.journal = journal;
        self
    }

    /// Applies every mutation concurrently and reports each one separately.
    ///
    /// The report carries one outcome per mutation, tagged with the vote id
    /// it belongs to. Updates that hit a missing row fail their own outcome
    /// and nothing else.
    pub async fn execute(&self, mutations: Vec<VoteMutation>) -> StageReport {
        info!("Applying {} vote updates", mutations.len());

        let mut set = JoinSet::new();
        for mutation in mutations {
            let store = Arc::clone(&self.store);
            set.spawn(async move {
                let step = StepName::UpdateVote {
                    vote: mutation.vote_id,
                };
                match store.update(mutation.vote_id, mutation.answer).await {
                    Ok(_) => StepOutcome::success(step),
                    Err(e) => {
                        warn!("Vote {} update failed: {}", mutation.vote_id, e);
                        StepOutcome::failure(step, e.to_string())
                    }
                }
            });
        }

        let mut stage = StageReport::default();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(outcome) => stage.push(outcome),
                Err(e) => warn!("Vote update task failed to join: {}", e),
            }
        }

        self.journal.record(JournalEntry::new(
            "update_votes",
            WorkflowReport::from_stages(vec![stage.clone()]),
        ));
        stage
    }
}
