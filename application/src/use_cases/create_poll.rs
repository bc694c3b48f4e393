//! Create Poll use case
//!
//! Persists the poll row and seeds one default configuration per member in
//! a single concurrent stage.

use crate::ports::journal::{JournalEntry, NoJournal, WorkflowJournal};
use crate::ports::store::{ConfigurationStore, PollStore};
use crate::use_cases::workflow::{StageTask, run_stage};
use loodle_domain::{
    Configuration, InvalidPollName, MemberId, Poll, StepName, WorkflowFailure, WorkflowReport,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur during poll creation
#[derive(Error, Debug)]
pub enum CreatePollError {
    /// The poll was rejected before any store call.
    #[error("invalid poll: {0}")]
    Invalid(#[from] InvalidPollName),

    /// One or more creation steps failed; the completed ones stay in place.
    #[error("poll creation incomplete: {0}")]
    Workflow(#[from] WorkflowFailure),
}

/// Input for the CreatePoll use case
#[derive(Debug, Clone)]
pub struct CreatePollInput {
    pub name: String,
    pub description: String,
    pub owner: MemberId,
    pub invitees: Vec<MemberId>,
}

impl CreatePollInput {
    pub fn new(name: impl Into<String>, description: impl Into<String>, owner: MemberId) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            owner,
            invitees: vec![],
        }
    }

    /// Adds invited members; the owner is always a member regardless.
    pub fn with_invitees(mut self, invitees: impl IntoIterator<Item = MemberId>) -> Self {
        self.invitees.extend(invitees);
        self
    }
}

/// Use case for creating a poll with its member configurations
pub struct CreatePollUseCase<P, C> {
    polls: Arc<P>,
    configurations: Arc<C>,
    journal: Arc<dyn WorkflowJournal>,
}

impl<P, C> CreatePollUseCase<P, C>
where
    P: PollStore,
    C: ConfigurationStore,
{
    pub fn new(polls: Arc<P>, configurations: Arc<C>) -> Self {
        Self {
            polls,
            configurations,
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
    /// The poll row and every member's default configuration are written
    /// concurrently; a failed configuration write never unwinds the poll.
    pub async fn execute(&self, input: CreatePollInput) -> Result<Poll, CreatePollError> {
        let poll =
            Poll::try_new(input.name, input.description, input.owner)?.with_members(input.invitees);

        info!("Creating poll {} with {} members", poll.id, poll.members.len());

        let mut tasks = vec![StageTask::step(StepName::PersistPoll, async {
            self.polls.create(poll.clone()).await.map(|_| ())
        })];
        for member in poll.members.iter().copied() {
            let poll_id = poll.id;
            tasks.push(StageTask::step(
                StepName::PersistConfiguration { member },
                async move {
                    self.configurations
                        .create(Configuration::default_for(member, poll_id))
                        .await
                        .map(|_| ())
                },
            ));
        }

        let stage = run_stage(tasks).await;
        let report = WorkflowReport::from_stages(vec![stage]);
        self.journal
            .record(JournalEntry::new("create_poll", report.clone()).with_poll(poll.id));

        if let Err(failure) = report.into_result() {
            warn!("Poll {} creation incomplete: {}", poll.id, failure);
            return Err(failure.into());
        }

        Ok(poll)
    }
}
