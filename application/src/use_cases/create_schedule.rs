//! Create Schedule use case
//!
//! Orchestrates the schedule creation workflow: normalize the raw input,
//! then fan out the three independent sub-operations (persist the row, bind
//! it to the poll, create the default votes) and aggregate their outcomes.

use crate::ports::journal::{JournalEntry, NoJournal, WorkflowJournal};
use crate::ports::membership::MembershipProvider;
use crate::ports::store::{ScheduleStore, VoteStore};
use crate::use_cases::vote_fanout::VoteFanout;
use crate::use_cases::workflow::{StageTask, run_stage};
use loodle_domain::{
    InvalidTimeWindow, Locale, PollId, Schedule, ScheduleId, StepName, StepOutcome,
    TimeParseError, TimeWindow, WorkflowFailure, WorkflowReport, parse_timestamp,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur during schedule creation
#[derive(Error, Debug)]
pub enum CreateScheduleError {
    /// Input rejected during normalization; nothing was written.
    #[error("timestamp normalization failed: {0}")]
    Time(#[from] TimeParseError),

    /// Input rejected during normalization; nothing was written.
    #[error("invalid schedule window: {0}")]
    Window(#[from] InvalidTimeWindow),

    /// One or more sub-operations failed. Completed sub-operations stay in
    /// place; the failure names both groups.
    #[error("schedule creation incomplete: {0}")]
    Workflow(#[from] WorkflowFailure),
}

/// Input for the CreateSchedule use case
#[derive(Debug, Clone)]
pub struct CreateScheduleInput {
    /// Poll the slot is proposed for.
    pub poll_id: PollId,
    /// Raw begin timestamp, in the locale's wall-clock format.
    pub raw_begin: String,
    /// Raw end timestamp, in the locale's wall-clock format.
    pub raw_end: String,
    /// Locale tag selecting the timestamp format ("en" or "fr").
    pub locale: String,
}

impl CreateScheduleInput {
    pub fn new(
        poll_id: PollId,
        raw_begin: impl Into<String>,
        raw_end: impl Into<String>,
        locale: impl Into<String>,
    ) -> Self {
        Self {
            poll_id,
            raw_begin: raw_begin.into(),
            raw_end: raw_end.into(),
            locale: locale.into(),
        }
    }
}

/// Use case for creating a schedule with its poll binding and default votes
pub struct CreateScheduleUseCase<S, V, M> {
    schedules: Arc<S>,
    members: Arc<M>,
    votes: VoteFanout<V>,
    journal: Arc<dyn WorkflowJournal>,
}

impl<S, V, M> CreateScheduleUseCase<S, V, M>
where
    S: ScheduleStore,
    V: VoteStore + 'static,
    M: MembershipProvider,
{
    pub fn new(schedules: Arc<S>, votes: VoteFanout<V>, members: Arc<M>) -> Self {
        Self {
            schedules,
            members,
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
    /// Normalization runs first and is pure: an unsupported locale or a
    /// malformed timestamp fails the call before any store call happens.
    /// The three sub-operations then run concurrently with a wait-for-all
    /// join; there is no compensation for the ones that succeeded when a
    /// sibling fails.
    pub async fn execute(
        &self,
        input: CreateScheduleInput,
    ) -> Result<Schedule, CreateScheduleError> {
        let locale: Locale = input.locale.parse()?;
        let window = TimeWindow::new(
            parse_timestamp(&input.raw_begin, locale)?,
            parse_timestamp(&input.raw_end, locale)?,
        )?;
        let schedule = Schedule::new(input.poll_id, window);

        info!("Creating schedule {} for poll {}", schedule.id, input.poll_id);

        let stage = run_stage(vec![
            StageTask::step(StepName::PersistSchedule, async {
                self.schedules.create(schedule.clone()).await.map(|_| ())
            }),
            StageTask::step(
                StepName::BindScheduleToPoll,
                self.schedules.bind_to_poll(input.poll_id, schedule.id),
            ),
            StageTask::fan_out(self.default_votes(input.poll_id, schedule.id)),
        ])
        .await;

        let report = WorkflowReport::from_stages(vec![stage]);
        self.journal.record(
            JournalEntry::new("create_schedule", report.clone())
                .with_poll(input.poll_id)
                .with_schedule(schedule.id),
        );

        if let Err(failure) = report.into_result() {
            warn!("Schedule {} creation incomplete: {}", schedule.id, failure);
            return Err(failure.into());
        }

        info!("Created schedule {} with its default votes", schedule.id);
        Ok(schedule)
    }

    /// Sub-operation (c): enumerate the poll's current members, then create
    /// one default vote per member. A membership lookup failure surfaces as
    /// this group's single outcome.
    async fn default_votes(&self, poll_id: PollId, schedule_id: ScheduleId) -> Vec<StepOutcome> {
        match self.members.list_members(poll_id).await {
            Ok(members) => {
                let mut outcomes = vec![StepOutcome::success(StepName::ListPollMembers)];
                let fanned = self
                    .votes
                    .create_default_votes(poll_id, schedule_id, &members)
                    .await;
                outcomes.extend(fanned.outcomes);
                outcomes
            }
            Err(e) => {
                warn!("Member listing failed for poll {}: {}", poll_id, e);
                vec![StepOutcome::failure(StepName::ListPollMembers, e.to_string())]
            }
        }
    }
}
