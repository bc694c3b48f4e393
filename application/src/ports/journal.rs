//! Port for structured workflow journaling.
//!
//! Lifecycle calls never roll back completed sub-operations, so a partial
//! failure leaves dangling state behind. The journal records every call's
//! full [`WorkflowReport`] in a machine-readable form; it is the hook an
//! operator or a repair pass uses to find and fix that state.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, the journal captures the complete outcome
//! record of each workflow.

use loodle_domain::{PollId, ScheduleId, WorkflowReport};
use serde::Serialize;

/// A journal record for one lifecycle call.
#[derive(Debug, Clone, Serialize)]
pub struct JournalEntry {
    /// Operation identifier (e.g., "create_schedule", "remove_schedule").
    pub operation: &'static str,
    /// Poll the call ran against, when it has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll_id: Option<PollId>,
    /// Schedule the call ran against, when it has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_id: Option<ScheduleId>,
    /// Every step outcome of the call.
    pub report: WorkflowReport,
}

impl JournalEntry {
    /// Creates an entry for the given operation and its outcome report.
    pub fn new(operation: &'static str, report: WorkflowReport) -> Self {
        Self {
            operation,
            poll_id: None,
            schedule_id: None,
            report,
        }
    }

    /// Attaches the poll the call ran against.
    pub fn with_poll(mut self, poll_id: PollId) -> Self {
        self.poll_id = Some(poll_id);
        self
    }

    /// Attaches the schedule the call ran against.
    pub fn with_schedule(mut self, schedule_id: ScheduleId) -> Self {
        self.schedule_id = Some(schedule_id);
        self
    }
}

/// Port for recording workflow journal entries.
///
/// Implementations write each entry as a single record (e.g., one JSONL
/// line). The `record` method is synchronous and non-fallible so journaling
/// can never disrupt a workflow; recording failures are silently ignored.
pub trait WorkflowJournal: Send + Sync {
    /// Record one lifecycle call's outcome.
    fn record(&self, entry: JournalEntry);
}

/// No-op implementation for tests and when journaling is disabled.
pub struct NoJournal;

impl WorkflowJournal for NoJournal {
    fn record(&self, _entry: JournalEntry) {}
}
