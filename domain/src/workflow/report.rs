//! Workflow reports - aggregated outcomes of staged lifecycle calls.
//!
//! A lifecycle call is an ordered list of stages; each stage is a set of
//! independent sub-operations that run concurrently. The report mirrors that
//! structure and names every step outcome, so a caller can tell exactly which
//! writes took effect when the call as a whole failed.

use crate::workflow::step::{StepName, StepOutcome};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcomes of one stage (one concurrent group of sub-operations).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageReport {
    pub outcomes: Vec<StepOutcome>,
}

impl StageReport {
    /// Creates a stage report from collected outcomes.
    pub fn new(outcomes: Vec<StepOutcome>) -> Self {
        Self { outcomes }
    }

    /// Appends an outcome to this stage.
    pub fn push(&mut self, outcome: StepOutcome) {
        self.outcomes.push(outcome);
    }

    /// Returns `true` if every sub-operation in the stage completed.
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(StepOutcome::is_success)
    }

    /// Iterates over the failed outcomes of the stage.
    pub fn failures(&self) -> impl Iterator<Item = &StepOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}

/// Aggregated result of a whole lifecycle call.
///
/// Stages appear in declaration order. Sub-operations inside one stage have
/// no relative ordering; a later stage only started after every step of the
/// stage before it reported completion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowReport {
    pub stages: Vec<StageReport>,
}

impl WorkflowReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a report from an ordered stage list.
    pub fn from_stages(stages: Vec<StageReport>) -> Self {
        Self { stages }
    }

    /// Appends a completed stage.
    pub fn push_stage(&mut self, stage: StageReport) {
        self.stages.push(stage);
    }

    /// Iterates over every step outcome, in stage order.
    pub fn outcomes(&self) -> impl Iterator<Item = &StepOutcome> {
        self.stages.iter().flat_map(|s| s.outcomes.iter())
    }

    /// Iterates over every failed step outcome.
    pub fn failures(&self) -> impl Iterator<Item = &StepOutcome> {
        self.outcomes().filter(|o| !o.is_success())
    }

    /// Returns `true` if every step of every stage completed.
    pub fn is_success(&self) -> bool {
        self.stages.iter().all(StageReport::is_success)
    }

    /// Resolves the report into the call's outcome.
    ///
    /// On failure the error carries the failed steps with their causes and
    /// the steps that completed; the completed steps' writes are durable and
    /// are never rolled back.
    pub fn into_result(self) -> Result<(), WorkflowFailure> {
        if self.is_success() {
            return Ok(());
        }

        let (failed, completed): (Vec<_>, Vec<_>) = self
            .stages
            .into_iter()
            .flat_map(|s| s.outcomes)
            .partition(|o| !o.is_success());

        Err(WorkflowFailure {
            failed,
            completed: completed.into_iter().map(|o| o.step).collect(),
        })
    }
}

/// A lifecycle call completed with one or more failed sub-operations.
///
/// Work reported under `completed` already took effect and stays in place;
/// there is no compensation. Callers surface this to an operator or a
/// repair path.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{}", describe(.failed, .completed))]
pub struct WorkflowFailure {
    /// Failed sub-operations with their causes.
    pub failed: Vec<StepOutcome>,
    /// Sub-operations that completed before or alongside the failures.
    pub completed: Vec<StepName>,
}

impl WorkflowFailure {
    /// Whether the named step is among the failed ones.
    pub fn step_failed(&self, step: StepName) -> bool {
        self.failed.iter().any(|o| o.step == step)
    }

    /// Whether the named step completed.
    pub fn step_completed(&self, step: StepName) -> bool {
        self.completed.contains(&step)
    }
}

fn describe(failed: &[StepOutcome], completed: &[StepName]) -> String {
    let causes = failed
        .iter()
        .map(|o| match &o.error {
            Some(error) => format!("{}: {}", o.step, error),
            None => o.step.to_string(),
        })
        .collect::<Vec<_>>()
        .join("; ");

    format!(
        "{} of {} workflow steps failed: {}",
        failed.len(),
        failed.len() + completed.len(),
        causes
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ids::MemberId;

    #[test]
    fn test_all_success_resolves_ok() {
        let report = WorkflowReport::from_stages(vec![StageReport::new(vec![
            StepOutcome::success(StepName::PersistSchedule),
            StepOutcome::success(StepName::BindScheduleToPoll),
        ])]);

        assert!(report.is_success());
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn test_failure_partitions_failed_and_completed() {
        let member = MemberId::generate();
        let report = WorkflowReport::from_stages(vec![StageReport::new(vec![
            StepOutcome::success(StepName::PersistSchedule),
            StepOutcome::success(StepName::BindScheduleToPoll),
            StepOutcome::failure(StepName::CreateDefaultVote { member }, "backend down"),
        ])]);

        let failure = report.into_result().unwrap_err();
        assert!(failure.step_failed(StepName::CreateDefaultVote { member }));
        assert!(failure.step_completed(StepName::PersistSchedule));
        assert!(failure.step_completed(StepName::BindScheduleToPoll));
        assert_eq!(failure.failed.len(), 1);
        assert_eq!(failure.completed.len(), 2);
    }

    #[test]
    fn test_failure_display_names_every_failed_step() {
        let member = MemberId::generate();
        let report = WorkflowReport::from_stages(vec![StageReport::new(vec![
            StepOutcome::failure(StepName::PersistSchedule, "disk full"),
            StepOutcome::failure(StepName::CreateDefaultVote { member }, "backend down"),
        ])]);

        let message = report.into_result().unwrap_err().to_string();
        assert!(message.contains("persist schedule: disk full"));
        assert!(message.contains(&member.to_string()));
        assert!(message.starts_with("2 of 2"));
    }

    #[test]
    fn test_outcomes_iterate_in_stage_order() {
        let mut report = WorkflowReport::new();
        report.push_stage(StageReport::new(vec![StepOutcome::success(
            StepName::CollectVoteIds,
        )]));
        report.push_stage(StageReport::new(vec![StepOutcome::success(
            StepName::RemoveVoteAssociations,
        )]));

        let steps: Vec<StepName> = report.outcomes().map(|o| o.step).collect();
        assert_eq!(
            steps,
            vec![StepName::CollectVoteIds, StepName::RemoveVoteAssociations]
        );
    }

    #[test]
    fn test_empty_report_is_success() {
        assert!(WorkflowReport::new().into_result().is_ok());
    }
}
