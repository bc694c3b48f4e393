//! Stage runner
//!
//! Executes one stage of a lifecycle workflow: a set of independent named
//! sub-operations launched together and joined with a wait-for-all barrier.
//! Nothing cancels an in-flight sibling when one task fails; every task runs
//! to its own completion and all outcomes are collected before the stage
//! resolves.

use futures::future::{BoxFuture, join_all};
use loodle_domain::{StageReport, StepName, StepOutcome};
use std::fmt;
use std::future::Future;

/// One task of a stage, paired with the step identity it reports under.
///
/// A plain [`step`](StageTask::step) yields exactly one outcome. A
/// [`fan_out`](StageTask::fan_out) task expands into several outcomes of its
/// own (e.g. one per member), which lets a stage contain whole sub-groups
/// whose size is only known at runtime.
pub struct StageTask<'a> {
    future: BoxFuture<'a, Vec<StepOutcome>>,
}

impl<'a> StageTask<'a> {
    /// A single named sub-operation.
    pub fn step<F, E>(name: StepName, future: F) -> Self
    where
        F: Future<Output = Result<(), E>> + Send + 'a,
        E: fmt::Display,
    {
        Self {
            future: Box::pin(async move {
                let outcome = match future.await {
                    Ok(()) => StepOutcome::success(name),
                    Err(e) => StepOutcome::failure(name, e.to_string()),
                };
                vec![outcome]
            }),
        }
    }

    /// A sub-operation group that reports its own set of outcomes.
    pub fn fan_out<F>(future: F) -> Self
    where
        F: Future<Output = Vec<StepOutcome>> + Send + 'a,
    {
        Self {
            future: Box::pin(future),
        }
    }
}

/// Runs every task of the stage concurrently and waits for all of them.
pub async fn run_stage(tasks: Vec<StageTask<'_>>) -> StageReport {
    let outcomes = join_all(tasks.into_iter().map(|t| t.future)).await;
    StageReport::new(outcomes.into_iter().flatten().collect())
}
