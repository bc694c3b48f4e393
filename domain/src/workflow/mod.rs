//! Workflow reporting: staged sub-operation outcomes of lifecycle calls.
//!
//! The dependency structure of a lifecycle call (which sub-operations run
//! concurrently, which are ordered) is represented as data: stages of named
//! steps. These types hold the result side of that structure.

mod report;
mod step;

pub use report::{StageReport, WorkflowFailure, WorkflowReport};
pub use step::{StepName, StepOutcome};
