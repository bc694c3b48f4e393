//! Journal infrastructure: durable workflow report records.
//!
//! Provides [`JsonlWorkflowJournal`], a JSONL file writer that implements
//! the [`WorkflowJournal`](loodle_application::WorkflowJournal) port.

mod jsonl;

pub use jsonl::JsonlWorkflowJournal;
