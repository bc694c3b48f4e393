//! Infrastructure layer for loodle
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod journal;
pub mod store;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig, FileJournalConfig, FileVotesConfig};
pub use journal::JsonlWorkflowJournal;
pub use store::InMemoryStore;
