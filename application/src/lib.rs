//! Application layer for loodle
//!
//! This crate contains use cases, port definitions, and application
//! configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::BehaviorConfig;
pub use ports::{
    journal::{JournalEntry, NoJournal, WorkflowJournal},
    membership::MembershipProvider,
    store::{ConfigurationStore, PollStore, ScheduleStore, StoreError, VoteStore},
};
pub use use_cases::configure::ConfigurationService;
pub use use_cases::create_poll::{CreatePollError, CreatePollInput, CreatePollUseCase};
pub use use_cases::create_schedule::{
    CreateScheduleError, CreateScheduleInput, CreateScheduleUseCase,
};
pub use use_cases::remove_schedule::{RemoveScheduleError, RemoveScheduleUseCase};
pub use use_cases::update_votes::{UpdateVotesUseCase, VoteMutation};
pub use use_cases::vote_fanout::{DefaultVotesOutcome, VoteFanout};
pub use use_cases::workflow::{StageTask, run_stage};
