//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases
//! behave, such as the answer seeded into default votes.

use loodle_domain::Answer;

/// Application behavior configuration.
///
/// Controls runtime behavior of use cases, independent of where the values
/// were loaded from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BehaviorConfig {
    /// Answer written into every default vote created alongside a schedule.
    pub default_answer: Answer,
}

impl BehaviorConfig {
    /// Creates a BehaviorConfig seeding default votes with the given answer.
    pub fn with_default_answer(answer: Answer) -> Self {
        Self {
            default_answer: answer,
        }
    }
}
