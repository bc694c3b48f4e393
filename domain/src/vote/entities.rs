//! Vote entity - one member's answer for one schedule.

use crate::core::ids::{MemberId, PollId, ScheduleId, VoteId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Raised when an answer string is not one of the supported values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{0}' is not a valid answer (expected yes, no or if-needed)")]
pub struct InvalidAnswer(pub String);

/// A member's answer for one candidate slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Answer {
    Yes,
    /// Newly created default votes start undecided-leaning-no.
    #[default]
    No,
    IfNeeded,
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Yes => write!(f, "yes"),
            Answer::No => write!(f, "no"),
            Answer::IfNeeded => write!(f, "if-needed"),
        }
    }
}

impl FromStr for Answer {
    type Err = InvalidAnswer;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" => Ok(Answer::Yes),
            "no" => Ok(Answer::No),
            "if-needed" | "if_needed" | "ifneeded" => Ok(Answer::IfNeeded),
            _ => Err(InvalidAnswer(s.to_string())),
        }
    }
}

/// One member's vote on one schedule of a poll.
///
/// A schedule's vote set holds at most one vote per member; the store
/// adapter enforces that on creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub id: VoteId,
    pub poll_id: PollId,
    pub schedule_id: ScheduleId,
    pub member_id: MemberId,
    pub answer: Answer,
}

impl Vote {
    /// Creates a vote with a freshly generated id.
    pub fn new(
        poll_id: PollId,
        schedule_id: ScheduleId,
        member_id: MemberId,
        answer: Answer,
    ) -> Self {
        Self {
            id: VoteId::generate(),
            poll_id,
            schedule_id,
            member_id,
            answer,
        }
    }

    /// Creates the default vote a member receives when a schedule is added.
    pub fn default_for(poll_id: PollId, schedule_id: ScheduleId, member_id: MemberId) -> Self {
        Self::new(poll_id, schedule_id, member_id, Answer::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_answer_is_no() {
        let vote = Vote::default_for(
            PollId::generate(),
            ScheduleId::generate(),
            MemberId::generate(),
        );
        assert_eq!(vote.answer, Answer::No);
    }

    #[test]
    fn test_answer_parsing() {
        assert_eq!("yes".parse::<Answer>().unwrap(), Answer::Yes);
        assert_eq!("No".parse::<Answer>().unwrap(), Answer::No);
        assert_eq!("if-needed".parse::<Answer>().unwrap(), Answer::IfNeeded);
        assert_eq!("if_needed".parse::<Answer>().unwrap(), Answer::IfNeeded);
        assert!("maybe".parse::<Answer>().is_err());
    }

    #[test]
    fn test_answer_display_round_trips() {
        for answer in [Answer::Yes, Answer::No, Answer::IfNeeded] {
            assert_eq!(answer.to_string().parse::<Answer>().unwrap(), answer);
        }
    }
}
