//! Vote tallying - resolving a poll to the slot(s) with the best support.

use crate::core::ids::ScheduleId;
use crate::vote::entities::{Answer, Vote};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Aggregated support for one candidate slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSupport {
    pub schedule_id: ScheduleId,
    pub yes: usize,
    pub if_needed: usize,
    pub no: usize,
}

impl SlotSupport {
    fn new(schedule_id: ScheduleId) -> Self {
        Self {
            schedule_id,
            yes: 0,
            if_needed: 0,
            no: 0,
        }
    }

    fn count(&mut self, answer: Answer) {
        match answer {
            Answer::Yes => self.yes += 1,
            Answer::IfNeeded => self.if_needed += 1,
            Answer::No => self.no += 1,
        }
    }

    /// Total number of votes counted for this slot.
    pub fn total(&self) -> usize {
        self.yes + self.if_needed + self.no
    }

    /// Tallies a vote list into per-slot support, one entry per schedule,
    /// ordered by first appearance in the input.
    pub fn tally(votes: &[Vote]) -> Vec<SlotSupport> {
        let mut supports: Vec<SlotSupport> = Vec::new();
        let mut index: HashMap<ScheduleId, usize> = HashMap::new();

        for vote in votes {
            let i = *index.entry(vote.schedule_id).or_insert_with(|| {
                supports.push(SlotSupport::new(vote.schedule_id));
                supports.len() - 1
            });
            supports[i].count(vote.answer);
        }

        supports
    }
}

/// Returns the slot(s) with the best support.
///
/// Slots are ranked by yes count, with if-needed count as the tie-break;
/// all slots tied on both counts are returned, in input order.
pub fn best_slots(supports: &[SlotSupport]) -> Vec<ScheduleId> {
    let best = supports
        .iter()
        .map(|s| (s.yes, s.if_needed))
        .max()
        .unwrap_or((0, 0));

    supports
        .iter()
        .filter(|s| (s.yes, s.if_needed) == best)
        .map(|s| s.schedule_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ids::{MemberId, PollId};

    fn votes_for(schedule: ScheduleId, answers: &[Answer]) -> Vec<Vote> {
        let poll = PollId::generate();
        answers
            .iter()
            .map(|&answer| Vote::new(poll, schedule, MemberId::generate(), answer))
            .collect()
    }

    #[test]
    fn test_tally_counts_per_slot() {
        let slot = ScheduleId::generate();
        let votes = votes_for(slot, &[Answer::Yes, Answer::Yes, Answer::No, Answer::IfNeeded]);

        let supports = SlotSupport::tally(&votes);
        assert_eq!(supports.len(), 1);
        assert_eq!(supports[0].yes, 2);
        assert_eq!(supports[0].if_needed, 1);
        assert_eq!(supports[0].no, 1);
        assert_eq!(supports[0].total(), 4);
    }

    #[test]
    fn test_best_slot_wins_on_yes_count() {
        let a = ScheduleId::generate();
        let b = ScheduleId::generate();
        let mut votes = votes_for(a, &[Answer::Yes, Answer::Yes]);
        votes.extend(votes_for(b, &[Answer::Yes, Answer::No]));

        let supports = SlotSupport::tally(&votes);
        assert_eq!(best_slots(&supports), vec![a]);
    }

    #[test]
    fn test_if_needed_breaks_yes_ties() {
        let a = ScheduleId::generate();
        let b = ScheduleId::generate();
        let mut votes = votes_for(a, &[Answer::Yes, Answer::No]);
        votes.extend(votes_for(b, &[Answer::Yes, Answer::IfNeeded]));

        let supports = SlotSupport::tally(&votes);
        assert_eq!(best_slots(&supports), vec![b]);
    }

    #[test]
    fn test_full_ties_return_every_winner() {
        let a = ScheduleId::generate();
        let b = ScheduleId::generate();
        let mut votes = votes_for(a, &[Answer::Yes]);
        votes.extend(votes_for(b, &[Answer::Yes]));

        let supports = SlotSupport::tally(&votes);
        assert_eq!(best_slots(&supports), vec![a, b]);
    }

    #[test]
    fn test_empty_tally_has_no_winner() {
        assert!(SlotSupport::tally(&[]).is_empty());
        assert!(best_slots(&[]).is_empty());
    }
}
