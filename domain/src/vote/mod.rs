//! Vote subdomain: answers, votes and tallying.

mod entities;
mod tally;

pub use entities::{Answer, InvalidAnswer, Vote};
pub use tally::{SlotSupport, best_slots};
