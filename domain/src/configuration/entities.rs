//! Configuration entity - per-member notification preferences on a poll.

use crate::core::ids::{MemberId, PollId};
use serde::{Deserialize, Serialize};

/// Notification preferences of one member on one poll.
///
/// There is one row per (poll, member) pair. Its lifecycle is independent
/// from schedules and votes: it is created alongside membership and survives
/// any schedule churn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub poll_id: PollId,
    pub member_id: MemberId,
    pub notification: bool,
    pub notification_by_email: bool,
}

impl Configuration {
    /// Creates the default configuration a member receives when joining a
    /// poll: all notification flags off.
    pub fn default_for(member_id: MemberId, poll_id: PollId) -> Self {
        Self {
            poll_id,
            member_id,
            notification: false,
            notification_by_email: false,
        }
    }

    /// Returns a copy with updated notification flags.
    pub fn with_flags(mut self, notification: bool, notification_by_email: bool) -> Self {
        self.notification = notification;
        self.notification_by_email = notification_by_email;
        self
    }
}
