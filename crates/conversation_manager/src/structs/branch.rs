use std::fmt;

use serde::{Deserialize, Serialize};

use crate::structs::message::{Message, MessageId};

/// Process-unique branch identifier, drawn from its own counter,
/// independent of message ids.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(transparent)]
pub struct BranchId(pub(crate) u64);

impl fmt::Display for BranchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "branch-{}", self.0)
    }
}

/// One independently mutable line of conversation.
///
/// Branching copies message fields but keeps message ids, so two branches
/// can hold messages with equal ids that evolve separately.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Branch {
    pub id: BranchId,
    pub messages: Vec<Message>,
}

impl Branch {
    /// Look up a message by id.
    pub fn message(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub(crate) fn message_mut(&mut self, id: MessageId) -> Option<&mut Message> {
        self.messages.iter_mut().find(|m| m.id == id)
    }

    /// Index of a message within this branch.
    pub fn position(&self, id: MessageId) -> Option<usize> {
        self.messages.iter().position(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Messages flagged for inclusion in the next completion request.
    pub fn included(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| m.included)
    }
}
