use std::fmt;

use serde::{Deserialize, Serialize};

/// Originator of a chat message.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
    System,
}

impl Sender {
    /// Wire name used in chat-completion payloads.
    pub fn as_role(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "assistant",
            Sender::System => "system",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_role())
    }
}

/// Process-unique message identifier. Assigned once from a monotonic
/// counter, never reused, never mutated. Branch copies keep the id of the
/// message they were copied from.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(transparent)]
pub struct MessageId(pub(crate) u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "msg-{}", self.0)
    }
}

/// A single chat message.
///
/// `id` is immutable; everything else can change after creation (inline
/// edit, role toggle, inclusion toggle). `included` gates whether the
/// message is sent on the next completion request.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Message {
    pub id: MessageId,
    pub sender: Sender,
    pub text: String,
    pub included: bool,
}

impl Message {
    pub(crate) fn new(id: MessageId, sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id,
            sender,
            text: text.into(),
            included: true,
        }
    }
}
