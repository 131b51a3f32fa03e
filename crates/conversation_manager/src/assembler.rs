//! Conversation assembly.
//!
//! Derives the ordered, filtered message sequence submitted for
//! completion from the current branch. This is the single place that
//! guarantees the upstream endpoint never receives a zero-message
//! payload, and the single place that prepends the system prompt.

use serde::{Deserialize, Serialize};

use crate::error::AssembleError;
use crate::structs::conversation::Conversation;
use crate::structs::message::{Message, Sender};

/// One `{role, content}` entry of a chat-completion payload.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Sender,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Sender, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

impl From<&Message> for ChatMessage {
    fn from(message: &Message) -> Self {
        Self::new(message.sender, message.text.clone())
    }
}

impl Conversation {
    /// Assemble the message sequence for the next completion request.
    ///
    /// Takes the current branch filtered to included messages. A
    /// non-empty `pending_user_text` is appended as a user message; it is
    /// also appended when the filtered history is empty, so the request
    /// always carries at least one message. The exception: when the
    /// branch has messages but every one is excluded and there is no
    /// pending text, there is nothing meaningful to send and
    /// `EmptyRequest` is returned so the caller can short-circuit before
    /// contacting the gateway.
    ///
    /// A non-blank `system_prompt` is trimmed and prepended as a system
    /// message. This is the only layer that prepends it; the relay
    /// gateway sends the sequence untouched.
    pub fn build_request(
        &self,
        pending_user_text: &str,
        system_prompt: Option<&str>,
    ) -> Result<Vec<ChatMessage>, AssembleError> {
        let branch = self.current_branch();
        let mut messages: Vec<ChatMessage> = branch.included().map(ChatMessage::from).collect();

        if !pending_user_text.is_empty() || messages.is_empty() {
            if pending_user_text.is_empty() && messages.is_empty() && !branch.is_empty() {
                return Err(AssembleError::EmptyRequest);
            }
            messages.push(ChatMessage::new(Sender::User, pending_user_text));
        }

        if let Some(prompt) = system_prompt.map(str::trim).filter(|p| !p.is_empty()) {
            messages.insert(0, ChatMessage::new(Sender::System, prompt));
        }

        Ok(messages)
    }

    /// The included-filtered `{role, content}` view of the current
    /// branch, as shown by the conversation export.
    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.current_branch().included().map(ChatMessage::from).collect()
    }
}
