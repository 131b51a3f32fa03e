use serde::{Deserialize, Serialize};

use crate::error::{ConversationError, Result};
use crate::structs::branch::{Branch, BranchId};
use crate::structs::message::{Message, MessageId, Sender};

/// A complete conversational session: the ordered branch collection, the
/// current-branch pointer, and the id counters for messages and branches.
///
/// Invariants: the collection is never empty and `current` always names a
/// member. Callers serialize access; there is no interior locking.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Conversation {
    branches: Vec<Branch>,
    current: BranchId,
    next_message_id: u64,
    next_branch_id: u64,
}

impl Conversation {
    /// Start with a single empty branch, which is current.
    pub fn new() -> Self {
        let mut conversation = Self {
            branches: Vec::new(),
            current: BranchId(0),
            next_message_id: 0,
            next_branch_id: 0,
        };
        conversation.current = conversation.push_branch(Vec::new());
        conversation
    }

    fn push_branch(&mut self, messages: Vec<Message>) -> BranchId {
        let id = BranchId(self.next_branch_id);
        self.next_branch_id += 1;
        self.branches.push(Branch { id, messages });
        id
    }

    fn alloc_message_id(&mut self) -> MessageId {
        let id = MessageId(self.next_message_id);
        self.next_message_id += 1;
        id
    }

    /// All branches, in insertion order.
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn current_branch_id(&self) -> BranchId {
        self.current
    }

    pub fn current_branch(&self) -> &Branch {
        self.branches
            .iter()
            .find(|b| b.id == self.current)
            .expect("current branch is always a member of the collection")
    }

    fn current_branch_mut(&mut self) -> &mut Branch {
        let current = self.current;
        self.branches
            .iter_mut()
            .find(|b| b.id == current)
            .expect("current branch is always a member of the collection")
    }

    /// Append a message to the current branch and return its id.
    pub fn add_message(&mut self, sender: Sender, text: impl Into<String>) -> MessageId {
        let id = self.alloc_message_id();
        let message = Message::new(id, sender, text);
        tracing::debug!(
            branch = %self.current,
            message = %id,
            sender = %sender,
            "appending message"
        );
        self.current_branch_mut().messages.push(message);
        id
    }

    /// Replace the text of a message in the current branch.
    pub fn set_text(&mut self, id: MessageId, text: impl Into<String>) -> Result<()> {
        let message = self
            .current_branch_mut()
            .message_mut(id)
            .ok_or(ConversationError::MessageNotFound(id))?;
        message.text = text.into();
        Ok(())
    }

    /// Change the sender of a message in the current branch (role toggle).
    pub fn set_sender(&mut self, id: MessageId, sender: Sender) -> Result<()> {
        let message = self
            .current_branch_mut()
            .message_mut(id)
            .ok_or(ConversationError::MessageNotFound(id))?;
        message.sender = sender;
        Ok(())
    }

    /// Flag whether a message is sent on the next completion request.
    pub fn set_included(&mut self, id: MessageId, included: bool) -> Result<()> {
        let message = self
            .current_branch_mut()
            .message_mut(id)
            .ok_or(ConversationError::MessageNotFound(id))?;
        message.included = included;
        Ok(())
    }

    /// Remove a message from the current branch; the order of the
    /// remainder is preserved.
    pub fn remove_message(&mut self, id: MessageId) -> Result<()> {
        let branch = self.current_branch_mut();
        let index = branch
            .position(id)
            .ok_or(ConversationError::MessageNotFound(id))?;
        branch.messages.remove(index);
        Ok(())
    }

    /// Create a branch and make it current.
    ///
    /// With `from`, the new branch starts as a copy of the current branch
    /// up to and including that message. The copies keep their message
    /// ids but are otherwise independent (deep copy of fields). An id
    /// that is not in the current branch yields an empty branch rather
    /// than an error.
    pub fn create_branch(&mut self, from: Option<MessageId>) -> BranchId {
        let messages = match from.and_then(|id| self.current_branch().position(id)) {
            Some(index) => self.current_branch().messages[..=index].to_vec(),
            None => Vec::new(),
        };
        let copied = messages.len();
        let id = self.push_branch(messages);
        self.current = id;
        tracing::info!(branch = %id, copied, "created branch");
        id
    }

    /// Make an existing branch current.
    pub fn switch_branch(&mut self, id: BranchId) -> Result<()> {
        if !self.branches.iter().any(|b| b.id == id) {
            return Err(ConversationError::BranchNotFound(id));
        }
        self.current = id;
        tracing::debug!(branch = %id, "switched branch");
        Ok(())
    }

    /// Delete a branch.
    ///
    /// Deleting the last remaining branch replaces it with a fresh empty
    /// one under a new id, so the collection is never empty. Deleting the
    /// current branch moves `current` to the first branch in stored
    /// order. Confirmation prompts are a UI concern and happen before
    /// this call.
    pub fn delete_branch(&mut self, id: BranchId) -> Result<()> {
        let index = self
            .branches
            .iter()
            .position(|b| b.id == id)
            .ok_or(ConversationError::BranchNotFound(id))?;

        if self.branches.len() == 1 {
            self.branches.clear();
            self.current = self.push_branch(Vec::new());
            tracing::info!(branch = %id, replacement = %self.current, "cleared sole branch");
            return Ok(());
        }

        self.branches.remove(index);
        if self.current == id {
            self.current = self.branches[0].id;
        }
        tracing::info!(branch = %id, current = %self.current, "deleted branch");
        Ok(())
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
