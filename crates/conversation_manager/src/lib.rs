//! Branching conversation data layer.
//!
//! Owns the in-memory state of a chat session: message identity, the
//! ordered collection of branches, branch lifecycle transitions, and the
//! assembly of the message sequence submitted for completion. Rendering,
//! persistence, and network transport live elsewhere; this crate is pure
//! data with structured tracing on mutations.

pub mod assembler;
pub mod error;
pub mod structs;

pub use assembler::ChatMessage;
pub use error::{AssembleError, ConversationError};
pub use structs::branch::{Branch, BranchId};
pub use structs::conversation::Conversation;
pub use structs::message::{Message, MessageId, Sender};
