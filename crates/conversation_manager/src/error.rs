//! Conversation error types

use thiserror::Error;

use crate::structs::branch::BranchId;
use crate::structs::message::MessageId;

/// Errors from message and branch lifecycle operations.
///
/// These indicate a caller referenced an id that is not there; if the
/// invariants hold they never surface to an end user.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConversationError {
    #[error("message {0} not found in current branch")]
    MessageNotFound(MessageId),

    #[error("branch {0} not found")]
    BranchNotFound(BranchId),
}

/// Raised by request assembly when there is nothing to submit.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AssembleError {
    #[error("no messages selected for completion")]
    EmptyRequest,
}

pub type Result<T, E = ConversationError> = std::result::Result<T, E>;
