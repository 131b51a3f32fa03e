//! HTTP request and response bodies.
//!
//! Wire field names are camelCase to match the front-end; internal
//! types stay snake_case.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use conversation_manager::{BranchId, MessageId, Sender};

/// `POST /chat` body: one stateless relay request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub history: Vec<HistoryMessage>,
    #[serde(default)]
    pub llm_base_url: Option<String>,
    #[serde(default)]
    pub system_prompt: Option<String>,
}

/// One prior turn carried in a relay request.
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryMessage {
    pub sender: Sender,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct RelayReply {
    pub reply: String,
}

#[derive(Debug, Deserialize)]
pub struct AddMessageRequest {
    pub sender: Sender,
    pub text: String,
}

/// Partial message update; absent fields are left alone.
#[derive(Debug, Deserialize)]
pub struct UpdateMessageRequest {
    pub text: Option<String>,
    pub sender: Option<Sender>,
    pub included: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBranchRequest {
    /// Branch point in the current branch; omitted for an empty branch.
    #[serde(default)]
    pub from_message_id: Option<MessageId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchBranchRequest {
    pub branch_id: BranchId,
}

/// `POST /sessions/{id}/send` body. Endpoint and system prompt fall back
/// to the stored settings when omitted.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub llm_base_url: Option<String>,
    #[serde(default)]
    pub system_prompt: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCreated {
    pub session_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageCreated {
    pub message_id: MessageId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchCreated {
    pub branch_id: BranchId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendReply {
    pub reply: String,
    pub message_id: MessageId,
}
