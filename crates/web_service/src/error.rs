use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use log::error;
use serde_json::json;
use thiserror::Error;

use conversation_manager::{AssembleError, ConversationError};
use llm_gateway::GatewayError;
use settings_manager::SettingsError;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Request body failed validation; reported as plain text like the
    /// original chat surface.
    #[error("{0}")]
    Validation(String),

    #[error("Session '{0}' not found")]
    SessionNotFound(uuid::Uuid),

    #[error(transparent)]
    Conversation(#[from] ConversationError),

    #[error(transparent)]
    EmptyRequest(#[from] AssembleError),

    #[error(transparent)]
    Completion(#[from] GatewayError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

#[derive(serde::Serialize)]
struct JsonError {
    error: String,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::EmptyRequest(_) => StatusCode::BAD_REQUEST,
            AppError::SessionNotFound(_) | AppError::Conversation(_) => StatusCode::NOT_FOUND,
            AppError::Completion(_) | AppError::Settings(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(message) => HttpResponse::BadRequest().body(message.clone()),
            AppError::Completion(e) => {
                // Expected in production: degrade to the fixed body the
                // front-end renders as a synthetic assistant message.
                error!("LLM relay via {} failed: {}", e.endpoint(), e);
                HttpResponse::InternalServerError().json(json!({
                    "error": "Failed to get response from LLM"
                }))
            }
            _ => HttpResponse::build(self.status_code()).json(JsonError {
                error: self.to_string(),
            }),
        }
    }
}
