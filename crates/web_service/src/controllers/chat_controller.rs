//! Stateless chat relay: history arrives in the request, one completion
//! goes out, nothing is stored.

use actix_web::{web, HttpResponse};
use log::info;

use llm_gateway::ApiMessage;

use crate::error::{AppError, Result};
use crate::models::{RelayReply, RelayRequest};
use crate::server::AppState;

pub async fn relay_chat(
    app_state: web::Data<AppState>,
    body: web::Json<RelayRequest>,
) -> Result<HttpResponse> {
    let body = body.into_inner();

    if body.message.is_empty() && body.history.is_empty() {
        return Err(AppError::Validation("Message is required".to_string()));
    }

    let mut messages: Vec<ApiMessage> = body
        .history
        .iter()
        .map(|m| ApiMessage::new(m.sender.as_role(), m.text.clone()))
        .collect();
    if !body.message.is_empty() {
        messages.push(ApiMessage::new("user", body.message));
    }
    // The single system-prompt prepend for this surface; the gateway
    // sends the sequence untouched.
    if let Some(prompt) = body
        .system_prompt
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
    {
        messages.insert(0, ApiMessage::new("system", prompt));
    }

    info!("Relaying chat request with {} messages", messages.len());

    let reply = app_state
        .gateway
        .complete(messages, body.llm_base_url.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(RelayReply { reply }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/chat", web::post().to(relay_chat));
}
