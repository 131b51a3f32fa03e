//! Session API: the conversation data layer exposed over HTTP.
//!
//! One route per lifecycle operation. Handlers take the per-session
//! write lock for the duration of a mutation; the gateway call in
//! `send_message` happens with the lock released.

use actix_web::{web, HttpResponse};
use log::info;
use uuid::Uuid;

use conversation_manager::{BranchId, ConversationError, MessageId, Sender};
use llm_gateway::ApiMessage;

use crate::error::{AppError, Result};
use crate::models::{
    AddMessageRequest, BranchCreated, CreateBranchRequest, MessageCreated, SendReply, SendRequest,
    SessionCreated, SwitchBranchRequest, UpdateMessageRequest,
};
use crate::server::AppState;
use crate::sessions::SharedConversation;

async fn conversation(app_state: &AppState, id: Uuid) -> Result<SharedConversation> {
    app_state
        .sessions
        .get(id)
        .await
        .ok_or(AppError::SessionNotFound(id))
}

pub async fn create_session(app_state: web::Data<AppState>) -> Result<HttpResponse> {
    let session_id = app_state.sessions.create().await;
    info!("Created chat session {session_id}");
    Ok(HttpResponse::Ok().json(SessionCreated { session_id }))
}

pub async fn get_session(
    app_state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let conversation = conversation(&app_state, *path).await?;
    let snapshot = conversation.read().await.clone();
    Ok(HttpResponse::Ok().json(snapshot))
}

pub async fn delete_session(
    app_state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let session_id = *path;
    if !app_state.sessions.remove(session_id).await {
        return Err(AppError::SessionNotFound(session_id));
    }
    info!("Dropped chat session {session_id}");
    Ok(HttpResponse::NoContent().finish())
}

pub async fn add_message(
    app_state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<AddMessageRequest>,
) -> Result<HttpResponse> {
    let body = body.into_inner();
    let conversation = conversation(&app_state, *path).await?;
    let message_id = conversation.write().await.add_message(body.sender, body.text);
    Ok(HttpResponse::Ok().json(MessageCreated { message_id }))
}

pub async fn update_message(
    app_state: web::Data<AppState>,
    path: web::Path<(Uuid, MessageId)>,
    body: web::Json<UpdateMessageRequest>,
) -> Result<HttpResponse> {
    let (session_id, message_id) = path.into_inner();
    let body = body.into_inner();
    let conversation = conversation(&app_state, session_id).await?;
    let mut conversation = conversation.write().await;

    if let Some(text) = body.text {
        conversation.set_text(message_id, text)?;
    }
    if let Some(sender) = body.sender {
        conversation.set_sender(message_id, sender)?;
    }
    if let Some(included) = body.included {
        conversation.set_included(message_id, included)?;
    }

    let message = conversation
        .current_branch()
        .message(message_id)
        .ok_or(ConversationError::MessageNotFound(message_id))?;
    Ok(HttpResponse::Ok().json(message))
}

pub async fn remove_message(
    app_state: web::Data<AppState>,
    path: web::Path<(Uuid, MessageId)>,
) -> Result<HttpResponse> {
    let (session_id, message_id) = path.into_inner();
    let conversation = conversation(&app_state, session_id).await?;
    conversation.write().await.remove_message(message_id)?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn create_branch(
    app_state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<CreateBranchRequest>,
) -> Result<HttpResponse> {
    let conversation = conversation(&app_state, *path).await?;
    let branch_id = conversation.write().await.create_branch(body.from_message_id);
    Ok(HttpResponse::Ok().json(BranchCreated { branch_id }))
}

pub async fn switch_branch(
    app_state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<SwitchBranchRequest>,
) -> Result<HttpResponse> {
    let conversation = conversation(&app_state, *path).await?;
    conversation.write().await.switch_branch(body.branch_id)?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn delete_branch(
    app_state: web::Data<AppState>,
    path: web::Path<(Uuid, BranchId)>,
) -> Result<HttpResponse> {
    let (session_id, branch_id) = path.into_inner();
    let conversation = conversation(&app_state, session_id).await?;
    conversation.write().await.delete_branch(branch_id)?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn transcript(
    app_state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let conversation = conversation(&app_state, *path).await?;
    let transcript = conversation.read().await.transcript();
    Ok(HttpResponse::Ok().json(transcript))
}

/// Full send flow: assemble, optimistically append, relay, append reply.
pub async fn send_message(
    app_state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<SendRequest>,
) -> Result<HttpResponse> {
    let body = body.into_inner();
    let conversation = conversation(&app_state, *path).await?;

    let settings = app_state.settings.get().await;
    let base_url = body.llm_base_url.unwrap_or(settings.llm_base_url);
    let system_prompt = body.system_prompt.unwrap_or(settings.system_prompt);

    // Assemble from the pre-append state so the pending text appears in
    // the request exactly once, then append it so a failed call still
    // leaves the user's message in the branch.
    let request = {
        let mut conversation = conversation.write().await;
        let request = conversation.build_request(&body.message, Some(system_prompt.as_str()))?;
        if !body.message.is_empty() {
            conversation.add_message(Sender::User, body.message);
        }
        request
    };

    let messages = request
        .into_iter()
        .map(|m| ApiMessage::new(m.role.as_role(), m.content))
        .collect();

    let reply = app_state
        .gateway
        .complete(messages, Some(base_url.as_str()))
        .await?;

    let message_id = conversation
        .write()
        .await
        .add_message(Sender::Assistant, reply.clone());

    Ok(HttpResponse::Ok().json(SendReply { reply, message_id }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/sessions")
            .route("", web::post().to(create_session))
            .route("/{session_id}", web::get().to(get_session))
            .route("/{session_id}", web::delete().to(delete_session))
            .route("/{session_id}/messages", web::post().to(add_message))
            .route(
                "/{session_id}/messages/{message_id}",
                web::patch().to(update_message),
            )
            .route(
                "/{session_id}/messages/{message_id}",
                web::delete().to(remove_message),
            )
            .route("/{session_id}/branches", web::post().to(create_branch))
            .route(
                "/{session_id}/branches/current",
                web::put().to(switch_branch),
            )
            .route(
                "/{session_id}/branches/{branch_id}",
                web::delete().to(delete_branch),
            )
            .route("/{session_id}/transcript", web::get().to(transcript))
            .route("/{session_id}/send", web::post().to(send_message)),
    );
}
