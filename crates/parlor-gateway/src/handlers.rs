// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the chat REST API.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use parlor_core::{
    Escalation, EscalationTrigger, Message, MessageRole, ParlorError, Session, SessionStatus, Turn,
};
use parlor_engine::{Reply, TECHNICAL_DIFFICULTY};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use uuid::Uuid;

use crate::server::GatewayState;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

fn internal_error(err: ParlorError) -> Response {
    error!(error = %err, "request failed");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
}

fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

// --- GET /health ---

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

// --- POST /api/chat/create ---

#[derive(Debug, Deserialize, Default)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
    pub status: SessionStatus,
    pub created_at: String,
}

pub async fn create_session(
    State(state): State<GatewayState>,
    body: Option<Json<CreateSessionRequest>>,
) -> Response {
    let Json(body) = body.unwrap_or_default();
    let now = now_iso();
    let session = Session {
        id: Uuid::new_v4().to_string(),
        user_id: body.user_id,
        status: SessionStatus::Active,
        created_at: now.clone(),
        updated_at: now.clone(),
    };
    if let Err(e) = state.store.create_session(&session).await {
        return internal_error(e);
    }
    (
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            session_id: session.id,
            status: session.status,
            created_at: now,
        }),
    )
        .into_response()
}

// --- POST /api/chat/message ---

#[derive(Debug, Deserialize)]
pub struct ChatMessageRequest {
    pub session_id: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatMessageResponse {
    pub session_id: String,
    pub response: String,
    pub confidence_score: f64,
    pub should_escalate: bool,
    pub timestamp: String,
}

pub async fn post_message(
    State(state): State<GatewayState>,
    Json(body): Json<ChatMessageRequest>,
) -> Response {
    let session = match state.store.get_session(&body.session_id).await {
        Ok(Some(session)) => session,
        Ok(None) => return error_response(StatusCode::NOT_FOUND, "session not found"),
        Err(e) => return internal_error(e),
    };
    if session.status != SessionStatus::Active {
        return error_response(
            StatusCode::BAD_REQUEST,
            format!("session is {}, not active", session.status),
        );
    }

    // History is loaded before the new user turn so the engine sees prior
    // turns only; the current message arrives as its own argument.
    let history: Vec<Turn> = match state.store.get_messages(&body.session_id, None).await {
        Ok(messages) => messages.iter().map(Turn::from).collect(),
        Err(e) => return internal_error(e),
    };

    let user_msg = Message {
        id: Uuid::new_v4().to_string(),
        session_id: body.session_id.clone(),
        role: MessageRole::User,
        content: body.message.clone(),
        confidence: None,
        created_at: now_iso(),
    };
    if let Err(e) = state.store.insert_message(&user_msg).await {
        return internal_error(e);
    }

    let reply = match tokio::time::timeout(
        state.generate_timeout,
        state.engine.generate(&body.message, &history),
    )
    .await
    {
        Ok(reply) => reply,
        Err(_) => {
            warn!(session_id = %body.session_id, "generation timed out");
            Reply {
                text: TECHNICAL_DIFFICULTY.to_string(),
                confidence: 0.0,
                escalate: true,
            }
        }
    };

    let timestamp = now_iso();
    let assistant_msg = Message {
        id: Uuid::new_v4().to_string(),
        session_id: body.session_id.clone(),
        role: MessageRole::Assistant,
        content: reply.text.clone(),
        confidence: Some(reply.confidence),
        created_at: timestamp.clone(),
    };
    if let Err(e) = state.store.insert_message(&assistant_msg).await {
        return internal_error(e);
    }

    Json(ChatMessageResponse {
        session_id: body.session_id,
        response: reply.text,
        confidence_score: reply.confidence,
        should_escalate: reply.escalate,
        timestamp,
    })
    .into_response()
}

// --- GET /api/chat/history/{session_id} ---

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub session_id: String,
    pub status: SessionStatus,
    pub messages: Vec<Message>,
}

pub async fn get_history(
    State(state): State<GatewayState>,
    Path(session_id): Path<String>,
) -> Response {
    let session = match state.store.get_session(&session_id).await {
        Ok(Some(session)) => session,
        Ok(None) => return error_response(StatusCode::NOT_FOUND, "session not found"),
        Err(e) => return internal_error(e),
    };
    let messages = match state.store.get_messages(&session_id, None).await {
        Ok(messages) => messages,
        Err(e) => return internal_error(e),
    };
    Json(HistoryResponse {
        session_id,
        status: session.status,
        messages,
    })
    .into_response()
}

// --- POST /api/chat/escalate ---

#[derive(Debug, Deserialize)]
pub struct EscalateRequest {
    pub session_id: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub trigger: Option<EscalationTrigger>,
    #[serde(default)]
    pub agent_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EscalateResponse {
    pub session_id: String,
    pub escalated: bool,
    pub summary: String,
    pub escalated_at: String,
}

pub async fn escalate_session(
    State(state): State<GatewayState>,
    Json(body): Json<EscalateRequest>,
) -> Response {
    let session = match state.store.get_session(&body.session_id).await {
        Ok(Some(session)) => session,
        Ok(None) => return error_response(StatusCode::NOT_FOUND, "session not found"),
        Err(e) => return internal_error(e),
    };
    if session.status == SessionStatus::Closed {
        return error_response(StatusCode::BAD_REQUEST, "session is closed");
    }

    let history: Vec<Turn> = match state.store.get_messages(&body.session_id, None).await {
        Ok(messages) => messages.iter().map(Turn::from).collect(),
        Err(e) => return internal_error(e),
    };
    let summary = state.engine.summarize(&history).await;

    let escalated_at = now_iso();
    let escalation = Escalation {
        id: Uuid::new_v4().to_string(),
        session_id: body.session_id.clone(),
        trigger: body.trigger.unwrap_or(EscalationTrigger::CustomerDriven),
        reason: body.reason.unwrap_or_else(|| summary.clone()),
        agent_id: body.agent_id,
        created_at: escalated_at.clone(),
    };
    if let Err(e) = state.store.insert_escalation(&escalation).await {
        return internal_error(e);
    }
    if session.status == SessionStatus::Active {
        if let Err(e) = state
            .store
            .update_session_status(&body.session_id, SessionStatus::Escalated)
            .await
        {
            return internal_error(e);
        }
    }

    Json(EscalateResponse {
        session_id: body.session_id,
        escalated: true,
        summary,
        escalated_at,
    })
    .into_response()
}

// --- DELETE /api/chat/{session_id} ---

pub async fn delete_session(
    State(state): State<GatewayState>,
    Path(session_id): Path<String>,
) -> Response {
    match state.store.delete_session(&session_id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => error_response(StatusCode::NOT_FOUND, "session not found"),
        Err(e) => internal_error(e),
    }
}
