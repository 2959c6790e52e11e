// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation store trait for persistence backends.

use async_trait::async_trait;

use crate::error::ParlorError;
use crate::types::{Escalation, Message, Session, SessionStatus};

/// Persistence for sessions, messages, and escalation records.
///
/// A session's turn sequence is append-only: messages are inserted, never
/// updated or removed individually. Escalation records always reference an
/// existing session (enforced by the backend). Ordering guarantees for
/// concurrent writes to the same session live here, not in the engine.
#[async_trait]
pub trait ConversationStore: Send + Sync + 'static {
    /// Initializes the backend (migrations, connection setup).
    async fn initialize(&self) -> Result<(), ParlorError>;

    /// Flushes pending writes and releases connections.
    async fn close(&self) -> Result<(), ParlorError>;

    // --- Sessions ---

    async fn create_session(&self, session: &Session) -> Result<(), ParlorError>;

    async fn get_session(&self, id: &str) -> Result<Option<Session>, ParlorError>;

    async fn list_sessions(
        &self,
        status: Option<SessionStatus>,
    ) -> Result<Vec<Session>, ParlorError>;

    /// Advances a session's status. Rejects backward transitions.
    async fn update_session_status(
        &self,
        id: &str,
        status: SessionStatus,
    ) -> Result<(), ParlorError>;

    /// Deletes a session and, by cascade, its messages and escalations.
    ///
    /// Returns `false` when no such session existed.
    async fn delete_session(&self, id: &str) -> Result<bool, ParlorError>;

    // --- Messages ---

    async fn insert_message(&self, message: &Message) -> Result<(), ParlorError>;

    /// Returns a session's turns in chronological order.
    async fn get_messages(
        &self,
        session_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<Message>, ParlorError>;

    // --- Escalations ---

    async fn insert_escalation(&self, escalation: &Escalation) -> Result<(), ParlorError>;

    async fn list_escalations(&self, session_id: &str) -> Result<Vec<Escalation>, ParlorError>;
}
