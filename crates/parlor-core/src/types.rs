// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Parlor workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Lifecycle status of a support session.
///
/// Transitions are forward-only: there is no path back from
/// `Escalated` or `Closed` to `Active`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Active,
    Escalated,
    Closed,
}

impl SessionStatus {
    /// Whether a transition from `self` to `next` moves forward.
    ///
    /// Reactivation is not modeled: any move back to `Active` is rejected.
    pub fn can_transition_to(self, next: SessionStatus) -> bool {
        match (self, next) {
            (SessionStatus::Active, _) => true,
            (_, SessionStatus::Active) => false,
            (SessionStatus::Escalated, SessionStatus::Closed) => true,
            (a, b) => a == b,
        }
    }
}

/// Role of the author of a conversation turn.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

/// What caused a session to be handed to a human.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EscalationTrigger {
    CustomerDriven,
    AiInitiated,
    BusinessDriven,
}

/// A persisted support session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Session identifier (UUID v4).
    pub id: String,
    /// Optional end-user identifier supplied at creation.
    pub user_id: Option<String>,
    /// Current lifecycle status.
    pub status: SessionStatus,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
    /// ISO 8601 last-update timestamp.
    pub updated_at: String,
}

/// A persisted conversation turn. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Message identifier (UUID v4).
    pub id: String,
    /// Owning session.
    pub session_id: String,
    /// Author role.
    pub role: MessageRole,
    /// Turn text.
    pub content: String,
    /// Confidence score: present only on assistant turns.
    pub confidence: Option<f64>,
    /// ISO 8601 creation timestamp. Turns are ordered by this within a session.
    pub created_at: String,
}

/// A hand-off event. Written exactly once per escalation, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Escalation {
    /// Escalation identifier (UUID v4).
    pub id: String,
    /// The escalated session. Always references an existing session.
    pub session_id: String,
    /// Who drove the hand-off.
    pub trigger: EscalationTrigger,
    /// Free-text reason.
    pub reason: String,
    /// Human agent the session was assigned to, if known.
    pub agent_id: Option<String>,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
}

/// A lightweight view of a conversation turn handed to the response engine.
///
/// Derived from stored [`Message`]s; the engine never sees ids or timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// Author role.
    pub role: MessageRole,
    /// Turn text.
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

impl From<&Message> for Turn {
    fn from(msg: &Message) -> Self {
        Self {
            role: msg.role,
            content: msg.content.clone(),
        }
    }
}

/// One FAQ lookup-table entry. Static after load, read-only thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqEntry {
    /// Keywords matched case-insensitively as substrings of the query.
    pub keywords: Vec<String>,
    /// The canned answer returned verbatim on a match.
    pub answer: String,
}
