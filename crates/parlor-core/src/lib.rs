// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Parlor customer-support backend.
//!
//! This crate provides the foundational trait definitions, error type, and
//! domain types used throughout the Parlor workspace. Provider clients and
//! storage backends implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ParlorError;
pub use traits::{CompletionProvider, ConversationStore};
pub use types::{
    Escalation, EscalationTrigger, FaqEntry, Message, MessageRole, Session, SessionStatus, Turn,
};
