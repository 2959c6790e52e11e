// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions at the seams of the Parlor backend.
//!
//! Concrete providers and stores are selected at process construction time;
//! everything inside the core depends only on these traits.

pub mod provider;
pub mod store;

pub use provider::CompletionProvider;
pub use store::ConversationStore;
