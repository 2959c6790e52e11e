// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini completion provider.

pub mod client;
pub mod types;

pub use client::GeminiClient;
