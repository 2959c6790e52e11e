// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Parlor integration tests.
//!
//! Provides mock providers and test harness infrastructure for fast,
//! deterministic, CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockCompletion`] - mock completion provider with queued responses
//!   and failure injection
//! - [`TestHarness`] - assembled store + engine over a temp SQLite database

pub mod harness;
pub mod mock_provider;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_provider::MockCompletion;
