// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP API gateway for the Parlor support backend.
//!
//! Exposes the chat endpoints over axum and wires them to the
//! conversation store and response engine.

pub mod handlers;
pub mod server;

pub use server::{GatewayState, build_router, start_server};
