// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `parlor serve` command implementation.
//!
//! Wires the configured provider, SQLite store, and response engine into
//! the HTTP gateway and serves until the process is stopped.

use std::sync::Arc;
use std::time::Duration;

use parlor_config::model::{ParlorConfig, ProviderMode};
use parlor_core::{CompletionProvider, ConversationStore, ParlorError};
use parlor_engine::{FaqMatcher, MockResponder, ResponseGenerator};
use parlor_gateway::GatewayState;
use parlor_gemini::GeminiClient;
use parlor_openai::OpenAiClient;
use parlor_storage::SqliteStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Run the `parlor serve` command.
pub async fn run_serve(config: ParlorConfig) -> Result<(), ParlorError> {
    init_tracing(&config.agent.log_level);

    let store: Arc<dyn ConversationStore> = Arc::new(SqliteStore::new(config.storage.clone()));
    store.initialize().await?;

    let faq = FaqMatcher::load(&config.faq, config.engine.faq_file.as_deref());
    info!(entries = faq.len(), "FAQ table loaded");

    let engine = Arc::new(build_engine(&config, faq)?);
    info!(
        mode = %config.provider.mode,
        threshold = config.engine.confidence_threshold,
        "response engine ready"
    );

    let state = GatewayState::new(
        store,
        engine,
        Duration::from_secs(config.gateway.generate_timeout_secs),
    );
    parlor_gateway::start_server(&config.gateway, state).await
}

fn build_engine(config: &ParlorConfig, faq: FaqMatcher) -> Result<ResponseGenerator, ParlorError> {
    let engine_cfg = config.engine.clone();
    match config.provider.mode {
        ProviderMode::Mock => Ok(ResponseGenerator::mock(
            engine_cfg,
            faq,
            MockResponder::new(),
        )),
        ProviderMode::Gemini => {
            let provider: Arc<dyn CompletionProvider> =
                Arc::new(GeminiClient::new(&config.gemini)?);
            Ok(ResponseGenerator::hosted(engine_cfg, faq, provider))
        }
        ProviderMode::Openai => {
            let provider: Arc<dyn CompletionProvider> =
                Arc::new(OpenAiClient::new(&config.openai)?);
            Ok(ResponseGenerator::hosted(engine_cfg, faq, provider))
        }
    }
}

/// Initializes the tracing subscriber from the configured log level.
///
/// RUST_LOG takes precedence when set.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
