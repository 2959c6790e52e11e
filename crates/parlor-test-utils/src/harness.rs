// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles a real SQLite store in a temp directory plus a
//! response generator, and provides `send_message()` to drive the full
//! store-and-generate pipeline the way the gateway does.

use std::sync::Arc;

use parlor_config::model::{EngineConfig, StorageConfig};
use parlor_core::{
    ConversationStore, FaqEntry, Message, MessageRole, ParlorError, Session, SessionStatus, Turn,
};
use parlor_engine::{FaqMatcher, MockResponder, Reply, ResponseGenerator};
use parlor_storage::SqliteStore;
use uuid::Uuid;

use crate::mock_provider::MockCompletion;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    engine_config: EngineConfig,
    faq: Vec<FaqEntry>,
    hosted_responses: Option<Vec<String>>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            engine_config: EngineConfig::default(),
            faq: Vec::new(),
            hosted_responses: None,
        }
    }

    /// Override the engine configuration.
    pub fn with_engine_config(mut self, config: EngineConfig) -> Self {
        self.engine_config = config;
        self
    }

    /// Add a FAQ entry.
    pub fn with_faq(mut self, keywords: Vec<&str>, answer: &str) -> Self {
        self.faq.push(FaqEntry {
            keywords: keywords.into_iter().map(String::from).collect(),
            answer: answer.to_string(),
        });
        self
    }

    /// Use a hosted-style backend driven by a [`MockCompletion`] queue
    /// instead of the canned mock responder.
    pub fn with_hosted_responses(mut self, responses: Vec<String>) -> Self {
        self.hosted_responses = Some(responses);
        self
    }

    /// Build the harness: temp SQLite database, initialized store, engine.
    pub async fn build(self) -> Result<TestHarness, ParlorError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| ParlorError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db");

        let store = Arc::new(SqliteStore::new(StorageConfig {
            database_path: db_path.to_string_lossy().to_string(),
        }));
        store.initialize().await?;

        let faq = FaqMatcher::new(self.faq);
        let (engine, provider) = match self.hosted_responses {
            Some(responses) => {
                let provider = Arc::new(MockCompletion::with_responses(responses));
                let hosted: Arc<dyn parlor_core::CompletionProvider> = provider.clone();
                let engine = ResponseGenerator::hosted(self.engine_config, faq, hosted);
                (engine, Some(provider))
            }
            None => {
                // Fixed seed keeps canned responses reproducible per bucket.
                let engine = ResponseGenerator::mock(
                    self.engine_config,
                    faq,
                    MockResponder::with_seed(0),
                );
                (engine, None)
            }
        };

        Ok(TestHarness {
            store,
            engine: Arc::new(engine),
            provider,
            _temp_dir: temp_dir,
        })
    }
}

/// A fully assembled test environment.
pub struct TestHarness {
    /// The conversation store, backed by a temp-file SQLite database.
    pub store: Arc<SqliteStore>,
    /// The response generation pipeline.
    pub engine: Arc<ResponseGenerator>,
    /// Handle to the hosted-mode mock provider, when one was configured.
    pub provider: Option<Arc<MockCompletion>>,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Start building a harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Create and persist a fresh active session.
    pub async fn create_session(&self) -> Result<Session, ParlorError> {
        let now = now_iso();
        let session = Session {
            id: Uuid::new_v4().to_string(),
            user_id: None,
            status: SessionStatus::Active,
            created_at: now.clone(),
            updated_at: now,
        };
        self.store.create_session(&session).await?;
        Ok(session)
    }

    /// Drive one full exchange: load history, persist the user turn, run
    /// generation, persist the assistant turn with its confidence.
    pub async fn send_message(&self, session_id: &str, text: &str) -> Result<Reply, ParlorError> {
        let history: Vec<Turn> = self
            .store
            .get_messages(session_id, None)
            .await?
            .iter()
            .map(Turn::from)
            .collect();

        self.store
            .insert_message(&Message {
                id: Uuid::new_v4().to_string(),
                session_id: session_id.to_string(),
                role: MessageRole::User,
                content: text.to_string(),
                confidence: None,
                created_at: now_iso(),
            })
            .await?;

        let reply = self.engine.generate(text, &history).await;

        self.store
            .insert_message(&Message {
                id: Uuid::new_v4().to_string(),
                session_id: session_id.to_string(),
                role: MessageRole::Assistant,
                content: reply.text.clone(),
                confidence: Some(reply.confidence),
                created_at: now_iso(),
            })
            .await?;

        Ok(reply)
    }

    /// Full transcript of a session, oldest first.
    pub async fn transcript(&self, session_id: &str) -> Result<Vec<Message>, ParlorError> {
        self.store.get_messages(session_id, None).await
    }
}

fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
