// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the ConversationStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use parlor_config::model::StorageConfig;
use parlor_core::{
    ConversationStore, Escalation, Message, ParlorError, Session, SessionStatus,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed conversation store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily initialized on the first
/// call to [`ConversationStore::initialize`].
pub struct SqliteStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given configuration.
    ///
    /// The database connection is not opened until `initialize` is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    fn db(&self) -> Result<&Database, ParlorError> {
        self.db.get().ok_or_else(|| ParlorError::Storage {
            source: "store not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl ConversationStore for SqliteStore {
    async fn initialize(&self) -> Result<(), ParlorError> {
        let db = Database::open(&self.config.database_path).await?;
        self.db.set(db).map_err(|_| ParlorError::Storage {
            source: "store already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite store initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), ParlorError> {
        self.db()?.close().await
    }

    // --- Sessions ---

    async fn create_session(&self, session: &Session) -> Result<(), ParlorError> {
        queries::sessions::create_session(self.db()?, session).await
    }

    async fn get_session(&self, id: &str) -> Result<Option<Session>, ParlorError> {
        queries::sessions::get_session(self.db()?, id).await
    }

    async fn list_sessions(
        &self,
        status: Option<SessionStatus>,
    ) -> Result<Vec<Session>, ParlorError> {
        queries::sessions::list_sessions(self.db()?, status).await
    }

    async fn update_session_status(
        &self,
        id: &str,
        status: SessionStatus,
    ) -> Result<(), ParlorError> {
        queries::sessions::update_session_status(self.db()?, id, status).await
    }

    async fn delete_session(&self, id: &str) -> Result<bool, ParlorError> {
        queries::sessions::delete_session(self.db()?, id).await
    }

    // --- Messages ---

    async fn insert_message(&self, message: &Message) -> Result<(), ParlorError> {
        let db = self.db()?;
        queries::messages::insert_message(db, message).await?;
        // Appending a turn counts as session activity.
        queries::sessions::touch_session(db, &message.session_id).await
    }

    async fn get_messages(
        &self,
        session_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<Message>, ParlorError> {
        queries::messages::get_messages_for_session(self.db()?, session_id, limit).await
    }

    // --- Escalations ---

    async fn insert_escalation(&self, escalation: &Escalation) -> Result<(), ParlorError> {
        queries::escalations::insert_escalation(self.db()?, escalation).await
    }

    async fn list_escalations(&self, session_id: &str) -> Result<Vec<Escalation>, ParlorError> {
        queries::escalations::list_escalations_for_session(self.db()?, session_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parlor_core::MessageRole;
    use tempfile::tempdir;

    fn make_config(path: &str) -> StorageConfig {
        StorageConfig {
            database_path: path.to_string(),
        }
    }

    async fn initialized_store() -> (SqliteStore, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("store.db");
        let store = SqliteStore::new(make_config(db_path.to_str().unwrap()));
        store.initialize().await.unwrap();
        (store, dir)
    }

    fn make_session(id: &str) -> Session {
        Session {
            id: id.to_string(),
            user_id: None,
            status: SessionStatus::Active,
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
            updated_at: "2026-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[tokio::test]
    async fn operations_before_initialize_fail() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("uninit.db");
        let store = SqliteStore::new(make_config(db_path.to_str().unwrap()));
        assert!(store.get_session("any").await.is_err());
    }

    #[tokio::test]
    async fn initialize_twice_returns_error() {
        let (store, _dir) = initialized_store().await;
        assert!(store.initialize().await.is_err());
    }

    #[tokio::test]
    async fn insert_message_bumps_session_updated_at() {
        let (store, _dir) = initialized_store().await;
        store.create_session(&make_session("s1")).await.unwrap();

        let msg = Message {
            id: "m1".to_string(),
            session_id: "s1".to_string(),
            role: MessageRole::User,
            content: "hello".to_string(),
            confidence: None,
            created_at: "2026-01-01T00:00:01.000Z".to_string(),
        };
        store.insert_message(&msg).await.unwrap();

        let session = store.get_session("s1").await.unwrap().unwrap();
        assert_ne!(session.updated_at, "2026-01-01T00:00:00.000Z");
        store.close().await.unwrap();
    }

    #[tokio::test]
    async fn trait_object_usage_compiles_and_works() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("dyn.db");
        let store: std::sync::Arc<dyn ConversationStore> =
            std::sync::Arc::new(SqliteStore::new(make_config(db_path.to_str().unwrap())));
        store.initialize().await.unwrap();
        store.create_session(&make_session("s1")).await.unwrap();
        assert_eq!(store.list_sessions(None).await.unwrap().len(), 1);
        store.close().await.unwrap();
    }
}
