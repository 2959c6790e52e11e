// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session CRUD operations.

use parlor_core::{ParlorError, Session, SessionStatus};
use rusqlite::params;

use crate::database::Database;
use crate::queries::parse_enum_column;

const SESSION_COLUMNS: &str = "id, user_id, status, created_at, updated_at";

fn row_to_session(row: &rusqlite::Row<'_>) -> Result<Session, rusqlite::Error> {
    let status: String = row.get(2)?;
    Ok(Session {
        id: row.get(0)?,
        user_id: row.get(1)?,
        status: parse_enum_column(2, &status)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

/// Create a new session.
pub async fn create_session(db: &Database, session: &Session) -> Result<(), ParlorError> {
    let session = session.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO sessions (id, user_id, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    session.id,
                    session.user_id,
                    session.status.to_string(),
                    session.created_at,
                    session.updated_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a session by ID.
pub async fn get_session(db: &Database, id: &str) -> Result<Option<Session>, ParlorError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SESSION_COLUMNS} FROM sessions WHERE id = ?1"
            ))?;
            let result = stmt.query_row(params![id], row_to_session);
            match result {
                Ok(session) => Ok(Some(session)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List sessions, optionally filtered by status, newest first.
pub async fn list_sessions(
    db: &Database,
    status: Option<SessionStatus>,
) -> Result<Vec<Session>, ParlorError> {
    db.connection()
        .call(move |conn| {
            let mut sessions = Vec::new();
            match status {
                Some(filter) => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {SESSION_COLUMNS} FROM sessions
                         WHERE status = ?1 ORDER BY created_at DESC"
                    ))?;
                    let rows = stmt.query_map(params![filter.to_string()], row_to_session)?;
                    for row in rows {
                        sessions.push(row?);
                    }
                }
                None => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {SESSION_COLUMNS} FROM sessions ORDER BY created_at DESC"
                    ))?;
                    let rows = stmt.query_map([], row_to_session)?;
                    for row in rows {
                        sessions.push(row?);
                    }
                }
            }
            Ok(sessions)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Outcome of a status update attempt, resolved inside the writer thread
/// so the read-check-write is atomic.
enum UpdateOutcome {
    Updated,
    NotFound,
    InvalidTransition(SessionStatus),
}

/// Advance a session's status, refreshing updated_at.
///
/// Transitions are forward-only: a session never returns to `Active`, and
/// `Closed` is terminal. Invalid transitions and unknown sessions are errors.
pub async fn update_session_status(
    db: &Database,
    id: &str,
    status: SessionStatus,
) -> Result<(), ParlorError> {
    let id_owned = id.to_string();
    let outcome = db
        .connection()
        .call(move |conn| {
            let current: Result<String, _> = conn.query_row(
                "SELECT status FROM sessions WHERE id = ?1",
                params![id_owned],
                |row| row.get(0),
            );
            let current: SessionStatus = match current {
                Ok(s) => parse_enum_column(0, &s)?,
                Err(rusqlite::Error::QueryReturnedNoRows) => {
                    return Ok(UpdateOutcome::NotFound);
                }
                Err(e) => return Err(e.into()),
            };
            if !current.can_transition_to(status) {
                return Ok(UpdateOutcome::InvalidTransition(current));
            }
            conn.execute(
                "UPDATE sessions
                 SET status = ?1, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?2",
                params![status.to_string(), id_owned],
            )?;
            Ok(UpdateOutcome::Updated)
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    match outcome {
        UpdateOutcome::Updated => Ok(()),
        UpdateOutcome::NotFound => Err(ParlorError::Internal(format!("session not found: {id}"))),
        UpdateOutcome::InvalidTransition(from) => Err(ParlorError::Internal(format!(
            "invalid session status transition: {from} -> {status}"
        ))),
    }
}

/// Touch a session's updated_at timestamp.
pub async fn touch_session(db: &Database, id: &str) -> Result<(), ParlorError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE sessions SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?1",
                params![id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete a session; messages and escalations go with it via cascade.
///
/// Returns false when no row matched.
pub async fn delete_session(db: &Database, id: &str) -> Result<bool, ParlorError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let affected = conn.execute("DELETE FROM sessions WHERE id = ?1", params![id])?;
            Ok(affected > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
