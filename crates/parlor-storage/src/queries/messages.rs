// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message CRUD operations. Messages are append-only.

use parlor_core::{Message, ParlorError};
use rusqlite::params;

use crate::database::Database;
use crate::queries::parse_enum_column;

const MESSAGE_COLUMNS: &str = "id, session_id, role, content, confidence, created_at";

fn row_to_message(row: &rusqlite::Row<'_>) -> Result<Message, rusqlite::Error> {
    let role: String = row.get(2)?;
    Ok(Message {
        id: row.get(0)?,
        session_id: row.get(1)?,
        role: parse_enum_column(2, &role)?,
        content: row.get(3)?,
        confidence: row.get(4)?,
        created_at: row.get(5)?,
    })
}

/// Insert a new message.
pub async fn insert_message(db: &Database, msg: &Message) -> Result<(), ParlorError> {
    let msg = msg.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO messages (id, session_id, role, content, confidence, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    msg.id,
                    msg.session_id,
                    msg.role.to_string(),
                    msg.content,
                    msg.confidence,
                    msg.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get messages for a session in chronological order.
pub async fn get_messages_for_session(
    db: &Database,
    session_id: &str,
    limit: Option<i64>,
) -> Result<Vec<Message>, ParlorError> {
    let session_id = session_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut messages = Vec::new();
            match limit {
                Some(lim) => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {MESSAGE_COLUMNS} FROM messages WHERE session_id = ?1
                         ORDER BY created_at ASC LIMIT ?2"
                    ))?;
                    let rows = stmt.query_map(params![session_id, lim], row_to_message)?;
                    for row in rows {
                        messages.push(row?);
                    }
                }
                None => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {MESSAGE_COLUMNS} FROM messages WHERE session_id = ?1
                         ORDER BY created_at ASC"
                    ))?;
                    let rows = stmt.query_map(params![session_id], row_to_message)?;
                    for row in rows {
                        messages.push(row?);
                    }
                }
            }
            Ok(messages)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
