// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Escalation record operations. Records are write-once.

use parlor_core::{Escalation, ParlorError};
use rusqlite::params;

use crate::database::Database;
use crate::queries::parse_enum_column;

// "trigger" is a reserved word in SQLite, hence the quoting.
const ESCALATION_COLUMNS: &str = r#"id, session_id, "trigger", reason, agent_id, created_at"#;

fn row_to_escalation(row: &rusqlite::Row<'_>) -> Result<Escalation, rusqlite::Error> {
    let trigger: String = row.get(2)?;
    Ok(Escalation {
        id: row.get(0)?,
        session_id: row.get(1)?,
        trigger: parse_enum_column(2, &trigger)?,
        reason: row.get(3)?,
        agent_id: row.get(4)?,
        created_at: row.get(5)?,
    })
}

/// Insert a new escalation record.
pub async fn insert_escalation(db: &Database, esc: &Escalation) -> Result<(), ParlorError> {
    let esc = esc.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                r#"INSERT INTO escalations (id, session_id, "trigger", reason, agent_id, created_at)
                   VALUES (?1, ?2, ?3, ?4, ?5, ?6)"#,
                params![
                    esc.id,
                    esc.session_id,
                    esc.trigger.to_string(),
                    esc.reason,
                    esc.agent_id,
                    esc.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List escalations for a session, oldest first.
pub async fn list_escalations_for_session(
    db: &Database,
    session_id: &str,
) -> Result<Vec<Escalation>, ParlorError> {
    let session_id = session_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {ESCALATION_COLUMNS} FROM escalations WHERE session_id = ?1
                 ORDER BY created_at ASC"
            ))?;
            let rows = stmt.query_map(params![session_id], row_to_escalation)?;
            let mut escalations = Vec::new();
            for row in rows {
                escalations.push(row?);
            }
            Ok(escalations)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
