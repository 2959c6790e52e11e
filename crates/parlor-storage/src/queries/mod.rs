// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules for CRUD operations on storage entities.

pub mod escalations;
pub mod messages;
pub mod sessions;

use std::str::FromStr;

/// Parses an enum column stored as TEXT, reporting a conversion failure
/// against the originating column index.
pub(crate) fn parse_enum_column<T>(idx: usize, value: &str) -> Result<T, rusqlite::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.parse::<T>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}
