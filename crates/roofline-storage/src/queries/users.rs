// SPDX-FileCopyrightText: 2026 Roofline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User CRUD operations.

use roofline_core::{RooflineError, User};
use rusqlite::params;

use crate::database::Database;
use crate::models::NewUser;

const USER_COLUMNS: &str =
    "id, name, email, password_hash, phone, address1, city, state, created_at";

fn user_from_row(row: &rusqlite::Row<'_>) -> Result<User, rusqlite::Error> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        phone: row.get(4)?,
        address1: row.get(5)?,
        city: row.get(6)?,
        state: row.get(7)?,
        created_at: row.get(8)?,
    })
}

/// Insert a new user and return its id.
///
/// The UNIQUE constraint on `email` is the uniqueness authority: a violation
/// maps to [`RooflineError::EmailInUse`] so concurrent registrations with
/// the same email surface the right failure even when a pre-check raced.
pub async fn insert_user(db: &Database, user: &NewUser) -> Result<i64, RooflineError> {
    let user = user.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO users (name, email, password_hash) VALUES (?1, ?2, ?3)",
                params![user.name, user.email, user.password_hash],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_insert_err)
}

fn map_insert_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> RooflineError {
    if let tokio_rusqlite::Error::Error(rusqlite::Error::SqliteFailure(failure, Some(msg))) = &e {
        if failure.code == rusqlite::ErrorCode::ConstraintViolation && msg.contains("users.email")
        {
            return RooflineError::EmailInUse;
        }
    }
    crate::database::map_tr_err(e)
}

/// Look up a user by email (case-sensitive exact match).
pub async fn get_user_by_email(db: &Database, email: &str) -> Result<Option<User>, RooflineError> {
    let email = email.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {USER_COLUMNS} FROM users WHERE email = ?1"
            ))?;
            let result = stmt.query_row(params![email], user_from_row);
            match result {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Look up a user by id.
pub async fn get_user_by_id(db: &Database, id: i64) -> Result<Option<User>, RooflineError> {
    db.connection()
        .call(move |conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"))?;
            let result = stmt.query_row(params![id], user_from_row);
            match result {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}
