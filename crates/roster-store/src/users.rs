//! CRUD operations for [`User`] records.
//!
//! Writes rely on the unique indexes from `v001_users` rather than a lookup
//! before the write, so two concurrent creates with the same name cannot both
//! succeed.  When a write trips an index, a follow-up lookup decides which
//! field to report so the precedence stays stable: create reports a name
//! clash before an email clash, update the other way round.

use rusqlite::{params, OptionalExtension};

use crate::database::Database;
use crate::error::{Result, StoreError, UniqueField};
use roster_shared::types::{User, UserDraft, UserId};

const CREATE_PRECEDENCE: [UniqueField; 2] = [UniqueField::Name, UniqueField::Email];
const UPDATE_PRECEDENCE: [UniqueField; 2] = [UniqueField::Email, UniqueField::Name];

impl Database {
    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// List every user, oldest first.
    pub fn list_users(&self) -> Result<Vec<User>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT id, name, email FROM users ORDER BY id ASC")?;

        let rows = stmt.query_map([], row_to_user)?;

        let mut users = Vec::new();
        for row in rows {
            users.push(row?);
        }
        Ok(users)
    }

    /// Fetch a single user by id.
    pub fn get_user(&self, id: UserId) -> Result<User> {
        self.conn()
            .query_row(
                "SELECT id, name, email FROM users WHERE id = ?1",
                params![id],
                row_to_user,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound(id),
                other => StoreError::Sqlite(other),
            })
    }

    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Insert a new user and return it with its assigned id.
    pub fn create_user(&self, draft: &UserDraft) -> Result<User> {
        self.conn()
            .execute(
                "INSERT INTO users (name, email) VALUES (?1, ?2)",
                params![draft.name, draft.email],
            )
            .map_err(|e| self.resolve_write_error(e, draft, None, CREATE_PRECEDENCE))?;

        let id = self.conn().last_insert_rowid();
        tracing::debug!(id, name = %draft.name, "inserted user");

        Ok(User {
            id,
            name: draft.name.clone(),
            email: draft.email.clone(),
        })
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    /// Overwrite name and email of an existing user.
    ///
    /// A user may keep its own name and email; only values held by a
    /// *different* row conflict.
    pub fn update_user(&self, id: UserId, draft: &UserDraft) -> Result<User> {
        let affected = self
            .conn()
            .execute(
                "UPDATE users SET name = ?1, email = ?2 WHERE id = ?3",
                params![draft.name, draft.email, id],
            )
            .map_err(|e| self.resolve_write_error(e, draft, Some(id), UPDATE_PRECEDENCE))?;

        if affected == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(User {
            id,
            name: draft.name.clone(),
            email: draft.email.clone(),
        })
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    /// Delete a user and return the id that was removed.
    pub fn delete_user(&self, id: UserId) -> Result<UserId> {
        let affected = self
            .conn()
            .execute("DELETE FROM users WHERE id = ?1", params![id])?;

        if affected == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    /// Whether a user other than `exclude` already holds `value` in `field`.
    fn is_taken(&self, field: UniqueField, value: &str, exclude: Option<UserId>) -> Result<bool> {
        let sql = format!(
            "SELECT 1 FROM users WHERE {} = ?1 AND (?2 IS NULL OR id <> ?2) LIMIT 1",
            field.column()
        );
        let found = self
            .conn()
            .query_row(&sql, params![value, exclude], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }

    fn resolve_write_error(
        &self,
        err: rusqlite::Error,
        draft: &UserDraft,
        exclude: Option<UserId>,
        precedence: [UniqueField; 2],
    ) -> StoreError {
        if !is_unique_violation(&err) {
            return StoreError::Sqlite(err);
        }

        for field in precedence {
            let value = match field {
                UniqueField::Name => &draft.name,
                UniqueField::Email => &draft.email,
            };
            match self.is_taken(field, value, exclude) {
                Ok(true) => return StoreError::Conflict(field),
                Ok(false) => {}
                Err(e) => return e,
            }
        }

        // The clashing row was deleted between the write and the lookup.
        match violated_field(&err) {
            Some(field) => StoreError::Conflict(field),
            None => StoreError::Sqlite(err),
        }
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// Parse the column out of "UNIQUE constraint failed: users.<column>".
fn violated_field(err: &rusqlite::Error) -> Option<UniqueField> {
    let rusqlite::Error::SqliteFailure(_, Some(msg)) = err else {
        return None;
    };
    if msg.contains("users.name") {
        Some(UniqueField::Name)
    } else if msg.contains("users.email") {
        Some(UniqueField::Email)
    } else {
        None
    }
}

fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
    })
}
