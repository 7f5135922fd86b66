//! Schema migrations, keyed on `PRAGMA user_version`.
//!
//! Each step runs in its own transaction together with the version bump, so
//! a crash mid-migration leaves the previous version in place.

pub mod v001_users;

use rusqlite::Connection;

use crate::error::{Result, StoreError};

type Step = fn(&Connection) -> rusqlite::Result<()>;

/// Applied in order. Step `i` moves the schema from version `i` to `i + 1`.
const STEPS: &[(&str, Step)] = &[("v001_users", v001_users::up)];

pub const CURRENT_VERSION: u32 = STEPS.len() as u32;

pub fn run_migrations(conn: &mut Connection) -> Result<()> {
    let current: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if current > CURRENT_VERSION {
        return Err(StoreError::Migration(format!(
            "database schema v{current} is newer than this build (v{CURRENT_VERSION})"
        )));
    }

    for (version, (name, up)) in STEPS.iter().enumerate().skip(current as usize) {
        let target = version as u32 + 1;
        tracing::info!(migration = *name, target, "applying migration");

        let tx = conn.transaction()?;
        up(&tx).map_err(|e| StoreError::Migration(format!("{name}: {e}")))?;
        tx.pragma_update(None, "user_version", target)?;
        tx.commit()?;
    }

    Ok(())
}
