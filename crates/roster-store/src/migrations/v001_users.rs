//! v001 -- the `users` table.
//!
//! `AUTOINCREMENT` keeps SQLite from handing out the id of a deleted row
//! again.  The two unique indexes are what enforce name and email
//! uniqueness; the store maps their violations to conflicts.

use rusqlite::Connection;

const UP_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name  TEXT NOT NULL,
    email TEXT NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_users_name ON users(name);
CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email ON users(email);
"#;

pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
