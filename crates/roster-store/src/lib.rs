//! # roster-store
//!
//! Persistent storage for Roster users, backed by SQLite.
//!
//! The crate exposes a synchronous `Database` handle that wraps a
//! `rusqlite::Connection`, runs schema migrations on open and provides the
//! typed CRUD helpers the HTTP layer calls.  Name and email uniqueness is
//! enforced by the schema itself; violations surface as
//! [`StoreError::Conflict`].

pub mod database;
pub mod migrations;
pub mod users;

mod error;

pub use database::Database;
pub use error::{Result, StoreError, UniqueField};
pub use roster_shared::types::{User, UserDraft, UserId};
