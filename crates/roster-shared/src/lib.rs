//! # roster-shared
//!
//! Types shared by the Roster server and client: the `User` record, the
//! request body used to create or update one, and the JSON envelopes the
//! HTTP API wraps its responses in.

pub mod constants;
pub mod protocol;
pub mod types;

pub use types::{User, UserDraft, UserId};
