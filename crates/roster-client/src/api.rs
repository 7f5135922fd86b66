//! The seam between the state store and the transport.

use async_trait::async_trait;
use roster_shared::types::{User, UserDraft, UserId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status. `message` is its error
    /// payload, kept verbatim.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Could not reach the server: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx answer whose body is not what the call expects.
    #[error("Unexpected response from the server: {0}")]
    Decode(reqwest::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            ApiError::Transport(e) | ApiError::Decode(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

/// The five calls the users API offers.
#[async_trait]
pub trait UsersApi: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, ApiError>;

    async fn get_user(&self, id: UserId) -> Result<User, ApiError>;

    async fn create_user(&self, draft: &UserDraft) -> Result<User, ApiError>;

    async fn update_user(&self, id: UserId, draft: &UserDraft) -> Result<User, ApiError>;

    /// Returns the id the server confirmed as deleted.
    async fn delete_user(&self, id: UserId) -> Result<UserId, ApiError>;
}
