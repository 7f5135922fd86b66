//! JSON bodies exchanged over the users HTTP API.

use serde::{Deserialize, Serialize};

use crate::types::{User, UserId};

/// Returned by create (201) and update (200).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserEnvelope {
    pub message: String,
    pub user: User,
}

/// Returned by delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeletedUser {
    pub message: String,
    pub id: UserId,
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
