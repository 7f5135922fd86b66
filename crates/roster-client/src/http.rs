//! [`UsersApi`] over HTTP, using `reqwest`.

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use roster_shared::constants::USERS_PATH;
use roster_shared::protocol::{DeletedUser, ErrorBody, UserEnvelope};
use roster_shared::types::{User, UserDraft, UserId};
use serde::de::DeserializeOwned;

use crate::api::{ApiError, UsersApi};

pub struct HttpUsersApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpUsersApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn users_url(&self) -> String {
        format!("{}{}", self.base_url, USERS_PATH)
    }

    fn user_url(&self, id: UserId) -> String {
        format!("{}{}/{}", self.base_url, USERS_PATH, id)
    }
}

#[async_trait]
impl UsersApi for HttpUsersApi {
    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let resp = self.client.get(self.users_url()).send().await?;
        decode(resp).await
    }

    async fn get_user(&self, id: UserId) -> Result<User, ApiError> {
        let resp = self.client.get(self.user_url(id)).send().await?;
        decode(resp).await
    }

    async fn create_user(&self, draft: &UserDraft) -> Result<User, ApiError> {
        let resp = self.client.post(self.users_url()).json(draft).send().await?;
        let envelope: UserEnvelope = decode(resp).await?;
        Ok(envelope.user)
    }

    async fn update_user(&self, id: UserId, draft: &UserDraft) -> Result<User, ApiError> {
        let resp = self.client.put(self.user_url(id)).json(draft).send().await?;
        let envelope: UserEnvelope = decode(resp).await?;
        Ok(envelope.user)
    }

    async fn delete_user(&self, id: UserId) -> Result<UserId, ApiError> {
        let resp = self.client.delete(self.user_url(id)).send().await?;
        let deleted: DeletedUser = decode(resp).await?;
        Ok(deleted.id)
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return resp.json().await.map_err(ApiError::Decode);
    }

    let body = resp.text().await.unwrap_or_default();
    tracing::debug!(%status, body = %body, "request rejected");

    Err(ApiError::Rejected {
        status: status.as_u16(),
        message: rejection_message(status, &body),
    })
}

/// The server's `{"error": ...}` message, else the raw body, else the
/// status reason.
fn rejection_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.error;
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("Request failed")
        .to_string()
}
