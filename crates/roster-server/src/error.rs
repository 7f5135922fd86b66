use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use roster_shared::protocol::ErrorBody;
use roster_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    ServiceFailure(String),

    /// An extractor refused the request before the handler ran. Keeps the
    /// extractor's status.
    #[error("{1}")]
    InvalidRequest(StatusCode, String),
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::InvalidRequest(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ServerError {
    fn from(rejection: PathRejection) -> Self {
        ServerError::InvalidRequest(rejection.status(), rejection.body_text())
    }
}

impl ServerError {
    /// Map a store error to its HTTP counterpart.
    ///
    /// `context` prefixes the message of unexpected storage faults, e.g.
    /// "Failed to create user".
    pub fn from_store(context: &str, err: StoreError) -> Self {
        match &err {
            StoreError::NotFound(_) => ServerError::NotFound(err.to_string()),
            StoreError::Conflict(_) => ServerError::Conflict(err.to_string()),
            _ => {
                tracing::error!(error = %err, "{context}");
                ServerError::ServiceFailure(format!("{context}. Details: {err}"))
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Conflict(_) => StatusCode::BAD_REQUEST,
            ServerError::ServiceFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::InvalidRequest(status, _) => *status,
        };

        let body = ErrorBody {
            error: self.to_string(),
        };

        (status, axum::Json(body)).into_response()
    }
}
