use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use roster_shared::constants::{user_path, MSG_USER_CREATED, MSG_USER_DELETED, MSG_USER_UPDATED};
use roster_shared::protocol::{DeletedUser, HealthResponse, UserEnvelope};
use roster_shared::types::{User, UserDraft, UserId};
use roster_store::{Database, StoreError};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::ServerError;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Database>>,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
        }
    }

    /// Run a store call on the blocking pool. rusqlite is synchronous and
    /// must not stall the async workers.
    async fn with_db<T, F>(&self, context: &'static str, f: F) -> Result<T, ServerError>
    where
        T: Send + 'static,
        F: FnOnce(&Database) -> Result<T, StoreError> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        let joined = tokio::task::spawn_blocking(move || {
            let guard = db.lock().map_err(|_| {
                ServerError::ServiceFailure(format!("{context}. Details: database lock poisoned"))
            })?;
            f(&guard).map_err(|e| ServerError::from_store(context, e))
        })
        .await;

        joined.unwrap_or_else(|e| {
            tracing::error!(error = %e, "{context}");
            Err(ServerError::ServiceFailure(format!("{context}. Details: {e}")))
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ServerError> {
    let users = state
        .with_db("Failed to retrieve users", |db| db.list_users())
        .await?;
    Ok(Json(users))
}

async fn get_user(
    State(state): State<AppState>,
    id: Result<Path<UserId>, PathRejection>,
) -> Result<Json<User>, ServerError> {
    let Path(id) = id?;
    let user = state
        .with_db("Failed to retrieve user", move |db| db.get_user(id))
        .await?;
    Ok(Json(user))
}

async fn create_user(
    State(state): State<AppState>,
    draft: Result<Json<UserDraft>, JsonRejection>,
) -> Result<impl IntoResponse, ServerError> {
    let Json(draft) = draft?;
    let user = state
        .with_db("Failed to create user", move |db| db.create_user(&draft))
        .await?;

    info!(id = user.id, name = %user.name, "User created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, user_path(user.id))],
        Json(UserEnvelope {
            message: MSG_USER_CREATED.into(),
            user,
        }),
    ))
}

async fn update_user(
    State(state): State<AppState>,
    id: Result<Path<UserId>, PathRejection>,
    draft: Result<Json<UserDraft>, JsonRejection>,
) -> Result<Json<UserEnvelope>, ServerError> {
    let Path(id) = id?;
    let Json(draft) = draft?;
    let user = state
        .with_db("Failed to update user", move |db| db.update_user(id, &draft))
        .await?;

    info!(id, "User updated");

    Ok(Json(UserEnvelope {
        message: MSG_USER_UPDATED.into(),
        user,
    }))
}

async fn delete_user(
    State(state): State<AppState>,
    id: Result<Path<UserId>, PathRejection>,
) -> Result<Json<DeletedUser>, ServerError> {
    let Path(id) = id?;
    let id = state
        .with_db("Failed to delete user", move |db| db.delete_user(id))
        .await?;

    info!(id, "User deleted");

    Ok(Json(DeletedUser {
        message: MSG_USER_DELETED.into(),
        id,
    }))
}

pub async fn serve(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let app = build_router(state);

    info!(addr = %addr, "Starting HTTP API server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
