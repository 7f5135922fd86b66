//! The users store: turns API calls into state transitions.
//!
//! Each async action dispatches its outcome (pending, fulfilled or rejected)
//! through [`UsersState::apply`] and then returns the call's own result, so
//! callers can both react to success and rely on the state having been
//! updated.  New states are published on a `watch` channel for whatever is
//! rendering them.

use roster_shared::types::{User, UserDraft, UserId};
use tokio::sync::watch;

use crate::api::{ApiError, UsersApi};
use crate::state::{Action, UsersState};

pub struct Store<A> {
    api: A,
    state: watch::Sender<UsersState>,
}

impl<A: UsersApi> Store<A> {
    pub fn new(api: A) -> Self {
        let (state, _) = watch::channel(UsersState::default());
        Self { api, state }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn dispatch(&self, action: Action) {
        tracing::trace!(?action, "dispatch");
        self.state.send_modify(|state| state.apply(action));
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> UsersState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<UsersState> {
        self.state.subscribe()
    }

    pub async fn fetch_users(&self) -> Result<Vec<User>, ApiError> {
        self.dispatch(Action::FetchUsersPending);
        let result = self.api.list_users().await;
        self.settle(result, Action::FetchUsersFulfilled, Action::FetchUsersRejected)
    }

    pub async fn fetch_user_by_id(&self, id: UserId) -> Result<User, ApiError> {
        let result = self.api.get_user(id).await;
        self.settle(
            result,
            Action::FetchUserByIdFulfilled,
            Action::FetchUserByIdRejected,
        )
    }

    /// Appends the created user to the cache; does not re-fetch.
    pub async fn create_user(&self, draft: &UserDraft) -> Result<User, ApiError> {
        let result = self.api.create_user(draft).await;
        self.settle(result, Action::CreateUserFulfilled, Action::CreateUserRejected)
    }

    pub async fn update_user(&self, id: UserId, draft: &UserDraft) -> Result<User, ApiError> {
        let result = self.api.update_user(id, draft).await;
        self.settle(result, Action::UpdateUserFulfilled, Action::UpdateUserRejected)
    }

    pub async fn delete_user(&self, id: UserId) -> Result<UserId, ApiError> {
        let result = self.api.delete_user(id).await;
        self.settle(result, Action::DeleteUserFulfilled, Action::DeleteUserRejected)
    }

    pub fn clear_error(&self) {
        self.dispatch(Action::ClearError);
    }

    fn settle<T: Clone>(
        &self,
        result: Result<T, ApiError>,
        fulfilled: fn(T) -> Action,
        rejected: fn(String) -> Action,
    ) -> Result<T, ApiError> {
        match &result {
            Ok(value) => self.dispatch(fulfilled(value.clone())),
            Err(e) => {
                tracing::warn!(status = ?e.status(), error = %e, "action rejected");
                self.dispatch(rejected(e.to_string()));
            }
        }
        result
    }
}
