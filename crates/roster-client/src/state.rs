//! Client-side users state and the transitions that change it.
//!
//! [`UsersState`] is a possibly stale mirror of the server's users plus a few
//! UI-only fields.  It only ever changes through [`UsersState::apply`], one
//! [`Action`] at a time, so every transition rule lives in a single match.

use roster_shared::types::{User, UserId};

/// Central users state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsersState {
    /// Cached collection, in server order.
    pub users: Vec<User>,

    /// Set while a list fetch is in flight.
    pub loading: bool,

    /// The user most recently fetched by id, e.g. to prefill an edit form.
    pub selected_user: Option<User>,

    /// Last rejected payload, shown once by the presentation layer and then
    /// cleared.
    pub error: Option<String>,
}

/// Outcomes of the asynchronous actions, plus the synchronous error reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    FetchUsersPending,
    FetchUsersFulfilled(Vec<User>),
    FetchUsersRejected(String),
    FetchUserByIdFulfilled(User),
    FetchUserByIdRejected(String),
    CreateUserFulfilled(User),
    CreateUserRejected(String),
    UpdateUserFulfilled(User),
    UpdateUserRejected(String),
    DeleteUserFulfilled(UserId),
    DeleteUserRejected(String),
    ClearError,
}

impl UsersState {
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::FetchUsersPending => {
                self.loading = true;
                self.error = None;
            }
            Action::FetchUsersFulfilled(users) => {
                self.users = users;
                self.loading = false;
            }
            Action::FetchUsersRejected(payload) => {
                self.loading = false;
                self.error = Some(payload);
            }
            Action::FetchUserByIdFulfilled(user) => {
                self.selected_user = Some(user);
            }
            Action::CreateUserFulfilled(user) => {
                self.users.push(user);
                self.error = None;
            }
            Action::UpdateUserFulfilled(user) => {
                // Unknown ids are ignored; the cache may simply be stale.
                if let Some(slot) = self.users.iter_mut().find(|u| u.id == user.id) {
                    *slot = user;
                }
                self.error = None;
            }
            Action::DeleteUserFulfilled(id) => {
                self.users.retain(|u| u.id != id);
                self.error = None;
            }
            Action::FetchUserByIdRejected(payload)
            | Action::CreateUserRejected(payload)
            | Action::UpdateUserRejected(payload)
            | Action::DeleteUserRejected(payload) => {
                self.error = Some(payload);
            }
            Action::ClearError => {
                self.error = None;
            }
        }
    }

    pub fn find(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }
}
