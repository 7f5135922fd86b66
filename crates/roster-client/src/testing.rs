//! In-memory [`UsersApi`] for exercising the store and the console without
//! a server.

use std::sync::Mutex;

use async_trait::async_trait;
use roster_shared::types::{User, UserDraft, UserId};

use crate::api::{ApiError, UsersApi};

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    last_id: UserId,
    offline: bool,
    calls: usize,
}

#[derive(Default)]
pub struct FakeApi {
    inner: Mutex<Inner>,
}

fn rejected(status: u16, message: &str) -> ApiError {
    ApiError::Rejected {
        status,
        message: message.to_string(),
    }
}

fn not_found(id: UserId) -> ApiError {
    rejected(404, &format!("No user found with ID {id}."))
}

impl FakeApi {
    pub fn with_users(names: &[&str]) -> Self {
        let api = Self::default();
        {
            let mut inner = api.inner.lock().unwrap();
            for name in names {
                inner.last_id += 1;
                let id = inner.last_id;
                inner.users.push(User {
                    id,
                    name: name.to_string(),
                    email: format!("{}@x.com", name.to_lowercase()),
                });
            }
        }
        api
    }

    /// Make every following call fail with a 500.
    pub fn go_offline(&self) {
        self.inner.lock().unwrap().offline = true;
    }

    pub fn users(&self) -> Vec<User> {
        self.inner.lock().unwrap().users.clone()
    }

    pub fn calls(&self) -> usize {
        self.inner.lock().unwrap().calls
    }

    fn enter(&self) -> Result<std::sync::MutexGuard<'_, Inner>, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls += 1;
        if inner.offline {
            return Err(rejected(500, "Failed to retrieve users. Details: database is locked"));
        }
        Ok(inner)
    }
}

fn clash(users: &[User], except: Option<UserId>, pick: impl Fn(&User) -> bool) -> bool {
    users.iter().any(|u| Some(u.id) != except && pick(u))
}

#[async_trait]
impl UsersApi for FakeApi {
    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        Ok(self.enter()?.users.clone())
    }

    async fn get_user(&self, id: UserId) -> Result<User, ApiError> {
        let inner = self.enter()?;
        inner
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn create_user(&self, draft: &UserDraft) -> Result<User, ApiError> {
        let mut inner = self.enter()?;
        if clash(&inner.users, None, |u| u.name == draft.name) {
            return Err(rejected(400, "A user with that name already exists."));
        }
        if clash(&inner.users, None, |u| u.email == draft.email) {
            return Err(rejected(400, "A user with that email already exists."));
        }
        inner.last_id += 1;
        let user = User {
            id: inner.last_id,
            name: draft.name.clone(),
            email: draft.email.clone(),
        };
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: UserId, draft: &UserDraft) -> Result<User, ApiError> {
        let mut inner = self.enter()?;
        if !inner.users.iter().any(|u| u.id == id) {
            return Err(not_found(id));
        }
        if clash(&inner.users, Some(id), |u| u.email == draft.email) {
            return Err(rejected(400, "A user with that email already exists."));
        }
        if clash(&inner.users, Some(id), |u| u.name == draft.name) {
            return Err(rejected(400, "A user with that name already exists."));
        }
        let user = User {
            id,
            name: draft.name.clone(),
            email: draft.email.clone(),
        };
        if let Some(slot) = inner.users.iter_mut().find(|u| u.id == id) {
            *slot = user.clone();
        }
        Ok(user)
    }

    async fn delete_user(&self, id: UserId) -> Result<UserId, ApiError> {
        let mut inner = self.enter()?;
        let before = inner.users.len();
        inner.users.retain(|u| u.id != id);
        if inner.users.len() == before {
            return Err(not_found(id));
        }
        Ok(id)
    }
}
