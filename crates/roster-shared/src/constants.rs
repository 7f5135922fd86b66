/// Collection path of the users resource
pub const USERS_PATH: &str = "/users";

/// Default HTTP API port (server)
pub const DEFAULT_HTTP_PORT: u16 = 5097;

/// Base URL the client talks to when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:5097";

pub const MSG_USER_CREATED: &str = "User created successfully";
pub const MSG_USER_UPDATED: &str = "User updated successfully";
pub const MSG_USER_DELETED: &str = "User deleted successfully";

/// Path of a single user resource, as used in the `Location` header.
pub fn user_path(id: i64) -> String {
    format!("{USERS_PATH}/{id}")
}
