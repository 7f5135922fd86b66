use serde::{Deserialize, Serialize};

/// Server-assigned user identifier (SQLite rowid).
pub type UserId = i64;

/// A persisted user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// Body of a create or update request.
///
/// An `id` sent by the caller is ignored; the store owns identifiers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
}

impl UserDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Both fields must be non-blank before a draft is worth sending.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.email.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_ignores_client_supplied_id() {
        let draft: UserDraft =
            serde_json::from_str(r#"{"id": 99, "name": "Ana", "email": "ana@x.com"}"#).unwrap();
        assert_eq!(draft, UserDraft::new("Ana", "ana@x.com"));
    }

    #[test]
    fn blank_fields_make_draft_incomplete() {
        assert!(UserDraft::new("Ana", "ana@x.com").is_complete());
        assert!(!UserDraft::new("  ", "ana@x.com").is_complete());
        assert!(!UserDraft::new("Ana", "").is_complete());
    }

    #[test]
    fn user_json_shape() {
        let user = User {
            id: 7,
            name: "Ana".into(),
            email: "ana@x.com".into(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": 7, "name": "Ana", "email": "ana@x.com" })
        );
    }
}
