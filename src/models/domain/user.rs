use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Student,
    Teacher,
}

/// Denormalized summary of an attempt, embedded on the user profile for fast
/// personal-history reads. Written in lockstep with the Attempt record.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct HistoryEntry {
    pub quiz_id: String,
    pub score: i32,
    pub correct: i32,
    pub wrong: i32,
    pub total: i32,
    pub date: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(name: &str, email: &str, password_hash: &str, role: UserRole) -> Self {
        User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            role,
            history: Vec::new(),
            created_at: Some(Utc::now()),
        }
    }

    pub fn is_teacher(&self) -> bool {
        self.role == UserRole::Teacher
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new("Ada", "ada@example.com", "hash", UserRole::Teacher);

        assert!(!user.id.is_empty());
        assert_eq!(user.name, "Ada");
        assert!(user.is_teacher());
        assert!(user.history.is_empty());
        assert!(user.created_at.is_some());
    }

    #[test]
    fn user_role_serializes_lowercase() {
        let json = serde_json::to_string(&UserRole::Teacher).expect("role should serialize");
        assert_eq!(json, "\"teacher\"");

        let parsed: UserRole = serde_json::from_str("\"student\"").expect("role should parse");
        assert_eq!(parsed, UserRole::Student);
    }

    #[test]
    fn user_deserializes_with_missing_history() {
        let json = r#"{
            "id": "user-1",
            "name": "Ada",
            "email": "ada@example.com",
            "password_hash": "hash",
            "role": "student"
        }"#;

        let user: User = serde_json::from_str(json).expect("user should deserialize");
        assert!(user.history.is_empty());
    }
}
