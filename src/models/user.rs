//! User model
//!
//! Defines the User entity. Users own their comments and notes; ownership
//! is what the access-control rules in `services::access` are checked
//! against.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity representing a registered account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: i64,
    /// Username (unique)
    pub username: String,
    /// Password hash (argon2)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with the given parameters.
    ///
    /// The password must already be hashed; use
    /// `services::password::hash_password()`.
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            id: 0, // Will be set by the database
            username,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_new() {
        let user = User::new("reader".to_string(), "hashed_password".to_string());

        assert_eq!(user.id, 0);
        assert_eq!(user.username, "reader");
        assert_eq!(user.password_hash, "hashed_password");
    }

    #[test]
    fn test_user_serialization_hides_password_hash() {
        let user = User::new("reader".to_string(), "secret-hash".to_string());
        let json = serde_json::to_string(&user).unwrap();

        assert!(json.contains("reader"));
        assert!(!json.contains("secret-hash"));
    }
}
