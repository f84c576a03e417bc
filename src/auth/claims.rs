use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::{User, UserRole};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user id)
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub exp: usize, // Expiration time (as UTC timestamp)
    pub iat: usize, // Issued at (as UTC timestamp)
}

impl Claims {
    pub fn new(user: &User, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: String,        // user id
    pub token_type: String, // "refresh"
    pub exp: usize,         // Expiration time
    pub iat: usize,         // Issued at time
}

impl RefreshClaims {
    pub fn new(user_id: &str, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: user_id.to_string(),
            token_type: "refresh".to_string(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }
}
