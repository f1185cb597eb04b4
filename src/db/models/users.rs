//! Database models for users.

use crate::api::models::users::{RegisterRequest, Role};
use crate::types::UserId;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database request for creating a new user
#[derive(Debug, Clone)]
pub struct UserCreateDBRequest {
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub role: Role,
    pub room_no: Option<String>,
    pub phone: Option<String>,
}

impl UserCreateDBRequest {
    /// Build a create request from a registration, with the hash computed by
    /// the caller. Registration can never mint admins.
    pub fn from_registration(api: RegisterRequest, password_hash: String) -> Self {
        Self {
            name: api.name,
            email: api.email,
            password_hash: Some(password_hash),
            role: Role::User,
            room_no: api.room_no,
            phone: api.phone,
        }
    }
}

/// Database request for partially updating a user
#[derive(Debug, Clone, Default)]
pub struct UserUpdateDBRequest {
    pub name: Option<String>,
    pub room_no: Option<String>,
    pub phone: Option<String>,
    pub password_hash: Option<String>,
}

/// Filter for listing users. Empty for now; all callers want the full list.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserFilter {}

/// Database response for a user
#[derive(Debug, Clone, FromRow)]
pub struct UserDBResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub role: Role,
    pub room_no: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}
