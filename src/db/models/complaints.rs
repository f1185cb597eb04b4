//! Database models for complaints.

use crate::api::models::complaints::{ComplaintCreate, ComplaintStatus};
use crate::types::{ComplaintId, UserId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database request for creating a new complaint
#[derive(Debug, Clone)]
pub struct ComplaintCreateDBRequest {
    pub user_id: UserId,
    pub title: String,
    pub text: String,
}

impl ComplaintCreateDBRequest {
    pub fn from_api(api: ComplaintCreate, user_id: UserId) -> Self {
        Self {
            user_id,
            title: api.title,
            text: api.text,
        }
    }
}

/// Database request for updating a complaint's status
#[derive(Debug, Clone, Default)]
pub struct ComplaintUpdateDBRequest {
    pub status: Option<ComplaintStatus>,
}

/// Database response for a complaint
#[derive(Debug, Clone, FromRow)]
pub struct ComplaintDBResponse {
    pub id: ComplaintId,
    pub user_id: UserId,
    pub title: String,
    pub text: String,
    pub status: ComplaintStatus,
    pub created_at: DateTime<Utc>,
}

/// List filter; `user_id` scopes the listing to one owner.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplaintFilter {
    pub user_id: Option<UserId>,
}
