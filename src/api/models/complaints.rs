//! API request/response models for complaints.

use crate::db::models::complaints::ComplaintDBResponse;
use crate::types::{ComplaintId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

/// Complaint workflow state. Starts `open`; transitions are expected to move
/// forward but ordering is not enforced at the store level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    Open,
    InProgress,
    Resolved,
}

impl FromStr for ComplaintStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(ComplaintStatus::Open),
            "in_progress" => Ok(ComplaintStatus::InProgress),
            "resolved" => Ok(ComplaintStatus::Resolved),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ComplaintCreate {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ComplaintResponse {
    pub id: ComplaintId,
    pub user_id: UserId,
    pub title: String,
    pub text: String,
    pub status: ComplaintStatus,
    pub created_at: DateTime<Utc>,
}

impl From<ComplaintDBResponse> for ComplaintResponse {
    fn from(db: ComplaintDBResponse) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            title: db.title,
            text: db.text,
            status: db.status,
            created_at: db.created_at,
        }
    }
}
