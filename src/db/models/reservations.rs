//! Database models for reservations.

use crate::api::models::reservations::{ReservationCreate, ReservationStatus};
use crate::types::{ReservationId, ServiceId, UserId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database request for creating a new reservation
#[derive(Debug, Clone)]
pub struct ReservationCreateDBRequest {
    pub user_id: UserId,
    pub service_id: ServiceId,
    pub start_time: String,
    pub end_time: Option<String>,
    pub note: Option<String>,
}

impl ReservationCreateDBRequest {
    /// Attach the owner to an API create request. The owner always comes from
    /// the session, never from the request body.
    pub fn from_api(api: ReservationCreate, user_id: UserId) -> Self {
        Self {
            user_id,
            service_id: api.service_id,
            start_time: api.start_time,
            end_time: api.end_time,
            note: api.note,
        }
    }
}

/// Database request for updating a reservation's status
#[derive(Debug, Clone, Default)]
pub struct ReservationUpdateDBRequest {
    pub status: Option<ReservationStatus>,
    pub note: Option<String>,
}

/// Database response for a reservation
#[derive(Debug, Clone, FromRow)]
pub struct ReservationDBResponse {
    pub id: ReservationId,
    pub user_id: UserId,
    pub service_id: ServiceId,
    pub start_time: String,
    pub end_time: Option<String>,
    pub status: ReservationStatus,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// List filter; `user_id` scopes the listing to one owner.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReservationFilter {
    pub user_id: Option<UserId>,
}
