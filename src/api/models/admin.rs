//! API models for the admin surface: dashboard aggregates, user detail
//! bundles, and status overrides.

use crate::api::models::complaints::ComplaintResponse;
use crate::api::models::invoices::InvoiceResponse;
use crate::api::models::reservations::ReservationResponse;
use crate::api::models::users::UserResponse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    pub user_count: i64,
    pub reservation_count: i64,
    pub open_complaint_count: i64,
    pub total_income: f64,
    pub users: Vec<UserResponse>,
}

/// Everything an admin sees when drilling into one account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDetailResponse {
    pub user: UserResponse,
    pub reservations: Vec<ReservationResponse>,
    pub complaints: Vec<ComplaintResponse>,
    pub invoices: Vec<InvoiceResponse>,
}

/// Status override body. The value is validated against the target record's
/// status vocabulary in the handler so unknown values get a 400, not a
/// deserialization rejection.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusUpdateRequest {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
