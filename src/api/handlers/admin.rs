//! Admin-only handlers: dashboard aggregates, user drill-down, and status
//! overrides. All routes here sit behind the [`RequireAdmin`] guard.

use axum::{
    extract::{Path, State},
    Json,
};
use std::str::FromStr;

use crate::{
    api::models::{
        admin::{DashboardResponse, MessageResponse, StatusUpdateRequest, UserDetailResponse},
        complaints::{ComplaintResponse, ComplaintStatus},
        invoices::{InvoicePaidUpdate, InvoiceResponse},
        reservations::{ReservationResponse, ReservationStatus},
        users::UserResponse,
    },
    auth::current_user::RequireAdmin,
    db::{
        errors::DbError,
        handlers::{stats, Complaints, Invoices, Repository, Reservations, Users},
        models::{
            complaints::{ComplaintFilter, ComplaintUpdateDBRequest},
            invoices::{InvoiceFilter, InvoiceUpdateDBRequest},
            reservations::{ReservationFilter, ReservationUpdateDBRequest},
            users::UserFilter,
        },
    },
    errors::Error,
    types::{ComplaintId, InvoiceId, ReservationId, UserId},
    AppState,
};

/// Dashboard aggregates plus the full user list
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "admin",
    responses(
        (status = 200, description = "Aggregate statistics", body = DashboardResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not an admin"),
    ),
    security(("session_token" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<DashboardResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let stats = stats::dashboard_stats(&mut conn).await?;
    let users = Users::new(&mut conn).list(&UserFilter::default()).await?;

    Ok(Json(DashboardResponse {
        user_count: stats.user_count,
        reservation_count: stats.reservation_count,
        open_complaint_count: stats.open_complaint_count,
        total_income: stats.total_income,
        users: users.into_iter().map(UserResponse::from).collect(),
    }))
}

/// List all users
#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "admin",
    responses(
        (status = 200, description = "All users", body = Vec<UserResponse>),
        (status = 403, description = "Not an admin"),
    ),
    security(("session_token" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<UserResponse>>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let users = Users::new(&mut conn).list(&UserFilter::default()).await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// One user with their reservations, complaints and invoices
#[utoipa::path(
    get,
    path = "/admin/user/{id}",
    tag = "admin",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User detail", body = UserDetailResponse),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "User not found"),
    ),
    security(("session_token" = []))
)]
#[tracing::instrument(skip_all, fields(user_id = id))]
pub async fn user_detail(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<UserId>,
) -> Result<Json<UserDetailResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let user = Users::new(&mut conn)
        .get_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "User".to_string(),
            id: id.to_string(),
        })?;

    let reservations = Reservations::new(&mut conn)
        .list(&ReservationFilter { user_id: Some(id) })
        .await?;
    let complaints = Complaints::new(&mut conn)
        .list(&ComplaintFilter { user_id: Some(id) })
        .await?;
    let invoices = Invoices::new(&mut conn)
        .list(&InvoiceFilter { user_id: Some(id) })
        .await?;

    Ok(Json(UserDetailResponse {
        user: UserResponse::from(user),
        reservations: reservations.into_iter().map(ReservationResponse::from).collect(),
        complaints: complaints.into_iter().map(ComplaintResponse::from).collect(),
        invoices: invoices.into_iter().map(InvoiceResponse::from).collect(),
    }))
}

/// List all complaints
#[utoipa::path(
    get,
    path = "/admin/complaints",
    tag = "admin",
    responses(
        (status = 200, description = "All complaints", body = Vec<ComplaintResponse>),
        (status = 403, description = "Not an admin"),
    ),
    security(("session_token" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_complaints(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<ComplaintResponse>>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let complaints = Complaints::new(&mut conn).list(&ComplaintFilter::default()).await?;

    Ok(Json(complaints.into_iter().map(ComplaintResponse::from).collect()))
}

/// Override a complaint's status
#[utoipa::path(
    post,
    path = "/admin/complaint/{id}/status",
    request_body = StatusUpdateRequest,
    tag = "admin",
    params(("id" = i64, Path, description = "Complaint ID")),
    responses(
        (status = 200, description = "Status updated", body = MessageResponse),
        (status = 400, description = "Unknown status value"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Complaint not found"),
    ),
    security(("session_token" = []))
)]
#[tracing::instrument(skip_all, fields(complaint_id = id))]
pub async fn update_complaint_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<ComplaintId>,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<MessageResponse>, Error> {
    let status = ComplaintStatus::from_str(&request.status).map_err(|_| Error::BadRequest {
        message: format!("Unknown complaint status: {}", request.status),
    })?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    Complaints::new(&mut conn)
        .update(id, &ComplaintUpdateDBRequest { status: Some(status) })
        .await
        .map_err(|e| not_found_or_db(e, "Complaint", id))?;

    Ok(Json(MessageResponse {
        message: "Complaint status updated".to_string(),
    }))
}

/// Override a reservation's status
#[utoipa::path(
    post,
    path = "/admin/reservation/{id}/status",
    request_body = StatusUpdateRequest,
    tag = "admin",
    params(("id" = i64, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Status updated", body = MessageResponse),
        (status = 400, description = "Unknown status value"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Reservation not found"),
    ),
    security(("session_token" = []))
)]
#[tracing::instrument(skip_all, fields(reservation_id = id))]
pub async fn update_reservation_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<ReservationId>,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<MessageResponse>, Error> {
    let status = ReservationStatus::from_str(&request.status).map_err(|_| Error::BadRequest {
        message: format!("Unknown reservation status: {}", request.status),
    })?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    Reservations::new(&mut conn)
        .update(
            id,
            &ReservationUpdateDBRequest {
                status: Some(status),
                ..Default::default()
            },
        )
        .await
        .map_err(|e| not_found_or_db(e, "Reservation", id))?;

    Ok(Json(MessageResponse {
        message: "Reservation status updated".to_string(),
    }))
}

/// Override an invoice's paid flag
#[utoipa::path(
    post,
    path = "/admin/invoice/{id}/status",
    request_body = InvoicePaidUpdate,
    tag = "admin",
    params(("id" = i64, Path, description = "Invoice ID")),
    responses(
        (status = 200, description = "Status updated", body = MessageResponse),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Invoice not found"),
    ),
    security(("session_token" = []))
)]
#[tracing::instrument(skip_all, fields(invoice_id = id))]
pub async fn update_invoice_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<InvoiceId>,
    Json(request): Json<InvoicePaidUpdate>,
) -> Result<Json<MessageResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    Invoices::new(&mut conn)
        .update(id, &InvoiceUpdateDBRequest { paid: Some(request.paid) })
        .await
        .map_err(|e| not_found_or_db(e, "Invoice", id))?;

    Ok(Json(MessageResponse {
        message: "Invoice status updated".to_string(),
    }))
}

fn not_found_or_db(e: DbError, resource: &str, id: i64) -> Error {
    match e {
        DbError::NotFound => Error::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        },
        other => Error::Database(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_app, login_admin, register_and_login};
    use axum::http::StatusCode;
    use serde_json::json;
    use sqlx::SqlitePool;

    #[sqlx::test]
    async fn test_admin_routes_gated(pool: SqlitePool) {
        let server = create_test_app(pool.clone()).await;

        // Unauthenticated
        server.get("/dashboard").await.assert_status(StatusCode::UNAUTHORIZED);

        // Authenticated but not admin
        register_and_login(&server, "ada@example.com").await;
        server.get("/dashboard").await.assert_status(StatusCode::FORBIDDEN);
        server.get("/admin/users").await.assert_status(StatusCode::FORBIDDEN);
        server.get("/admin/complaints").await.assert_status(StatusCode::FORBIDDEN);
        server
            .post("/admin/complaint/1/status")
            .json(&json!({"status": "resolved"}))
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[sqlx::test]
    async fn test_dashboard_aggregates(pool: SqlitePool) {
        let guest = create_test_app(pool.clone()).await;
        register_and_login(&guest, "ada@example.com").await;

        guest
            .post("/complaints")
            .json(&json!({"title": "Heating", "text": "Cold room."}))
            .await
            .assert_status(StatusCode::CREATED);
        guest
            .post("/invoices")
            .json(&json!({"total_amount": 100.0, "issued_at": "2026-08-01", "paid": true}))
            .await
            .assert_status(StatusCode::CREATED);

        let admin = create_test_app(pool).await;
        login_admin(&admin).await;

        let body: DashboardResponse = admin.get("/dashboard").await.json();
        // Registered guest plus the bootstrapped admin account
        assert_eq!(body.user_count, 2);
        assert_eq!(body.open_complaint_count, 1);
        assert_eq!(body.total_income, 100.0);
        assert_eq!(body.users.len(), 2);
    }

    #[sqlx::test]
    async fn test_user_detail(pool: SqlitePool) {
        let guest = create_test_app(pool.clone()).await;
        let user = register_and_login(&guest, "ada@example.com").await;

        guest
            .post("/complaints")
            .json(&json!({"title": "Noise", "text": "Loud neighbors."}))
            .await
            .assert_status(StatusCode::CREATED);

        let admin = create_test_app(pool).await;
        login_admin(&admin).await;

        let detail: UserDetailResponse = admin.get(&format!("/admin/user/{}", user.id)).await.json();
        assert_eq!(detail.user.email, "ada@example.com");
        assert_eq!(detail.complaints.len(), 1);
        assert!(detail.reservations.is_empty());
        assert!(detail.invoices.is_empty());

        admin.get("/admin/user/9999").await.assert_status(StatusCode::NOT_FOUND);
    }

    #[sqlx::test]
    async fn test_complaint_status_override(pool: SqlitePool) {
        let guest = create_test_app(pool.clone()).await;
        register_and_login(&guest, "ada@example.com").await;

        let complaint: ComplaintResponse = guest
            .post("/complaints")
            .json(&json!({"title": "Heating", "text": "Cold room."}))
            .await
            .json();

        let admin = create_test_app(pool).await;
        login_admin(&admin).await;

        admin
            .post(&format!("/admin/complaint/{}/status", complaint.id))
            .json(&json!({"status": "in_progress"}))
            .await
            .assert_status_ok();

        // Unknown status value is a 400, not a deserialization error
        admin
            .post(&format!("/admin/complaint/{}/status", complaint.id))
            .json(&json!({"status": "fixed"}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let list: Vec<ComplaintResponse> = guest.get("/complaints").await.json();
        assert_eq!(list[0].status, ComplaintStatus::InProgress);
    }

    #[sqlx::test]
    async fn test_reservation_status_override(pool: SqlitePool) {
        let guest = create_test_app(pool.clone()).await;
        register_and_login(&guest, "ada@example.com").await;

        let service: crate::api::models::services::ServiceResponse = guest
            .post("/services")
            .json(&json!({"name": "Spa", "price": 10.0}))
            .await
            .json();
        let reservation: ReservationResponse = guest
            .post("/reservations")
            .json(&json!({"service_id": service.id, "start_time": "2026-09-01T14:00:00Z"}))
            .await
            .json();

        let admin = create_test_app(pool).await;
        login_admin(&admin).await;

        admin
            .post(&format!("/admin/reservation/{}/status", reservation.id))
            .json(&json!({"status": "approved"}))
            .await
            .assert_status_ok();

        let list: Vec<ReservationResponse> = guest.get("/reservations").await.json();
        assert_eq!(list[0].status, ReservationStatus::Approved);
    }

    #[sqlx::test]
    async fn test_invoice_status_override(pool: SqlitePool) {
        let guest = create_test_app(pool.clone()).await;
        register_and_login(&guest, "ada@example.com").await;

        let invoice: InvoiceResponse = guest
            .post("/invoices")
            .json(&json!({"total_amount": 42.0, "issued_at": "2026-08-01"}))
            .await
            .json();

        let admin = create_test_app(pool).await;
        login_admin(&admin).await;

        admin
            .post(&format!("/admin/invoice/{}/status", invoice.id))
            .json(&json!({"paid": true}))
            .await
            .assert_status_ok();

        admin
            .post("/admin/invoice/9999/status")
            .json(&json!({"paid": true}))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
