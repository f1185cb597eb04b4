//! Handlers for guest reservations.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::models::{
        reservations::{ReservationCreate, ReservationResponse},
        users::CurrentUser,
    },
    db::{
        handlers::{Repository, Reservations, Services},
        models::reservations::{ReservationCreateDBRequest, ReservationFilter},
    },
    errors::Error,
    types::ReservationId,
    AppState,
};

/// List the caller's reservations
#[utoipa::path(
    get,
    path = "/reservations",
    tag = "reservations",
    responses(
        (status = 200, description = "Caller's reservations", body = Vec<ReservationResponse>),
        (status = 401, description = "Not authenticated"),
    ),
    security(("session_token" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_reservations(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<Vec<ReservationResponse>>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let filter = ReservationFilter {
        user_id: Some(current_user.id),
    };
    let reservations = Reservations::new(&mut conn).list(&filter).await?;

    Ok(Json(reservations.into_iter().map(ReservationResponse::from).collect()))
}

/// Create a reservation for the caller
///
/// The owner is always the session user; the body cannot reserve on behalf
/// of someone else.
#[utoipa::path(
    post,
    path = "/reservations",
    request_body = ReservationCreate,
    tag = "reservations",
    responses(
        (status = 201, description = "Reservation created", body = ReservationResponse),
        (status = 400, description = "Unknown or inactive service"),
        (status = 401, description = "Not authenticated"),
    ),
    security(("session_token" = []))
)]
#[tracing::instrument(skip_all, fields(service_id = request.service_id))]
pub async fn create_reservation(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<ReservationCreate>,
) -> Result<(StatusCode, Json<ReservationResponse>), Error> {
    if request.start_time.trim().is_empty() {
        return Err(Error::BadRequest {
            message: "start_time must not be empty".to_string(),
        });
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    // Inactive services are hidden from guests; reserving one is rejected
    // the same way as an unknown one.
    let service = Services::new(&mut conn).get_by_id(request.service_id).await?;
    match service {
        Some(service) if service.is_active => {}
        _ => {
            return Err(Error::BadRequest {
                message: format!("Service {} is not available", request.service_id),
            })
        }
    }

    let create_request = ReservationCreateDBRequest::from_api(request, current_user.id);
    let reservation = Reservations::new(&mut conn).create(&create_request).await?;

    Ok((StatusCode::CREATED, Json(ReservationResponse::from(reservation))))
}

/// Delete one of the caller's reservations
///
/// Admins may delete any reservation.
#[utoipa::path(
    delete,
    path = "/reservations/{id}",
    tag = "reservations",
    params(("id" = i64, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation deleted"),
        (status = 403, description = "Reservation belongs to another user"),
        (status = 404, description = "Reservation not found"),
    ),
    security(("session_token" = []))
)]
#[tracing::instrument(skip_all, fields(reservation_id = id))]
pub async fn delete_reservation(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<ReservationId>,
) -> Result<StatusCode, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Reservations::new(&mut conn);

    let reservation = repo.get_by_id(id).await?.ok_or_else(|| Error::NotFound {
        resource: "Reservation".to_string(),
        id: id.to_string(),
    })?;

    if reservation.user_id != current_user.id && !current_user.is_admin() {
        return Err(Error::Forbidden {
            message: "You can only delete your own reservations".to_string(),
        });
    }

    repo.delete(id).await?;

    Ok(StatusCode::OK)
}
