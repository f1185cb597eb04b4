//! Handlers for the service catalogue.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::models::{
        services::{ServiceCreate, ServiceResponse, ServiceUpdate},
        users::CurrentUser,
    },
    db::{
        errors::DbError,
        handlers::{Repository, Services},
        models::services::ServiceFilter,
    },
    errors::Error,
    types::ServiceId,
    AppState,
};

/// List services
///
/// Guests see only active services; admins see the full catalogue.
#[utoipa::path(
    get,
    path = "/services",
    tag = "services",
    responses(
        (status = 200, description = "List of services", body = Vec<ServiceResponse>),
        (status = 401, description = "Not authenticated"),
    ),
    security(("session_token" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_services(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<Vec<ServiceResponse>>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let filter = ServiceFilter {
        active_only: !current_user.is_admin(),
    };
    let services = Services::new(&mut conn).list(&filter).await?;

    Ok(Json(services.into_iter().map(ServiceResponse::from).collect()))
}

/// Create a new service
#[utoipa::path(
    post,
    path = "/services",
    request_body = ServiceCreate,
    tag = "services",
    responses(
        (status = 201, description = "Service created", body = ServiceResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Not authenticated"),
    ),
    security(("session_token" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_service(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Json(request): Json<ServiceCreate>,
) -> Result<(StatusCode, Json<ServiceResponse>), Error> {
    if request.name.trim().is_empty() {
        return Err(Error::BadRequest {
            message: "Service name must not be empty".to_string(),
        });
    }
    if request.price < 0.0 {
        return Err(Error::BadRequest {
            message: "Service price must not be negative".to_string(),
        });
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let service = Services::new(&mut conn).create(&request.into()).await?;

    Ok((StatusCode::CREATED, Json(ServiceResponse::from(service))))
}

/// Update a service
///
/// Partial update; only the provided fields change.
#[utoipa::path(
    put,
    path = "/services/{id}",
    request_body = ServiceUpdate,
    tag = "services",
    params(("id" = i64, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Service updated", body = ServiceResponse),
        (status = 404, description = "Service not found"),
    ),
    security(("session_token" = []))
)]
#[tracing::instrument(skip_all, fields(service_id = id))]
pub async fn update_service(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(id): Path<ServiceId>,
    Json(request): Json<ServiceUpdate>,
) -> Result<Json<ServiceResponse>, Error> {
    if let Some(price) = request.price {
        if price < 0.0 {
            return Err(Error::BadRequest {
                message: "Service price must not be negative".to_string(),
            });
        }
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let service = Services::new(&mut conn)
        .update(id, &request.into())
        .await
        .map_err(|e| match e {
            DbError::NotFound => Error::NotFound {
                resource: "Service".to_string(),
                id: id.to_string(),
            },
            other => Error::Database(other),
        })?;

    Ok(Json(ServiceResponse::from(service)))
}

/// Delete a service
///
/// Rejected while reservations still reference the service.
#[utoipa::path(
    delete,
    path = "/services/{id}",
    tag = "services",
    params(("id" = i64, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Service deleted"),
        (status = 400, description = "Service is still referenced by reservations"),
        (status = 404, description = "Service not found"),
    ),
    security(("session_token" = []))
)]
#[tracing::instrument(skip_all, fields(service_id = id))]
pub async fn delete_service(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(id): Path<ServiceId>,
) -> Result<StatusCode, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let deleted = Services::new(&mut conn).delete(id).await?;
    if !deleted {
        return Err(Error::NotFound {
            resource: "Service".to_string(),
            id: id.to_string(),
        });
    }

    Ok(StatusCode::OK)
}
