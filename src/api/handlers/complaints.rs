//! Handlers for guest complaints.

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    api::models::{
        complaints::{ComplaintCreate, ComplaintResponse},
        users::CurrentUser,
    },
    db::{
        handlers::{Complaints, Repository},
        models::complaints::{ComplaintCreateDBRequest, ComplaintFilter},
    },
    errors::Error,
    AppState,
};

/// List the caller's complaints
#[utoipa::path(
    get,
    path = "/complaints",
    tag = "complaints",
    responses(
        (status = 200, description = "Caller's complaints", body = Vec<ComplaintResponse>),
        (status = 401, description = "Not authenticated"),
    ),
    security(("session_token" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_complaints(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<Vec<ComplaintResponse>>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let filter = ComplaintFilter {
        user_id: Some(current_user.id),
    };
    let complaints = Complaints::new(&mut conn).list(&filter).await?;

    Ok(Json(complaints.into_iter().map(ComplaintResponse::from).collect()))
}

/// File a complaint
#[utoipa::path(
    post,
    path = "/complaints",
    request_body = ComplaintCreate,
    tag = "complaints",
    responses(
        (status = 201, description = "Complaint filed", body = ComplaintResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Not authenticated"),
    ),
    security(("session_token" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_complaint(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<ComplaintCreate>,
) -> Result<(StatusCode, Json<ComplaintResponse>), Error> {
    if request.title.trim().is_empty() || request.text.trim().is_empty() {
        return Err(Error::BadRequest {
            message: "Complaint title and text must not be empty".to_string(),
        });
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let create_request = ComplaintCreateDBRequest::from_api(request, current_user.id);
    let complaint = Complaints::new(&mut conn).create(&create_request).await?;

    Ok((StatusCode::CREATED, Json(ComplaintResponse::from(complaint))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::complaints::ComplaintStatus;
    use crate::test_utils::{create_test_app, register_and_login};
    use serde_json::json;
    use sqlx::SqlitePool;

    #[sqlx::test]
    async fn test_complaints_require_auth(pool: SqlitePool) {
        let server = create_test_app(pool).await;

        server.get("/complaints").await.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[sqlx::test]
    async fn test_file_and_list_complaint(pool: SqlitePool) {
        let server = create_test_app(pool).await;
        let user = register_and_login(&server, "ada@example.com").await;

        let response = server
            .post("/complaints")
            .json(&json!({"title": "Heating", "text": "Room 101 is freezing."}))
            .await;
        response.assert_status(StatusCode::CREATED);

        let created: ComplaintResponse = response.json();
        assert_eq!(created.user_id, user.id);
        assert_eq!(created.status, ComplaintStatus::Open);

        let list: Vec<ComplaintResponse> = server.get("/complaints").await.json();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].title, "Heating");
    }

    #[sqlx::test]
    async fn test_empty_fields_rejected(pool: SqlitePool) {
        let server = create_test_app(pool).await;
        register_and_login(&server, "ada@example.com").await;

        server
            .post("/complaints")
            .json(&json!({"title": "", "text": "something"}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .post("/complaints")
            .json(&json!({"title": "something", "text": "  "}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[sqlx::test]
    async fn test_listing_is_owner_scoped(pool: SqlitePool) {
        let server = create_test_app(pool.clone()).await;
        register_and_login(&server, "ada@example.com").await;

        server
            .post("/complaints")
            .json(&json!({"title": "Noise", "text": "Loud music next door."}))
            .await
            .assert_status(StatusCode::CREATED);

        let other = create_test_app(pool).await;
        register_and_login(&other, "bob@example.com").await;

        let theirs: Vec<ComplaintResponse> = other.get("/complaints").await.json();
        assert!(theirs.is_empty());
    }
}
