//! Request extractors for the authenticated caller.

use crate::{
    api::models::users::CurrentUser,
    auth::session,
    errors::{Error, Result},
    AppState,
};
use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::{instrument, trace};

/// Extract user from the JWT session cookie if present and valid
/// Returns:
/// - None: No session cookie present
/// - Some(Ok(user)): Valid session found and verified
/// - Some(Err(error)): Session cookie present but invalid/malformed
#[instrument(skip(parts, config))]
fn try_jwt_session_auth(parts: &Parts, config: &crate::config::Config) -> Option<Result<CurrentUser>> {
    let cookie_header = parts.headers.get(axum::http::header::COOKIE)?;

    let cookie_str = match cookie_header.to_str() {
        Ok(s) => s,
        Err(e) => {
            return Some(Err(Error::BadRequest {
                message: format!("Invalid cookie header: {e}"),
            }))
        }
    };
    let cookie_name = &config.auth.session.cookie_name;

    for cookie in cookie_str.split(';') {
        let cookie = cookie.trim();
        if let Some((name, value)) = cookie.split_once('=') {
            if name == cookie_name {
                match session::verify_session_token(value, config) {
                    Ok(user) => return Some(Ok(user)),
                    Err(_) => {
                        // Expired or invalid token; keep scanning in case a
                        // valid cookie with the same name follows.
                        continue;
                    }
                }
            }
        }
    }
    None
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        match try_jwt_session_auth(parts, &state.config) {
            Some(Ok(user)) => {
                trace!("Found session authenticated user: {}", user.id);
                Ok(user)
            }
            Some(Err(e)) => {
                trace!("Session authentication failed: {:?}", e);
                Err(Error::Unauthenticated { message: None })
            }
            None => {
                trace!("No session cookie found in request");
                Err(Error::Unauthenticated { message: None })
            }
        }
    }
}

/// Guard extractor for admin-only routes. Wraps the session extraction and
/// rejects non-admin callers with 403 before the handler body runs.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub CurrentUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = Error;

    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let user = CurrentUser::from_request_parts(parts, state).await?;

        if !user.is_admin() {
            return Err(Error::Forbidden {
                message: "Admin privileges required".to_string(),
            });
        }

        Ok(RequireAdmin(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::users::Role;
    use crate::auth::session::create_session_token;
    use crate::test_utils::create_test_config;
    use axum::extract::FromRequestParts as _;
    use sqlx::SqlitePool;

    fn test_user(role: Role) -> CurrentUser {
        CurrentUser {
            id: 1,
            name: "Test Guest".to_string(),
            email: "test@example.com".to_string(),
            role,
        }
    }

    fn parts_with_cookie(cookie: Option<String>) -> Parts {
        let mut builder = axum::http::Request::builder().uri("http://localhost/test");
        if let Some(cookie) = cookie {
            builder = builder.header(axum::http::header::COOKIE, cookie);
        }
        let (parts, _body) = builder.body(()).unwrap().into_parts();
        parts
    }

    fn test_state(pool: SqlitePool) -> AppState {
        AppState::builder().db(pool).config(create_test_config()).build()
    }

    #[sqlx::test]
    async fn test_valid_session_cookie(pool: SqlitePool) {
        let state = test_state(pool);
        let user = test_user(Role::User);
        let token = create_session_token(&user, &state.config).unwrap();
        let cookie_name = &state.config.auth.session.cookie_name;

        let mut parts = parts_with_cookie(Some(format!("{cookie_name}={token}")));
        let extracted = CurrentUser::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(extracted.email, user.email);
    }

    #[sqlx::test]
    async fn test_missing_cookie_returns_unauthorized(pool: SqlitePool) {
        let state = test_state(pool);

        let mut parts = parts_with_cookie(None);
        let err = CurrentUser::from_request_parts(&mut parts, &state).await.unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[sqlx::test]
    async fn test_garbage_cookie_returns_unauthorized(pool: SqlitePool) {
        let state = test_state(pool);
        let cookie_name = state.config.auth.session.cookie_name.clone();

        let mut parts = parts_with_cookie(Some(format!("{cookie_name}=not-a-jwt")));
        let err = CurrentUser::from_request_parts(&mut parts, &state).await.unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[sqlx::test]
    async fn test_require_admin_rejects_regular_user(pool: SqlitePool) {
        let state = test_state(pool);
        let user = test_user(Role::User);
        let token = create_session_token(&user, &state.config).unwrap();
        let cookie_name = &state.config.auth.session.cookie_name;

        let mut parts = parts_with_cookie(Some(format!("{cookie_name}={token}")));
        let err = RequireAdmin::from_request_parts(&mut parts, &state).await.unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::FORBIDDEN);
    }

    #[sqlx::test]
    async fn test_require_admin_accepts_admin(pool: SqlitePool) {
        let state = test_state(pool);
        let user = test_user(Role::Admin);
        let token = create_session_token(&user, &state.config).unwrap();
        let cookie_name = &state.config.auth.session.cookie_name;

        let mut parts = parts_with_cookie(Some(format!("{cookie_name}={token}")));
        let RequireAdmin(extracted) = RequireAdmin::from_request_parts(&mut parts, &state).await.unwrap();
        assert!(extracted.is_admin());
    }
}
