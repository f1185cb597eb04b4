//! Shared helpers for handler tests.

use axum_test::TestServer;
use serde_json::json;
use sqlx::SqlitePool;

use crate::api::models::users::{AuthResponse, UserResponse};
use crate::config::{AuthConfig, Config, PasswordConfig, SessionConfig};

pub const TEST_ADMIN_EMAIL: &str = "admin@test.com";
pub const TEST_ADMIN_PASSWORD: &str = "admin-password-123";

/// The password used by [`register_and_login`].
pub const TEST_PASSWORD: &str = "password123";

pub fn create_test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        admin_email: TEST_ADMIN_EMAIL.to_string(),
        admin_password: Some(TEST_ADMIN_PASSWORD.to_string()),
        secret_key: Some("test-secret-key-for-testing-only".to_string()),
        auth: AuthConfig {
            session: SessionConfig {
                timeout: std::time::Duration::from_secs(3600),
                cookie_name: "session_token".to_string(),
                // Tests run over plain HTTP
                cookie_secure: false,
                cookie_same_site: "lax".to_string(),
            },
            password: PasswordConfig {
                min_length: 8,
                max_length: 128,
            },
        },
        ..Config::default()
    }
}

/// Build a test server over the given pool, with the initial admin user
/// bootstrapped and cookie persistence enabled so sessions survive across
/// requests on the same server.
pub async fn create_test_app(pool: SqlitePool) -> TestServer {
    let config = create_test_config();

    crate::create_initial_admin_user(&config.admin_email, config.admin_password.as_deref(), &pool)
        .await
        .expect("Failed to create initial admin user");

    let state = crate::AppState::builder().db(pool).config(config).build();
    let router = crate::build_router(&state).expect("Failed to build router");

    let mut server = TestServer::new(router).expect("Failed to create test server");
    server.save_cookies();
    server
}

/// Register a fresh guest account and leave its session cookie on the server.
pub async fn register_and_login(server: &TestServer, email: &str) -> UserResponse {
    let name = email.split('@').next().unwrap_or(email);
    let response = server
        .post("/register")
        .json(&json!({
            "name": name,
            "email": email,
            "password": TEST_PASSWORD,
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<AuthResponse>().user
}

/// Log in as the bootstrapped admin, leaving its session cookie on the server.
pub async fn login_admin(server: &TestServer) {
    let response = server
        .post("/login")
        .json(&json!({
            "email": TEST_ADMIN_EMAIL,
            "password": TEST_ADMIN_PASSWORD,
        }))
        .await;
    response.assert_status_ok();
}
