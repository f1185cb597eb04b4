//! guestdesk - a guest self-service backend.
//!
//! Guests register an account, book services, file complaints and track their
//! invoices. Admins get an aggregate dashboard and may override record
//! statuses for any account. Everything is stored in an embedded SQLite
//! database, so a single binary plus one file on disk is a full deployment.
//!
//! The crate is organized in layers:
//!
//! - [`api`]: HTTP models and handlers (axum)
//! - [`auth`]: password hashing and JWT cookie sessions
//! - [`db`]: repositories over SQLite (sqlx)
//! - [`config`]: YAML + environment configuration (figment)

use anyhow::Context;
use axum::{
    Router,
    extract::State,
    http::HeaderValue,
    routing::{delete, get, post, put},
};
use bon::Builder;
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod openapi;
pub mod telemetry;
#[cfg(test)]
pub mod test_utils;
pub mod types;

pub use crate::config::Config;

use crate::api::models::users::Role;
use crate::auth::password;
use crate::db::handlers::{Repository, Users};
use crate::db::models::users::UserCreateDBRequest;
use crate::errors::Error;
use crate::openapi::ApiDoc;
use crate::types::UserId;

/// Shared application state available to every handler.
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Config,
}

/// Get the guestdesk database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Create the initial admin user if it doesn't exist.
///
/// This function is idempotent - it creates a new admin user if one doesn't
/// exist, or updates the password if the user already exists. It is called
/// during application startup so there is always an admin account available.
#[instrument(skip_all)]
pub async fn create_initial_admin_user(email: &str, password: Option<&str>, db: &SqlitePool) -> Result<UserId, sqlx::Error> {
    let password_hash = if let Some(pwd) = password {
        Some(password::hash_string(pwd).map_err(|e| sqlx::Error::Encode(format!("Failed to hash admin password: {e}").into()))?)
    } else {
        None
    };

    let mut tx = db.begin().await?;
    let mut user_repo = Users::new(&mut tx);

    if let Some(existing_user) = user_repo
        .get_user_by_email(email)
        .await
        .map_err(|e| sqlx::Error::Protocol(format!("Failed to check existing user: {e}")))?
    {
        // User exists - update password if provided
        if let Some(password_hash) = password_hash {
            sqlx::query("UPDATE users SET password_hash = ? WHERE email = ?")
                .bind(password_hash)
                .bind(email)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        return Ok(existing_user.id);
    }

    let user_create = UserCreateDBRequest {
        name: email.to_string(),
        email: email.to_string(),
        password_hash,
        role: Role::Admin,
        room_no: None,
        phone: None,
    };

    let mut user_repo = Users::new(&mut tx);
    let created_user = user_repo
        .create(&user_create)
        .await
        .map_err(|e| sqlx::Error::Protocol(format!("Failed to create admin user: {e}")))?;

    tx.commit().await?;
    Ok(created_user.id)
}

/// Idempotently apply the schema migrations.
///
/// Migrations also run on startup; this route exists so an operator can
/// (re)initialize the database file without restarting the server.
async fn init_db(State(state): State<AppState>) -> Result<&'static str, Error> {
    migrator().run(&state.db).await.map_err(|e| Error::Internal {
        operation: format!("apply database migrations: {e}"),
    })?;
    Ok("OK")
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let mut origins = Vec::new();
    for origin in &config.cors.allowed_origins {
        origins.push(origin.parse::<HeaderValue>().with_context(|| format!("invalid CORS origin: {origin}"))?);
    }

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(config.cors.allow_credentials))
}

/// Build the application router with all endpoints and middleware.
pub fn build_router(state: &AppState) -> anyhow::Result<Router> {
    let router = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/init-db", get(init_db))
        // Sessions
        .route("/register", post(api::handlers::auth::register))
        .route("/login", post(api::handlers::auth::login))
        .route("/logout", post(api::handlers::auth::logout))
        .route("/me", get(api::handlers::auth::me))
        // Guest resources
        .route(
            "/services",
            get(api::handlers::services::list_services).post(api::handlers::services::create_service),
        )
        .route(
            "/services/{id}",
            put(api::handlers::services::update_service).delete(api::handlers::services::delete_service),
        )
        .route(
            "/reservations",
            get(api::handlers::reservations::list_reservations).post(api::handlers::reservations::create_reservation),
        )
        .route("/reservations/{id}", delete(api::handlers::reservations::delete_reservation))
        .route(
            "/complaints",
            get(api::handlers::complaints::list_complaints).post(api::handlers::complaints::create_complaint),
        )
        .route(
            "/invoices",
            get(api::handlers::invoices::list_invoices).post(api::handlers::invoices::create_invoice),
        )
        .route("/invoices/{id}/status", put(api::handlers::invoices::update_invoice_status))
        .route("/upload_invoices", post(api::handlers::invoices::upload_invoices))
        // Admin surface
        .route("/dashboard", get(api::handlers::admin::dashboard))
        .route("/admin/users", get(api::handlers::admin::list_users))
        .route("/admin/user/{id}", get(api::handlers::admin::user_detail))
        .route("/admin/complaints", get(api::handlers::admin::list_complaints))
        .route("/admin/complaint/{id}/status", post(api::handlers::admin::update_complaint_status))
        .route("/admin/reservation/{id}/status", post(api::handlers::admin::update_reservation_status))
        .route("/admin/invoice/{id}/status", post(api::handlers::admin::update_invoice_status))
        .with_state(state.clone())
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    let cors_layer = create_cors_layer(&state.config)?;

    let router = router.layer(cors_layer).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// A fully initialized server, ready to run.
pub struct Application {
    router: Router,
    config: Config,
    pool: SqlitePool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let pool = db::pool::connect(&config.database.path, config.database.max_connections)
            .await
            .context("Failed to open database")?;

        migrator().run(&pool).await.context("Failed to apply database migrations")?;

        create_initial_admin_user(&config.admin_email, config.admin_password.as_deref(), &pool)
            .await
            .context("Failed to create initial admin user")?;

        let state = AppState::builder().db(pool.clone()).config(config.clone()).build();
        let router = build_router(&state)?;

        Ok(Self { router, config, pool })
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!("guestdesk listening on http://{bind_addr}");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}
