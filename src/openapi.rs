//! OpenAPI documentation for the guest API.
//!
//! The generated spec is served interactively at `/docs`.

use utoipa::{
    Modify, OpenApi,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};

use crate::api;

/// Security scheme for the session cookie set by `/login` and `/register`.
struct SessionCookieAddon;

impl Modify for SessionCookieAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "session_token".to_string(),
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    "session_token",
                    "Session cookie issued by `/login` and `/register`. Sent automatically by browsers.",
                ))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "guestdesk API",
        description = "Guest self-service backend: accounts, service reservations, complaints and invoices."
    ),
    paths(
        api::handlers::auth::register,
        api::handlers::auth::login,
        api::handlers::auth::logout,
        api::handlers::auth::me,
        api::handlers::services::list_services,
        api::handlers::services::create_service,
        api::handlers::services::update_service,
        api::handlers::services::delete_service,
        api::handlers::reservations::list_reservations,
        api::handlers::reservations::create_reservation,
        api::handlers::reservations::delete_reservation,
        api::handlers::complaints::list_complaints,
        api::handlers::complaints::create_complaint,
        api::handlers::invoices::list_invoices,
        api::handlers::invoices::create_invoice,
        api::handlers::invoices::update_invoice_status,
        api::handlers::invoices::upload_invoices,
        api::handlers::admin::dashboard,
        api::handlers::admin::list_users,
        api::handlers::admin::user_detail,
        api::handlers::admin::list_complaints,
        api::handlers::admin::update_complaint_status,
        api::handlers::admin::update_reservation_status,
        api::handlers::admin::update_invoice_status,
    ),
    components(schemas(
        api::models::users::Role,
        api::models::users::RegisterRequest,
        api::models::users::LoginRequest,
        api::models::users::UserResponse,
        api::models::users::CurrentUser,
        api::models::users::AuthResponse,
        api::models::users::AuthSuccessResponse,
        api::models::services::ServiceCreate,
        api::models::services::ServiceUpdate,
        api::models::services::ServiceResponse,
        api::models::reservations::ReservationStatus,
        api::models::reservations::ReservationCreate,
        api::models::reservations::ReservationResponse,
        api::models::complaints::ComplaintStatus,
        api::models::complaints::ComplaintCreate,
        api::models::complaints::ComplaintResponse,
        api::models::invoices::InvoiceSource,
        api::models::invoices::InvoiceCreate,
        api::models::invoices::InvoiceResponse,
        api::models::invoices::InvoicePaidUpdate,
        api::models::invoices::InvoiceImportResponse,
        api::models::admin::DashboardResponse,
        api::models::admin::UserDetailResponse,
        api::models::admin::StatusUpdateRequest,
        api::models::admin::MessageResponse,
    )),
    modifiers(&SessionCookieAddon),
    tags(
        (name = "auth", description = "Registration, login and session management"),
        (name = "services", description = "Bookable service catalog"),
        (name = "reservations", description = "Service reservations"),
        (name = "complaints", description = "Guest complaints"),
        (name = "invoices", description = "Invoices and CSV import"),
        (name = "admin", description = "Admin dashboard and status overrides"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::OpenApi;

    #[test]
    fn test_spec_covers_all_routes() {
        let spec = ApiDoc::openapi();
        for path in [
            "/register",
            "/login",
            "/logout",
            "/me",
            "/services",
            "/services/{id}",
            "/reservations",
            "/reservations/{id}",
            "/complaints",
            "/invoices",
            "/invoices/{id}/status",
            "/upload_invoices",
            "/dashboard",
            "/admin/users",
            "/admin/user/{id}",
            "/admin/complaints",
            "/admin/complaint/{id}/status",
            "/admin/reservation/{id}/status",
            "/admin/invoice/{id}/status",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing path {path}");
        }
    }
}
