//! Handlers for guest invoices, including the CSV upload path.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::models::{
        invoices::{
            InvoiceCreate, InvoiceImportResponse, InvoicePaidUpdate, InvoiceResponse, InvoiceSource,
        },
        users::CurrentUser,
    },
    db::{
        handlers::{Invoices, Repository},
        models::invoices::{InvoiceCreateDBRequest, InvoiceFilter, InvoiceImportRow},
    },
    errors::Error,
    types::InvoiceId,
    AppState,
};

const DEFAULT_CURRENCY: &str = "TRY";

/// List the caller's invoices
#[utoipa::path(
    get,
    path = "/invoices",
    tag = "invoices",
    responses(
        (status = 200, description = "Caller's invoices", body = Vec<InvoiceResponse>),
        (status = 401, description = "Not authenticated"),
    ),
    security(("session_token" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_invoices(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<Vec<InvoiceResponse>>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let filter = InvoiceFilter {
        user_id: Some(current_user.id),
    };
    let invoices = Invoices::new(&mut conn).list(&filter).await?;

    Ok(Json(invoices.into_iter().map(InvoiceResponse::from).collect()))
}

/// Create an invoice for the caller
#[utoipa::path(
    post,
    path = "/invoices",
    request_body = InvoiceCreate,
    tag = "invoices",
    responses(
        (status = 201, description = "Invoice created", body = InvoiceResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Not authenticated"),
    ),
    security(("session_token" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_invoice(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<InvoiceCreate>,
) -> Result<(StatusCode, Json<InvoiceResponse>), Error> {
    if request.total_amount < 0.0 {
        return Err(Error::BadRequest {
            message: "total_amount must not be negative".to_string(),
        });
    }

    let issued_at = request
        .issued_at
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::BadRequest {
            message: "issued_at is required".to_string(),
        })?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let create_request = InvoiceCreateDBRequest {
        user_id: current_user.id,
        total_amount: request.total_amount,
        currency: request.currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        issued_at: issued_at.to_string(),
        paid: request.paid.unwrap_or(false),
        source: InvoiceSource::Manual,
    };
    let invoice = Invoices::new(&mut conn).create(&create_request).await?;

    Ok((StatusCode::CREATED, Json(InvoiceResponse::from(invoice))))
}

/// Mark one of the caller's invoices paid or unpaid
///
/// Admins may update any invoice.
#[utoipa::path(
    put,
    path = "/invoices/{id}/status",
    request_body = InvoicePaidUpdate,
    tag = "invoices",
    params(("id" = i64, Path, description = "Invoice ID")),
    responses(
        (status = 200, description = "Invoice updated", body = InvoiceResponse),
        (status = 403, description = "Invoice belongs to another user"),
        (status = 404, description = "Invoice not found"),
    ),
    security(("session_token" = []))
)]
#[tracing::instrument(skip_all, fields(invoice_id = id))]
pub async fn update_invoice_status(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<InvoiceId>,
    Json(request): Json<InvoicePaidUpdate>,
) -> Result<Json<InvoiceResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Invoices::new(&mut conn);

    let invoice = repo.get_by_id(id).await?.ok_or_else(|| Error::NotFound {
        resource: "Invoice".to_string(),
        id: id.to_string(),
    })?;

    if invoice.user_id != current_user.id && !current_user.is_admin() {
        return Err(Error::Forbidden {
            message: "You can only update your own invoices".to_string(),
        });
    }

    let updated = repo
        .update(
            id,
            &crate::db::models::invoices::InvoiceUpdateDBRequest {
                paid: Some(request.paid),
            },
        )
        .await?;

    Ok(Json(InvoiceResponse::from(updated)))
}

/// Upload a CSV of invoices for the caller
///
/// Expects a multipart form with a `file` field. The CSV must have a header
/// row with at least `total_amount` and `issued_at`; `currency` and `paid`
/// are optional. The whole file is imported in one transaction, so a single
/// malformed row rejects the entire upload.
#[utoipa::path(
    post,
    path = "/upload_invoices",
    tag = "invoices",
    request_body(
        content_type = "multipart/form-data",
        description = "CSV file upload"
    ),
    responses(
        (status = 201, description = "Invoices imported", body = InvoiceImportResponse),
        (status = 400, description = "Missing file or malformed CSV"),
        (status = 401, description = "Not authenticated"),
    ),
    security(("session_token" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn upload_invoices(
    State(state): State<AppState>,
    current_user: CurrentUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<InvoiceImportResponse>), Error> {
    let mut file_contents: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| Error::BadRequest {
        message: format!("Failed to parse multipart data: {e}"),
    })? {
        if field.name() != Some("file") {
            continue;
        }

        if field.file_name().map(str::trim).unwrap_or("").is_empty() {
            return Err(Error::BadRequest {
                message: "Empty filename".to_string(),
            });
        }

        let bytes = field.bytes().await.map_err(|e| Error::BadRequest {
            message: format!("Failed to read uploaded file: {e}"),
        })?;
        file_contents = Some(bytes.to_vec());
    }

    let file_contents = file_contents.ok_or_else(|| Error::BadRequest {
        message: "No file provided".to_string(),
    })?;

    let rows = parse_invoice_csv(&file_contents)?;
    if rows.is_empty() {
        return Err(Error::BadRequest {
            message: "CSV contains no invoice rows".to_string(),
        });
    }

    // All-or-nothing import: one transaction for the whole file.
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let imported = Invoices::new(&mut tx).import_batch(current_user.id, &rows).await?;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok((
        StatusCode::CREATED,
        Json(InvoiceImportResponse {
            imported,
            message: format!("Imported {imported} invoices"),
        }),
    ))
}

/// Parse CSV bytes into import rows. Any malformed row (bad number, wrong
/// column count) fails the whole parse.
fn parse_invoice_csv(contents: &[u8]) -> Result<Vec<InvoiceImportRow>, Error> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(contents);

    let mut rows = Vec::new();
    for (index, record) in reader.deserialize::<InvoiceImportRow>().enumerate() {
        let row = record.map_err(|e| Error::BadRequest {
            message: format!("Malformed CSV row {}: {e}", index + 1),
        })?;

        if row.total_amount < 0.0 {
            return Err(Error::BadRequest {
                message: format!("Malformed CSV row {}: total_amount must not be negative", index + 1),
            });
        }

        rows.push(row);
    }

    Ok(rows)
}
