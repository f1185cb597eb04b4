//! API request/response models for invoices.

use crate::db::models::invoices::InvoiceDBResponse;
use crate::types::{InvoiceId, UserId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Where an invoice row came from. `csv` rows are created by the bulk import
/// endpoint, `system` rows by internal billing, `manual` rows by an admin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InvoiceSource {
    Manual,
    System,
    Csv,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InvoiceCreate {
    pub total_amount: f64,
    pub currency: Option<String>,
    pub issued_at: Option<String>,
    pub paid: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InvoiceResponse {
    pub id: InvoiceId,
    pub user_id: UserId,
    pub total_amount: f64,
    pub currency: String,
    pub issued_at: String,
    pub paid: bool,
    pub source: InvoiceSource,
}

impl From<InvoiceDBResponse> for InvoiceResponse {
    fn from(db: InvoiceDBResponse) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            total_amount: db.total_amount,
            currency: db.currency,
            issued_at: db.issued_at,
            paid: db.paid,
            source: db.source,
        }
    }
}

/// Body for marking an invoice paid or unpaid.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InvoicePaidUpdate {
    pub paid: bool,
}

/// Result summary returned by the CSV import endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InvoiceImportResponse {
    pub imported: usize,
    pub message: String,
}
