//! Database models for invoices.

use crate::api::models::invoices::InvoiceSource;
use crate::types::{InvoiceId, UserId};
use serde::Deserialize;
use sqlx::FromRow;

/// Database request for creating a new invoice
#[derive(Debug, Clone)]
pub struct InvoiceCreateDBRequest {
    pub user_id: UserId,
    pub total_amount: f64,
    pub currency: String,
    pub issued_at: String,
    pub paid: bool,
    pub source: InvoiceSource,
}

/// Database request for updating an invoice
#[derive(Debug, Clone, Default)]
pub struct InvoiceUpdateDBRequest {
    pub paid: Option<bool>,
}

/// Database response for an invoice
#[derive(Debug, Clone, FromRow)]
pub struct InvoiceDBResponse {
    pub id: InvoiceId,
    pub user_id: UserId,
    pub total_amount: f64,
    pub currency: String,
    pub issued_at: String,
    pub paid: bool,
    pub source: InvoiceSource,
}

/// One record of a CSV import file. Field names match the expected header
/// row; `total_amount` and `issued_at` are required, `currency` and `paid`
/// fall back to their schema defaults when the column is absent.
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceImportRow {
    pub total_amount: f64,
    #[serde(default)]
    pub currency: Option<String>,
    pub issued_at: String,
    #[serde(default)]
    pub paid: Option<bool>,
}

/// List filter; `user_id` scopes the listing to one owner.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvoiceFilter {
    pub user_id: Option<UserId>,
}
