//! Database repository for invoices, including the CSV bulk import path.

use crate::{
    api::models::invoices::InvoiceSource,
    db::{
        errors::{DbError, Result},
        handlers::repository::Repository,
        models::invoices::{
            InvoiceCreateDBRequest, InvoiceDBResponse, InvoiceFilter, InvoiceImportRow,
            InvoiceUpdateDBRequest,
        },
    },
    types::{InvoiceId, UserId},
};
use sqlx::SqliteConnection;
use tracing::instrument;

const SELECT_COLUMNS: &str = "id, user_id, total_amount, currency, issued_at, paid, source";

const DEFAULT_CURRENCY: &str = "TRY";

pub struct Invoices<'c> {
    db: &'c mut SqliteConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for Invoices<'c> {
    type CreateRequest = InvoiceCreateDBRequest;
    type UpdateRequest = InvoiceUpdateDBRequest;
    type Response = InvoiceDBResponse;
    type Id = InvoiceId;
    type Filter = InvoiceFilter;

    #[instrument(skip(self, request), fields(user_id = request.user_id), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let invoice = sqlx::query_as::<_, InvoiceDBResponse>(&format!(
            r#"
            INSERT INTO invoices (user_id, total_amount, currency, issued_at, paid, source)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING {SELECT_COLUMNS}
            "#,
        ))
        .bind(request.user_id)
        .bind(request.total_amount)
        .bind(&request.currency)
        .bind(&request.issued_at)
        .bind(request.paid)
        .bind(request.source)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(invoice)
    }

    #[instrument(skip(self), fields(invoice_id = id), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let invoice = sqlx::query_as::<_, InvoiceDBResponse>(&format!(
            "SELECT {SELECT_COLUMNS} FROM invoices WHERE id = ?",
        ))
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(invoice)
    }

    #[instrument(skip(self, filter), fields(user_id = filter.user_id), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let invoices = sqlx::query_as::<_, InvoiceDBResponse>(&format!(
            "SELECT {SELECT_COLUMNS} FROM invoices WHERE (? IS NULL OR user_id = ?) ORDER BY id DESC",
        ))
        .bind(filter.user_id)
        .bind(filter.user_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(invoices)
    }

    #[instrument(skip(self, request), fields(invoice_id = id), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let invoice = sqlx::query_as::<_, InvoiceDBResponse>(&format!(
            r#"
            UPDATE invoices SET
                paid = COALESCE(?, paid)
            WHERE id = ?
            RETURNING {SELECT_COLUMNS}
            "#,
        ))
        .bind(request.paid)
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(invoice)
    }

    #[instrument(skip(self), fields(invoice_id = id), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = ?")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl<'c> Invoices<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }

    /// Insert a batch of imported rows for one user. Callers run this inside
    /// a transaction so a bad row aborts the whole file.
    #[instrument(skip(self, rows), fields(user_id = user_id, count = rows.len()), err)]
    pub async fn import_batch(&mut self, user_id: UserId, rows: &[InvoiceImportRow]) -> Result<usize> {
        for row in rows {
            sqlx::query(
                "INSERT INTO invoices (user_id, total_amount, currency, issued_at, paid, source) VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(user_id)
            .bind(row.total_amount)
            .bind(row.currency.as_deref().unwrap_or(DEFAULT_CURRENCY))
            .bind(&row.issued_at)
            .bind(row.paid.unwrap_or(false))
            .bind(InvoiceSource::Csv)
            .execute(&mut *self.db)
            .await?;
        }

        Ok(rows.len())
    }

    /// Sum of all paid invoice amounts, across every user.
    #[instrument(skip(self), err)]
    pub async fn total_income(&mut self) -> Result<f64> {
        let total: (f64,) =
            sqlx::query_as("SELECT COALESCE(SUM(total_amount), 0.0) FROM invoices WHERE paid = 1")
                .fetch_one(&mut *self.db)
                .await?;

        Ok(total.0)
    }
}
