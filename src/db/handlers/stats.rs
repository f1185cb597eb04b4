//! Aggregate queries backing the admin dashboard.

use crate::db::errors::Result;
use crate::db::handlers::{Complaints, Invoices, Reservations, Users};
use sqlx::SqliteConnection;
use tracing::instrument;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardStats {
    pub user_count: i64,
    pub reservation_count: i64,
    pub open_complaint_count: i64,
    pub total_income: f64,
}

/// Collect the dashboard aggregates over one connection. The four counts are
/// separate queries; a consistent point-in-time snapshot is not required here.
#[instrument(skip(db), err)]
pub async fn dashboard_stats(db: &mut SqliteConnection) -> Result<DashboardStats> {
    let user_count = Users::new(&mut *db).count().await?;
    let reservation_count = Reservations::new(&mut *db).count().await?;
    let open_complaint_count = Complaints::new(&mut *db).count_open().await?;
    let total_income = Invoices::new(&mut *db).total_income().await?;

    Ok(DashboardStats {
        user_count,
        reservation_count,
        open_complaint_count,
        total_income,
    })
}
