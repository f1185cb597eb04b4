//! SQLite pool construction.
//!
//! Every connection handed out by the pool carries the same pragmas:
//! foreign-key enforcement is on (the schema relies on RESTRICT/CASCADE
//! rules), the journal runs in WAL mode so readers are not blocked by the
//! single writer, and lock waits give up after a bounded busy timeout instead
//! of stalling a request forever.

use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

/// How long a connection waits on the write lock before the request fails.
const BUSY_TIMEOUT: Duration = Duration::from_secs(10);

/// Open (creating if missing) the single-file store at `path`.
pub async fn connect(path: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);

    SqlitePoolOptions::new().max_connections(max_connections).connect_with(options).await
}
