use thiserror::Error;

/// Unified error type for database operations that application code can handle
#[derive(Error, Debug)]
pub enum DbError {
    /// Entity not found by the given identifier
    #[error("Entity not found")]
    NotFound,

    /// Unique constraint violation
    #[error("Unique constraint violation")]
    UniqueViolation {
        /// SQLite reports the violated columns in the message text
        /// (e.g. "UNIQUE constraint failed: users.email")
        message: String,
    },

    /// Foreign key constraint violation
    #[error("Foreign key constraint violation")]
    ForeignKeyViolation { message: String },

    /// Check constraint violation
    #[error("Check constraint violation")]
    CheckViolation { message: String },

    /// Catch-all for non-recoverable errors (store unavailable, locked past
    /// the busy timeout, corrupt, ...)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convert from sqlx::Error using sqlx's error categorization.
///
/// SQLite does not expose constraint/table names structurally the way
/// Postgres does, so the driver message is carried along for the API layer to
/// classify (it never reaches the client verbatim).
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => DbError::NotFound,
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    DbError::UniqueViolation {
                        message: db_err.message().to_string(),
                    }
                } else if db_err.is_foreign_key_violation()
                    // ON DELETE RESTRICT failures surface as
                    // SQLITE_CONSTRAINT_TRIGGER (extended code 1811), which
                    // sqlx does not classify as a foreign key violation.
                    || db_err.message().contains("FOREIGN KEY constraint failed")
                {
                    DbError::ForeignKeyViolation {
                        message: db_err.message().to_string(),
                    }
                } else if db_err.is_check_violation() {
                    DbError::CheckViolation {
                        message: db_err.message().to_string(),
                    }
                } else {
                    // All other database errors are non-recoverable - convert to anyhow
                    DbError::Other(anyhow::Error::from(err))
                }
            }
            // All other sqlx errors are non-recoverable - convert to anyhow with context
            _ => DbError::Other(anyhow::Error::from(err)),
        }
    }
}

impl DbError {
    /// Whether this unique violation is the users.email uniqueness rule.
    pub fn is_email_conflict(&self) -> bool {
        matches!(self, DbError::UniqueViolation { message } if message.contains("users.email"))
    }
}

/// Type alias for database operation results
pub type Result<T> = std::result::Result<T, DbError>;
