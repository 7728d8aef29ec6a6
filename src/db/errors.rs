use thiserror::Error;

/// Unified error type for database operations that application code can handle.
///
/// Storage failures are classified here and in the repositories' affected-row
/// checks; anything unclassifiable passes through as [`DbError::Other`] for the
/// caller to surface.
#[derive(Error, Debug)]
pub enum DbError {
    /// Entity not found by the given key
    #[error("entity not found")]
    NotFound,

    /// A user with this email already exists (unique constraint on users.email)
    #[error("a user with this email already exists")]
    DuplicateEmail,

    /// Reserved: insert-path failures normally surface as [`DbError::Other`],
    /// but callers may pattern-match on this kind.
    #[error("entity could not be created")]
    NotCreated,

    /// Update affected zero rows. Not-found and nothing-changed are not
    /// distinguished; both surface as this kind.
    #[error("entity could not be updated")]
    NotUpdated,

    /// Soft delete affected zero rows (missing or already deleted)
    #[error("entity could not be deleted")]
    NotDeleted,

    /// Recipient absent from the reel's in-memory collection
    #[error("recipient not found")]
    RecipientNotFound,

    /// Recipient append affected zero rows (reel missing or deleted)
    #[error("recipients could not be added")]
    RecipientsNotAdded,

    /// Recipient soft delete affected zero rows
    #[error("recipient could not be deleted")]
    RecipientNotDeleted,

    /// Catch-all for non-recoverable errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convert from sqlx::Error using sqlx error categorization.
///
/// The only constraint this schema relies on for control flow is the unique
/// index on `users.email`; every other database error is non-recoverable.
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => DbError::NotFound,
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                if db_err.constraint().is_some_and(|c| c.contains("email")) {
                    DbError::DuplicateEmail
                } else {
                    DbError::Other(anyhow::Error::from(err))
                }
            }
            _ => DbError::Other(anyhow::Error::from(err)),
        }
    }
}

/// Type alias for database operation results
pub type Result<T> = std::result::Result<T, DbError>;
