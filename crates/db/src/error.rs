use courseware_core::types::DbId;

/// PostgreSQL SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Errors raised by the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A referenced row does not exist.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A uniqueness constraint was violated.
    #[error("Conflict: {0}")]
    Conflict(String),
}

impl StoreError {
    /// Whether this error is a unique constraint violation, from either store.
    ///
    /// Constraint names starting with `uq_` are the only ones treated as
    /// conflicts; other `23505` errors stay generic database errors.
    pub fn is_conflict(&self) -> bool {
        match self {
            StoreError::Conflict(_) => true,
            StoreError::Database(sqlx::Error::Database(db_err)) => {
                db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
                    && db_err.constraint().is_some_and(|c| c.starts_with("uq_"))
            }
            _ => false,
        }
    }
}
