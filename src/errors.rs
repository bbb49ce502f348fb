// errors.rs
use thiserror::Error;

/// Errors shared by the request layer, the rent engine and the store.
///
/// The business variants (`NotFound`, `Conflict`, `Forbidden`, `Unauthorized`)
/// are user-actionable and always reach the caller unchanged. `DbError` is
/// opaque: the transaction it interrupted has been rolled back.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Database Error: {0}")]
    DbError(String),
    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound(_) => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::Unauthorized(_) => 401,
            ServerError::Forbidden(_) => 403,
            ServerError::Conflict(_) => 409,
            ServerError::DbError(_) | ServerError::InternalError => 500,
        }
    }

    /// Builds a storage error with a short description of the failed step.
    pub fn db(context: &str, err: rusqlite::Error) -> Self {
        ServerError::DbError(format!("{context}: {err}"))
    }
}

/// True when `err` is a UNIQUE constraint violation (not a trigger abort).
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
