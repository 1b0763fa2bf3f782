use rusqlite::ErrorCode;
use rusqlite::ffi;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[source] rusqlite::Error),

    #[error("not found")]
    NotFound,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("referenced row does not exist: {0}")]
    Referential(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        let Some(extended_code) = err
            .sqlite_error()
            .filter(|failure| failure.code == ErrorCode::ConstraintViolation)
            .map(|failure| failure.extended_code)
        else {
            return Error::Database(err);
        };

        match extended_code {
            ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Error::Referential(err.to_string()),
            ffi::SQLITE_CONSTRAINT_CHECK | ffi::SQLITE_CONSTRAINT_NOTNULL => {
                Error::Validation(err.to_string())
            }
            _ => Error::Database(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
