use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use super::procedure::ProcedureCall;
use super::row::Row;

/// SQLSTATE used by PL/pgSQL `RAISE EXCEPTION` without an explicit code.
pub const RAISE_EXCEPTION_SQLSTATE: &str = "P0001";

/// Raw failure from the data layer, before classification
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// The procedure raised an error on purpose; message carries the tag.
    #[error("procedure raised: {0}")]
    Raised(String),

    #[error("database error: {message}")]
    Database {
        code: Option<String>,
        message: String,
    },

    #[error("connection pool error: {0}")]
    Pool(String),

    #[error("command timed out after {0:?}")]
    Timeout(Duration),

    #[error("failed to read result row: {0}")]
    Decode(String),

    #[error("{0}")]
    Other(String),
}

impl From<sqlx::Error> for ExecutorError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db) => {
                let code = db.code().map(|c| c.into_owned());
                if code.as_deref() == Some(RAISE_EXCEPTION_SQLSTATE) {
                    ExecutorError::Raised(db.message().to_string())
                } else {
                    ExecutorError::Database {
                        code,
                        message: db.message().to_string(),
                    }
                }
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                ExecutorError::Pool(err.to_string())
            }
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::Decode(_)
            | sqlx::Error::TypeNotFound { .. } => ExecutorError::Decode(err.to_string()),
            other => ExecutorError::Other(other.to_string()),
        }
    }
}

/// Something that can run a [`ProcedureCall`] and hand back every row.
///
/// [`super::Database`] is the Postgres implementation; tests substitute
/// in-memory doubles.
#[async_trait]
pub trait ProcedureExecutor: Send + Sync {
    async fn execute(&self, call: &ProcedureCall) -> Result<Vec<Row>, ExecutorError>;

    /// One-shot trivial query used by the health endpoint.
    async fn ping(&self) -> Result<(), ExecutorError>;
}
