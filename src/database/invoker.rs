//! Procedure Invoker: runs one [`ProcedureCall`] and classifies whatever
//! goes wrong.
//!
//! Every call resolves to either the full row set or exactly one
//! [`InvokeError`]. Nothing is retried here: a repeated "join community" or
//! "create post" would apply its side effect twice.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, warn};

use super::error_code::ErrorCode;
use super::executor::{ExecutorError, ProcedureExecutor};
use super::procedure::{Procedure, ProcedureCall};
use super::row::Row;

#[derive(Debug, Error)]
pub enum InvokeError {
    /// Business-rule violation raised by the procedure.
    #[error("{procedure} raised {code}")]
    Domain { procedure: Procedure, code: ErrorCode },

    /// Anything else the data layer threw at us.
    #[error("{procedure} failed with {code}: {source}")]
    Infrastructure {
        procedure: Procedure,
        code: ErrorCode,
        #[source]
        source: ExecutorError,
    },
}

impl InvokeError {
    pub fn code(&self) -> ErrorCode {
        match self {
            InvokeError::Domain { code, .. } | InvokeError::Infrastructure { code, .. } => *code,
        }
    }

    /// Sort a raw executor failure into the taxonomy.
    pub fn classify(procedure: Procedure, err: ExecutorError) -> Self {
        match err {
            ExecutorError::Raised(message) => InvokeError::Domain {
                procedure,
                code: ErrorCode::classify(&message),
            },
            ExecutorError::Database { .. } => InvokeError::Infrastructure {
                procedure,
                code: ErrorCode::DatabaseError,
                source: err,
            },
            other => InvokeError::Infrastructure {
                procedure,
                code: ErrorCode::InternalError,
                source: other,
            },
        }
    }
}

#[derive(Clone)]
pub struct ProcedureInvoker {
    executor: Arc<dyn ProcedureExecutor>,
}

impl ProcedureInvoker {
    pub fn new(executor: Arc<dyn ProcedureExecutor>) -> Self {
        Self { executor }
    }

    pub async fn invoke(&self, call: ProcedureCall) -> Result<Vec<Row>, InvokeError> {
        let procedure = call.procedure();

        if tracing::enabled!(tracing::Level::DEBUG) {
            let params = call
                .params()
                .iter()
                .map(|(name, value)| format!("{}={}", name, value.preview()))
                .collect::<Vec<_>>()
                .join(", ");
            debug!(%procedure, %params, "executing stored procedure");
        }

        match self.executor.execute(&call).await {
            Ok(rows) => {
                debug!(%procedure, row_count = rows.len(), "stored procedure succeeded");
                Ok(rows)
            }
            Err(err) => {
                let raw = err.to_string();
                let classified = InvokeError::classify(procedure, err);
                match &classified {
                    InvokeError::Domain { code, .. } if code.is_domain() => {
                        warn!(%procedure, error_code = %code, error_message = %raw, "stored procedure error");
                    }
                    InvokeError::Domain { code, .. } => {
                        error!(%procedure, error_code = %code, error_message = %raw, "unrecognized stored procedure error");
                    }
                    InvokeError::Infrastructure { code, .. } => {
                        error!(%procedure, error_code = %code, error = %raw, "database error");
                    }
                }
                Err(classified)
            }
        }
    }

    pub async fn ping(&self) -> Result<(), ExecutorError> {
        self.executor.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedExecutor;
    use serde_json::json;
    use std::time::Duration;
    use uuid::Uuid;

    fn join_call() -> ProcedureCall {
        ProcedureCall::new(Procedure::CommunityJoin)
            .bind("p_community_id", Uuid::new_v4())
            .bind("p_user_id", Uuid::new_v4())
    }

    #[tokio::test]
    async fn returns_all_rows_on_success() {
        let executor = ScriptedExecutor::new();
        executor.push_rows(vec![json!({"a": 1}), json!({"a": 2})]);
        let invoker = ProcedureInvoker::new(executor.clone());

        let rows = invoker.invoke(join_call()).await.unwrap();
        assert_eq!(rows.len(), 2);

        let calls = executor.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].procedure(), Procedure::CommunityJoin);
    }

    #[tokio::test]
    async fn raised_tag_becomes_domain_error() {
        let executor = ScriptedExecutor::new();
        executor.push_error(ExecutorError::Raised("ALREADY_MEMBER".into()));
        let invoker = ProcedureInvoker::new(executor);

        let err = invoker.invoke(join_call()).await.unwrap_err();
        assert!(matches!(
            err,
            InvokeError::Domain { code: ErrorCode::AlreadyMember, .. }
        ));
    }

    #[tokio::test]
    async fn raised_without_tag_is_unknown() {
        let executor = ScriptedExecutor::new();
        executor.push_error(ExecutorError::Raised("something odd happened".into()));
        let invoker = ProcedureInvoker::new(executor);

        let err = invoker.invoke(join_call()).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnknownError);
    }

    #[tokio::test]
    async fn untagged_database_fault_is_database_error() {
        let executor = ScriptedExecutor::new();
        executor.push_error(ExecutorError::Database {
            code: Some("23505".into()),
            message: "duplicate key value violates unique constraint".into(),
        });
        let invoker = ProcedureInvoker::new(executor);

        let err = invoker.invoke(join_call()).await.unwrap_err();
        assert!(matches!(
            err,
            InvokeError::Infrastructure { code: ErrorCode::DatabaseError, .. }
        ));
    }

    #[tokio::test]
    async fn timeouts_and_pool_faults_are_internal_errors() {
        let executor = ScriptedExecutor::new();
        executor.push_error(ExecutorError::Timeout(Duration::from_secs(60)));
        executor.push_error(ExecutorError::Pool("pool timed out".into()));
        let invoker = ProcedureInvoker::new(executor.clone());

        for _ in 0..2 {
            let err = invoker.invoke(join_call()).await.unwrap_err();
            assert_eq!(err.code(), ErrorCode::InternalError);
        }
        // One attempt per invoke, never retried.
        assert_eq!(executor.calls().len(), 2);
    }

    #[tokio::test]
    async fn ping_follows_executor_health() {
        let executor = ScriptedExecutor::new();
        let invoker = ProcedureInvoker::new(executor.clone());
        assert!(invoker.ping().await.is_ok());

        executor.set_healthy(false);
        assert!(matches!(invoker.ping().await, Err(ExecutorError::Pool(_))));
        assert!(executor.calls().is_empty());
    }
}
