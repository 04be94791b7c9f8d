//! Domain services: one typed method per stored procedure.
//!
//! Methods take already-validated input, bind it in the procedure's
//! declared parameter order and decode the returned rows.

pub mod comment_service;
pub mod community_service;
pub mod post_service;
pub mod reaction_service;

pub use comment_service::CommentService;
pub use community_service::CommunityService;
pub use post_service::PostService;
pub use reaction_service::ReactionService;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::database::{DecodeError, ErrorCode, InvokeError, Procedure, ProcedureInvoker, Row};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Invoke(#[from] InvokeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A lookup matched nothing.
    #[error("{0} returned no match")]
    NotFound(ErrorCode),

    /// A procedure that always returns one row returned none.
    #[error("{procedure} returned no rows")]
    EmptyResult { procedure: Procedure },
}

impl ServiceError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ServiceError::Invoke(err) => err.code(),
            ServiceError::NotFound(code) => *code,
            ServiceError::Decode(_) | ServiceError::EmptyResult { .. } => ErrorCode::InternalError,
        }
    }
}

/// Decode the first row of a single-row procedure.
pub(crate) fn first_row<T: DeserializeOwned>(
    procedure: Procedure,
    rows: &[Row],
) -> Result<T, ServiceError> {
    let row = rows
        .first()
        .ok_or(ServiceError::EmptyResult { procedure })?;
    Ok(row.decode()?)
}

/// Every service holds the same invoker handle.
#[derive(Clone)]
pub struct Services {
    pub communities: CommunityService,
    pub posts: PostService,
    pub comments: CommentService,
    pub reactions: ReactionService,
}

impl Services {
    pub fn new(invoker: ProcedureInvoker) -> Self {
        Self {
            communities: CommunityService::new(invoker.clone()),
            posts: PostService::new(invoker.clone()),
            comments: CommentService::new(invoker.clone()),
            reactions: ReactionService::new(invoker),
        }
    }
}
