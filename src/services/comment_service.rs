use tracing::info;
use uuid::Uuid;

use super::{first_row, ServiceError};
use crate::database::{decode_page, Procedure, ProcedureCall, ProcedureInvoker, RowPage};
use crate::models::comment::{
    CommentCreateRequest, CommentCreateResponse, CommentDeleteResponse, CommentListItem,
    CommentUpdateRequest, CommentUpdateResponse,
};
use crate::models::Pagination;

#[derive(Clone)]
pub struct CommentService {
    invoker: ProcedureInvoker,
}

impl CommentService {
    pub fn new(invoker: ProcedureInvoker) -> Self {
        Self { invoker }
    }

    pub async fn create_comment(
        &self,
        post_id: Uuid,
        author_user_id: Uuid,
        request: CommentCreateRequest,
    ) -> Result<CommentCreateResponse, ServiceError> {
        info!(%post_id, "creating comment");

        let call = ProcedureCall::new(Procedure::CommentCreate)
            .bind("p_post_id", post_id)
            .bind("p_author_user_id", author_user_id)
            .bind("p_parent_comment_id", request.parent_comment_id)
            .bind("p_content", request.content);

        let rows = self.invoker.invoke(call).await?;
        first_row(Procedure::CommentCreate, &rows)
    }

    pub async fn update_comment(
        &self,
        comment_id: Uuid,
        updating_user_id: Uuid,
        request: CommentUpdateRequest,
    ) -> Result<CommentUpdateResponse, ServiceError> {
        info!(%comment_id, "updating comment");

        let call = ProcedureCall::new(Procedure::CommentUpdate)
            .bind("p_comment_id", comment_id)
            .bind("p_updating_user_id", updating_user_id)
            .bind("p_content", request.content);

        let rows = self.invoker.invoke(call).await?;
        first_row(Procedure::CommentUpdate, &rows)
    }

    pub async fn delete_comment(
        &self,
        comment_id: Uuid,
        deleting_user_id: Uuid,
    ) -> Result<CommentDeleteResponse, ServiceError> {
        info!(%comment_id, "deleting comment");

        let call = ProcedureCall::new(Procedure::CommentDelete)
            .bind("p_comment_id", comment_id)
            .bind("p_deleting_user_id", deleting_user_id);

        let rows = self.invoker.invoke(call).await?;
        first_row(Procedure::CommentDelete, &rows)
    }

    /// Top-level comments when `parent_comment_id` is `None`, otherwise the
    /// direct replies to that comment.
    pub async fn get_comments(
        &self,
        post_id: Uuid,
        parent_comment_id: Option<Uuid>,
        page: Pagination,
    ) -> Result<RowPage<CommentListItem>, ServiceError> {
        info!(%post_id, "getting comments");

        let call = ProcedureCall::new(Procedure::PostGetComments)
            .bind("p_post_id", post_id)
            .bind("p_parent_comment_id", parent_comment_id)
            .bind("p_limit", page.limit)
            .bind("p_offset", page.offset);

        let rows = self.invoker.invoke(call).await?;
        Ok(decode_page(&rows)?)
    }
}
