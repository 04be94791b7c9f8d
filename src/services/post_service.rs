use tracing::info;
use uuid::Uuid;

use super::{first_row, ServiceError};
use crate::database::{decode_page, Procedure, ProcedureCall, ProcedureInvoker, RowPage};
use crate::models::post::{
    PostCreateRequest, PostCreateResponse, PostDeleteResponse, PostListItem, PostUpdateRequest,
    PostUpdateResponse,
};
use crate::models::Pagination;

#[derive(Clone)]
pub struct PostService {
    invoker: ProcedureInvoker,
}

impl PostService {
    pub fn new(invoker: ProcedureInvoker) -> Self {
        Self { invoker }
    }

    pub async fn create_post(
        &self,
        community_id: Uuid,
        author_user_id: Uuid,
        request: PostCreateRequest,
    ) -> Result<PostCreateResponse, ServiceError> {
        info!(%community_id, "creating post");

        let call = ProcedureCall::new(Procedure::PostCreate)
            .bind("p_community_id", community_id)
            .bind("p_author_user_id", author_user_id)
            .bind("p_activity_id", request.activity_id)
            .bind("p_title", request.title)
            .bind("p_content", request.content)
            .bind("p_content_type", request.content_type.as_str());

        let rows = self.invoker.invoke(call).await?;
        first_row(Procedure::PostCreate, &rows)
    }

    /// Fields left `None` are passed as NULL and kept as they are.
    pub async fn update_post(
        &self,
        post_id: Uuid,
        updating_user_id: Uuid,
        request: PostUpdateRequest,
    ) -> Result<PostUpdateResponse, ServiceError> {
        info!(%post_id, "updating post");

        let call = ProcedureCall::new(Procedure::PostUpdate)
            .bind("p_post_id", post_id)
            .bind("p_updating_user_id", updating_user_id)
            .bind("p_title", request.title)
            .bind("p_content", request.content);

        let rows = self.invoker.invoke(call).await?;
        first_row(Procedure::PostUpdate, &rows)
    }

    pub async fn delete_post(
        &self,
        post_id: Uuid,
        deleting_user_id: Uuid,
    ) -> Result<PostDeleteResponse, ServiceError> {
        info!(%post_id, "deleting post");

        let call = ProcedureCall::new(Procedure::PostDelete)
            .bind("p_post_id", post_id)
            .bind("p_deleting_user_id", deleting_user_id);

        let rows = self.invoker.invoke(call).await?;
        first_row(Procedure::PostDelete, &rows)
    }

    pub async fn get_feed(
        &self,
        community_id: Uuid,
        requesting_user_id: Option<Uuid>,
        page: Pagination,
    ) -> Result<RowPage<PostListItem>, ServiceError> {
        info!(%community_id, "getting post feed");

        let call = ProcedureCall::new(Procedure::PostGetFeed)
            .bind("p_community_id", community_id)
            .bind("p_requesting_user_id", requesting_user_id)
            .bind("p_limit", page.limit)
            .bind("p_offset", page.offset);

        let rows = self.invoker.invoke(call).await?;
        Ok(decode_page(&rows)?)
    }
}
