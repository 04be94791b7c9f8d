use axum::extract::State;
use uuid::Uuid;

use crate::app::AppState;
use crate::middleware::{ApiJson, ApiPath, ApiQuery, ApiResponse, ApiResult, CurrentUser};
use crate::models::comment::{
    CommentCreateRequest, CommentCreateResponse, CommentDeleteResponse, CommentListResponse,
    CommentUpdateRequest, CommentUpdateResponse, CommentsQuery,
};

/// POST /communities/:community_id/posts/:post_id/comments
pub async fn create_comment(
    State(state): State<AppState>,
    ApiPath((_community_id, post_id)): ApiPath<(Uuid, Uuid)>,
    CurrentUser(user): CurrentUser,
    ApiJson(body): ApiJson<CommentCreateRequest>,
) -> ApiResult<CommentCreateResponse> {
    let created = state
        .services
        .comments
        .create_comment(post_id, user.user_id, body)
        .await?;
    Ok(ApiResponse::created(created))
}

/// PATCH /communities/:community_id/posts/:post_id/comments/:comment_id
pub async fn update_comment(
    State(state): State<AppState>,
    ApiPath((_community_id, _post_id, comment_id)): ApiPath<(Uuid, Uuid, Uuid)>,
    CurrentUser(user): CurrentUser,
    ApiJson(body): ApiJson<CommentUpdateRequest>,
) -> ApiResult<CommentUpdateResponse> {
    let updated = state
        .services
        .comments
        .update_comment(comment_id, user.user_id, body)
        .await?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /communities/:community_id/posts/:post_id/comments/:comment_id
pub async fn delete_comment(
    State(state): State<AppState>,
    ApiPath((_community_id, _post_id, comment_id)): ApiPath<(Uuid, Uuid, Uuid)>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<CommentDeleteResponse> {
    let deleted = state
        .services
        .comments
        .delete_comment(comment_id, user.user_id)
        .await?;
    Ok(ApiResponse::success(deleted))
}

/// GET /communities/:community_id/posts/:post_id/comments
///
/// Public; no token is read.
pub async fn get_comments(
    State(state): State<AppState>,
    ApiPath((_community_id, post_id)): ApiPath<(Uuid, Uuid)>,
    ApiQuery(query): ApiQuery<CommentsQuery>,
) -> ApiResult<CommentListResponse> {
    let page = query.resolve()?;
    let result = state
        .services
        .comments
        .get_comments(post_id, query.parent_comment_id, page)
        .await?;

    Ok(ApiResponse::success(CommentListResponse {
        comments: result.items,
        pagination: page.meta(result.total_count),
    }))
}
