use axum::extract::State;
use uuid::Uuid;

use crate::app::AppState;
use crate::auth::Caller;
use crate::middleware::{ApiJson, ApiPath, ApiQuery, ApiResponse, ApiResult, CurrentUser};
use crate::models::post::{
    FeedQuery, PostCreateRequest, PostCreateResponse, PostDeleteResponse, PostFeedResponse,
    PostUpdateRequest, PostUpdateResponse,
};

/// POST /communities/:community_id/posts
pub async fn create_post(
    State(state): State<AppState>,
    ApiPath(community_id): ApiPath<Uuid>,
    CurrentUser(user): CurrentUser,
    ApiJson(body): ApiJson<PostCreateRequest>,
) -> ApiResult<PostCreateResponse> {
    let created = state
        .services
        .posts
        .create_post(community_id, user.user_id, body)
        .await?;
    Ok(ApiResponse::created(created))
}

/// PATCH /communities/:community_id/posts/:post_id
pub async fn update_post(
    State(state): State<AppState>,
    ApiPath((_community_id, post_id)): ApiPath<(Uuid, Uuid)>,
    CurrentUser(user): CurrentUser,
    ApiJson(body): ApiJson<PostUpdateRequest>,
) -> ApiResult<PostUpdateResponse> {
    let updated = state
        .services
        .posts
        .update_post(post_id, user.user_id, body)
        .await?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /communities/:community_id/posts/:post_id
pub async fn delete_post(
    State(state): State<AppState>,
    ApiPath((_community_id, post_id)): ApiPath<(Uuid, Uuid)>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<PostDeleteResponse> {
    let deleted = state
        .services
        .posts
        .delete_post(post_id, user.user_id)
        .await?;
    Ok(ApiResponse::success(deleted))
}

/// GET /communities/:community_id/posts
pub async fn get_feed(
    State(state): State<AppState>,
    ApiPath(community_id): ApiPath<Uuid>,
    caller: Caller,
    ApiQuery(query): ApiQuery<FeedQuery>,
) -> ApiResult<PostFeedResponse> {
    let page = query.resolve()?;
    let result = state
        .services
        .posts
        .get_feed(community_id, caller.user_id(), page)
        .await?;

    Ok(ApiResponse::success(PostFeedResponse {
        posts: result.items,
        pagination: page.meta(result.total_count),
    }))
}
