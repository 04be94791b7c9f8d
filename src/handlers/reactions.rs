use axum::extract::State;
use uuid::Uuid;

use crate::app::AppState;
use crate::middleware::{ApiJson, ApiPath, ApiResponse, ApiResult, CurrentUser};
use crate::models::reaction::{
    ReactionCreateRequest, ReactionCreateResponse, ReactionDeleteResponse, TargetType,
};

/// POST /communities/:community_id/posts/:post_id/reactions
pub async fn react_to_post(
    State(state): State<AppState>,
    ApiPath((_community_id, post_id)): ApiPath<(Uuid, Uuid)>,
    CurrentUser(user): CurrentUser,
    ApiJson(body): ApiJson<ReactionCreateRequest>,
) -> ApiResult<ReactionCreateResponse> {
    create(&state, user.user_id, TargetType::Post, post_id, body).await
}

/// DELETE /communities/:community_id/posts/:post_id/reactions
pub async fn unreact_to_post(
    State(state): State<AppState>,
    ApiPath((_community_id, post_id)): ApiPath<(Uuid, Uuid)>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<ReactionDeleteResponse> {
    delete(&state, user.user_id, TargetType::Post, post_id).await
}

/// POST /communities/:community_id/posts/:post_id/comments/:comment_id/reactions
pub async fn react_to_comment(
    State(state): State<AppState>,
    ApiPath((_community_id, _post_id, comment_id)): ApiPath<(Uuid, Uuid, Uuid)>,
    CurrentUser(user): CurrentUser,
    ApiJson(body): ApiJson<ReactionCreateRequest>,
) -> ApiResult<ReactionCreateResponse> {
    create(&state, user.user_id, TargetType::Comment, comment_id, body).await
}

/// DELETE /communities/:community_id/posts/:post_id/comments/:comment_id/reactions
pub async fn unreact_to_comment(
    State(state): State<AppState>,
    ApiPath((_community_id, _post_id, comment_id)): ApiPath<(Uuid, Uuid, Uuid)>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<ReactionDeleteResponse> {
    delete(&state, user.user_id, TargetType::Comment, comment_id).await
}

async fn create(
    state: &AppState,
    user_id: Uuid,
    target_type: TargetType,
    target_id: Uuid,
    body: ReactionCreateRequest,
) -> ApiResult<ReactionCreateResponse> {
    let reaction = state
        .services
        .reactions
        .create_reaction(user_id, target_type, target_id, body.reaction_type)
        .await?;
    Ok(ApiResponse::created(reaction))
}

async fn delete(
    state: &AppState,
    user_id: Uuid,
    target_type: TargetType,
    target_id: Uuid,
) -> ApiResult<ReactionDeleteResponse> {
    let deleted = state
        .services
        .reactions
        .delete_reaction(user_id, target_type, target_id)
        .await?;
    Ok(ApiResponse::success(deleted))
}
