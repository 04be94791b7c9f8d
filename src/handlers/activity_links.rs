use axum::extract::State;
use uuid::Uuid;

use crate::app::AppState;
use crate::middleware::{ApiJson, ApiPath, ApiResponse, ApiResult, CurrentUser};
use crate::models::reaction::{CommunityActivityLinkRequest, CommunityActivityLinkResponse};

/// POST /communities/:community_id/activities
pub async fn link_activity(
    State(state): State<AppState>,
    ApiPath(community_id): ApiPath<Uuid>,
    CurrentUser(user): CurrentUser,
    ApiJson(body): ApiJson<CommunityActivityLinkRequest>,
) -> ApiResult<CommunityActivityLinkResponse> {
    let link = state
        .services
        .reactions
        .link_activity(community_id, user.user_id, body)
        .await?;
    Ok(ApiResponse::created(link))
}
