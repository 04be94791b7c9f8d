use axum::extract::State;
use uuid::Uuid;

use crate::app::AppState;
use crate::auth::Caller;
use crate::middleware::{ApiJson, ApiPath, ApiQuery, ApiResponse, ApiResult, CurrentUser};
use crate::models::community::{
    CommunityCreateRequest, CommunityCreateResponse, CommunityDetailResponse,
    CommunitySearchResponse, CommunityUpdateRequest, CommunityUpdateResponse, MemberListResponse,
    MembersQuery, MembershipCreateResponse, MembershipLeaveResponse, SearchQuery,
};

/// POST /communities
pub async fn create_community(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiJson(body): ApiJson<CommunityCreateRequest>,
) -> ApiResult<CommunityCreateResponse> {
    let created = state
        .services
        .communities
        .create_community(user.user_id, body)
        .await?;
    Ok(ApiResponse::created(created))
}

/// GET /communities/search
pub async fn search_communities(
    State(state): State<AppState>,
    caller: Caller,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> ApiResult<CommunitySearchResponse> {
    let search = query.resolve()?;
    let page = search.page;
    let result = state
        .services
        .communities
        .search_communities(search, caller.user_id())
        .await?;

    Ok(ApiResponse::success(CommunitySearchResponse {
        communities: result.items,
        pagination: page.meta(result.total_count),
    }))
}

/// GET /communities/:community_id
pub async fn get_community(
    State(state): State<AppState>,
    ApiPath(community_id): ApiPath<Uuid>,
    caller: Caller,
) -> ApiResult<CommunityDetailResponse> {
    let community = state
        .services
        .communities
        .get_community(community_id, caller.user_id())
        .await?;
    Ok(ApiResponse::success(community))
}

/// PATCH /communities/:community_id
pub async fn update_community(
    State(state): State<AppState>,
    ApiPath(community_id): ApiPath<Uuid>,
    CurrentUser(user): CurrentUser,
    ApiJson(body): ApiJson<CommunityUpdateRequest>,
) -> ApiResult<CommunityUpdateResponse> {
    let updated = state
        .services
        .communities
        .update_community(community_id, user.user_id, body)
        .await?;
    Ok(ApiResponse::success(updated))
}

/// POST /communities/:community_id/join
pub async fn join_community(
    State(state): State<AppState>,
    ApiPath(community_id): ApiPath<Uuid>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<MembershipCreateResponse> {
    let membership = state
        .services
        .communities
        .join_community(community_id, user.user_id)
        .await?;
    Ok(ApiResponse::created(membership))
}

/// POST /communities/:community_id/leave
pub async fn leave_community(
    State(state): State<AppState>,
    ApiPath(community_id): ApiPath<Uuid>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<MembershipLeaveResponse> {
    let left = state
        .services
        .communities
        .leave_community(community_id, user.user_id)
        .await?;
    Ok(ApiResponse::success(left))
}

/// GET /communities/:community_id/members
pub async fn get_members(
    State(state): State<AppState>,
    ApiPath(community_id): ApiPath<Uuid>,
    CurrentUser(user): CurrentUser,
    ApiQuery(query): ApiQuery<MembersQuery>,
) -> ApiResult<MemberListResponse> {
    let page = query.resolve()?;
    let result = state
        .services
        .communities
        .get_members(community_id, user.user_id, page)
        .await?;

    Ok(ApiResponse::success(MemberListResponse {
        members: result.items,
        pagination: page.meta(result.total_count),
    }))
}

