use tracing::info;
use uuid::Uuid;

use super::{first_row, ServiceError};
use crate::database::{decode_page, ErrorCode, Procedure, ProcedureCall, ProcedureInvoker, RowPage};
use crate::models::community::{
    CommunityCreateRequest, CommunityCreateResponse, CommunityDetailResponse, CommunityListItem,
    CommunitySearch, CommunityUpdateRequest, CommunityUpdateResponse, MemberListItem,
    MembershipCreateResponse, MembershipLeaveResponse,
};
use crate::models::Pagination;

#[derive(Clone)]
pub struct CommunityService {
    invoker: ProcedureInvoker,
}

impl CommunityService {
    pub fn new(invoker: ProcedureInvoker) -> Self {
        Self { invoker }
    }

    pub async fn create_community(
        &self,
        creator_user_id: Uuid,
        request: CommunityCreateRequest,
    ) -> Result<CommunityCreateResponse, ServiceError> {
        info!(slug = %request.slug, "creating community");

        let call = ProcedureCall::new(Procedure::CommunityCreate)
            .bind("p_creator_user_id", creator_user_id)
            .bind("p_organization_id", request.organization_id)
            .bind("p_name", request.name)
            .bind("p_slug", request.slug)
            .bind("p_description", request.description)
            .bind("p_community_type", request.community_type.as_str())
            .bind("p_cover_image_url", request.cover_image_url)
            .bind("p_icon_url", request.icon_url)
            .bind("p_max_members", request.max_members)
            .bind("p_tags", request.tags);

        let rows = self.invoker.invoke(call).await?;
        first_row(Procedure::CommunityCreate, &rows)
    }

    /// Zero rows means the community does not exist (or is hidden from
    /// this caller).
    pub async fn get_community(
        &self,
        community_id: Uuid,
        requesting_user_id: Option<Uuid>,
    ) -> Result<CommunityDetailResponse, ServiceError> {
        info!(%community_id, "getting community");

        let call = ProcedureCall::new(Procedure::CommunityGetById)
            .bind("p_community_id", community_id)
            .bind("p_requesting_user_id", requesting_user_id);

        let rows = self.invoker.invoke(call).await?;
        match rows.first() {
            Some(row) => Ok(row.decode()?),
            None => Err(ServiceError::NotFound(ErrorCode::CommunityNotFound)),
        }
    }

    pub async fn update_community(
        &self,
        community_id: Uuid,
        updating_user_id: Uuid,
        request: CommunityUpdateRequest,
    ) -> Result<CommunityUpdateResponse, ServiceError> {
        info!(%community_id, "updating community");

        let call = ProcedureCall::new(Procedure::CommunityUpdate)
            .bind("p_community_id", community_id)
            .bind("p_updating_user_id", updating_user_id)
            .bind("p_name", request.name)
            .bind("p_description", request.description)
            .bind("p_cover_image_url", request.cover_image_url)
            .bind("p_icon_url", request.icon_url)
            .bind("p_max_members", request.max_members)
            .bind("p_tags", request.tags);

        let rows = self.invoker.invoke(call).await?;
        first_row(Procedure::CommunityUpdate, &rows)
    }

    pub async fn join_community(
        &self,
        community_id: Uuid,
        user_id: Uuid,
    ) -> Result<MembershipCreateResponse, ServiceError> {
        info!(%community_id, %user_id, "joining community");

        let call = ProcedureCall::new(Procedure::CommunityJoin)
            .bind("p_community_id", community_id)
            .bind("p_user_id", user_id);

        let rows = self.invoker.invoke(call).await?;
        first_row(Procedure::CommunityJoin, &rows)
    }

    pub async fn leave_community(
        &self,
        community_id: Uuid,
        user_id: Uuid,
    ) -> Result<MembershipLeaveResponse, ServiceError> {
        info!(%community_id, %user_id, "leaving community");

        let call = ProcedureCall::new(Procedure::CommunityLeave)
            .bind("p_community_id", community_id)
            .bind("p_user_id", user_id);

        let rows = self.invoker.invoke(call).await?;
        first_row(Procedure::CommunityLeave, &rows)
    }

    pub async fn get_members(
        &self,
        community_id: Uuid,
        requesting_user_id: Uuid,
        page: Pagination,
    ) -> Result<RowPage<MemberListItem>, ServiceError> {
        info!(%community_id, "getting members");

        let call = ProcedureCall::new(Procedure::CommunityGetMembers)
            .bind("p_community_id", community_id)
            .bind("p_requesting_user_id", requesting_user_id)
            .bind("p_limit", page.limit)
            .bind("p_offset", page.offset);

        let rows = self.invoker.invoke(call).await?;
        Ok(decode_page(&rows)?)
    }

    pub async fn search_communities(
        &self,
        search: CommunitySearch,
        requesting_user_id: Option<Uuid>,
    ) -> Result<RowPage<CommunityListItem>, ServiceError> {
        info!(search_text = ?search.search_text, "searching communities");

        let call = ProcedureCall::new(Procedure::CommunitySearch)
            .bind("p_search_text", search.search_text)
            .bind("p_organization_id", search.organization_id)
            .bind("p_tags", search.tags)
            .bind("p_requesting_user_id", requesting_user_id)
            .bind("p_limit", search.page.limit)
            .bind("p_offset", search.page.offset);

        let rows = self.invoker.invoke(call).await?;
        Ok(decode_page(&rows)?)
    }
}
