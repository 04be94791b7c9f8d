use tracing::info;
use uuid::Uuid;

use super::{first_row, ServiceError};
use crate::database::{Procedure, ProcedureCall, ProcedureInvoker};
use crate::models::reaction::{
    CommunityActivityLinkRequest, CommunityActivityLinkResponse, ReactionCreateResponse,
    ReactionDeleteResponse, ReactionType, TargetType,
};

/// Reactions on posts and comments, plus linking activities to communities.
#[derive(Clone)]
pub struct ReactionService {
    invoker: ProcedureInvoker,
}

impl ReactionService {
    pub fn new(invoker: ProcedureInvoker) -> Self {
        Self { invoker }
    }

    /// Creates the reaction, or replaces the caller's existing one on the
    /// same target.
    pub async fn create_reaction(
        &self,
        user_id: Uuid,
        target_type: TargetType,
        target_id: Uuid,
        reaction_type: ReactionType,
    ) -> Result<ReactionCreateResponse, ServiceError> {
        info!(target_type = target_type.as_str(), %target_id, "creating reaction");

        let call = ProcedureCall::new(Procedure::ReactionCreate)
            .bind("p_user_id", user_id)
            .bind("p_target_type", target_type.as_str())
            .bind("p_target_id", target_id)
            .bind("p_reaction_type", reaction_type.as_str());

        let rows = self.invoker.invoke(call).await?;
        first_row(Procedure::ReactionCreate, &rows)
    }

    pub async fn delete_reaction(
        &self,
        user_id: Uuid,
        target_type: TargetType,
        target_id: Uuid,
    ) -> Result<ReactionDeleteResponse, ServiceError> {
        info!(target_type = target_type.as_str(), %target_id, "deleting reaction");

        let call = ProcedureCall::new(Procedure::ReactionDelete)
            .bind("p_user_id", user_id)
            .bind("p_target_type", target_type.as_str())
            .bind("p_target_id", target_id);

        let rows = self.invoker.invoke(call).await?;
        first_row(Procedure::ReactionDelete, &rows)
    }

    pub async fn link_activity(
        &self,
        community_id: Uuid,
        linking_user_id: Uuid,
        request: CommunityActivityLinkRequest,
    ) -> Result<CommunityActivityLinkResponse, ServiceError> {
        info!(%community_id, activity_id = %request.activity_id, "linking activity");

        let call = ProcedureCall::new(Procedure::LinkActivity)
            .bind("p_community_id", community_id)
            .bind("p_activity_id", request.activity_id)
            .bind("p_linking_user_id", linking_user_id);

        let rows = self.invoker.invoke(call).await?;
        first_row(Procedure::LinkActivity, &rows)
    }
}
