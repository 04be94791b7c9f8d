use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionType {
    Like,
    Love,
    Celebrate,
    Support,
    Insightful,
}

impl ReactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionType::Like => "like",
            ReactionType::Love => "love",
            ReactionType::Celebrate => "celebrate",
            ReactionType::Support => "support",
            ReactionType::Insightful => "insightful",
        }
    }
}

/// What a reaction is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Post,
    Comment,
}

impl TargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetType::Post => "post",
            TargetType::Comment => "comment",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReactionCreateRequest {
    pub reaction_type: ReactionType,
}

impl Validate for ReactionCreateRequest {}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReactionCreateResponse {
    pub reaction_id: Uuid,
    pub target_type: String,
    pub target_id: Uuid,
    pub reaction_type: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReactionDeleteResponse {
    pub deleted: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommunityActivityLinkRequest {
    pub activity_id: Uuid,
}

impl Validate for CommunityActivityLinkRequest {}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommunityActivityLinkResponse {
    pub community_id: Uuid,
    pub activity_id: Uuid,
    pub created_at: DateTime<Utc>,
}
