use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{Pagination, PaginationMeta};
use super::validation::{FieldErrors, Validate};

const MAX_TAGS: usize = 20;

/// Only open communities can be created for now.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommunityType {
    #[default]
    Open,
}

impl CommunityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommunityType::Open => "open",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommunityCreateRequest {
    pub organization_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    #[serde(default)]
    pub community_type: CommunityType,
    pub cover_image_url: Option<String>,
    pub icon_url: Option<String>,
    pub max_members: Option<i32>,
    pub tags: Option<Vec<String>>,
}

impl Validate for CommunityCreateRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.length("name", &self.name, 1, 255);
        errors.length("slug", &self.slug, 1, 100);
        if !self
            .slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            errors.add("slug", "may only contain lowercase letters, digits and hyphens");
        }
        errors.optional_length("description", self.description.as_deref(), 0, 5000);
        errors.http_url("cover_image_url", self.cover_image_url.as_deref());
        errors.http_url("icon_url", self.icon_url.as_deref());
        errors.positive("max_members", self.max_members);
        validate_tags(&mut errors, self.tags.as_deref());
        errors.into_result()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommunityCreateResponse {
    pub community_id: Uuid,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub member_count: i64,
}

/// Every field is optional. `tags: null` leaves tags untouched, `tags: []`
/// clears them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommunityUpdateRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    pub icon_url: Option<String>,
    pub max_members: Option<i32>,
    pub tags: Option<Vec<String>>,
}

impl Validate for CommunityUpdateRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.optional_length("name", self.name.as_deref(), 1, 255);
        errors.optional_length("description", self.description.as_deref(), 0, 5000);
        errors.http_url("cover_image_url", self.cover_image_url.as_deref());
        errors.http_url("icon_url", self.icon_url.as_deref());
        errors.positive("max_members", self.max_members);
        validate_tags(&mut errors, self.tags.as_deref());
        errors.into_result()
    }
}

fn validate_tags(errors: &mut FieldErrors, tags: Option<&[String]>) {
    let Some(tags) = tags else { return };
    if tags.len() > MAX_TAGS {
        errors.add("tags", format!("at most {} tags allowed", MAX_TAGS));
    }
    if tags.iter().any(|t| t.chars().count() > 100) {
        errors.add("tags", "each tag must be at most 100 characters");
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommunityUpdateResponse {
    pub community_id: Uuid,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommunityDetailResponse {
    pub community_id: Uuid,
    pub organization_id: Option<Uuid>,
    pub creator_user_id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub community_type: String,
    pub status: String,
    pub member_count: i64,
    pub max_members: Option<i32>,
    pub is_featured: bool,
    pub cover_image_url: Option<String>,
    pub icon_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_member: bool,
    pub user_role: Option<String>,
    pub user_status: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommunityListItem {
    pub community_id: Uuid,
    pub organization_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub community_type: String,
    pub member_count: i64,
    pub max_members: Option<i32>,
    pub is_featured: bool,
    pub cover_image_url: Option<String>,
    pub icon_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub is_member: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommunitySearchResponse {
    pub communities: Vec<CommunityListItem>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub organization_id: Option<Uuid>,
    /// Comma-separated
    pub tags: Option<String>,
    pub limit: Option<i32>,
    pub offset: Option<i32>,
}

/// Validated search filters
#[derive(Debug, Clone, PartialEq)]
pub struct CommunitySearch {
    pub search_text: Option<String>,
    pub organization_id: Option<Uuid>,
    pub tags: Option<Vec<String>>,
    pub page: Pagination,
}

impl SearchQuery {
    pub fn resolve(self) -> Result<CommunitySearch, FieldErrors> {
        let mut errors = FieldErrors::new();
        let page = Pagination::resolve(self.limit, self.offset, 20, 100, &mut errors);
        errors.into_result()?;

        let tags = self.tags.filter(|t| !t.is_empty()).map(|t| {
            t.split(',')
                .map(|tag| tag.trim().to_string())
                .filter(|tag| !tag.is_empty())
                .collect()
        });

        Ok(CommunitySearch {
            search_text: self.q.filter(|q| !q.is_empty()),
            organization_id: self.organization_id,
            tags,
            page,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MembershipCreateResponse {
    pub community_id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    pub status: String,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MembershipLeaveResponse {
    pub community_id: Uuid,
    pub user_id: Uuid,
    pub left_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemberListItem {
    pub user_id: Uuid,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub main_photo_url: Option<String>,
    pub role: String,
    pub status: String,
    pub joined_at: DateTime<Utc>,
    pub is_verified: bool,
}

/// `limit` 1..=100 (default 50), `offset` >= 0
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MembersQuery {
    pub limit: Option<i32>,
    pub offset: Option<i32>,
}

impl MembersQuery {
    pub fn resolve(&self) -> Result<Pagination, FieldErrors> {
        let mut errors = FieldErrors::new();
        let page = Pagination::resolve(self.limit, self.offset, 50, 100, &mut errors);
        errors.into_result().map(|_| page)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberListResponse {
    pub members: Vec<MemberListItem>,
    pub pagination: PaginationMeta,
}
