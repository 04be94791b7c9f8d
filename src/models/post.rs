use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{Pagination, PaginationMeta};
use super::validation::{FieldErrors, Validate};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    #[default]
    Post,
    Photo,
    Video,
    Poll,
    EventAnnouncement,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Post => "post",
            ContentType::Photo => "photo",
            ContentType::Video => "video",
            ContentType::Poll => "poll",
            ContentType::EventAnnouncement => "event_announcement",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostCreateRequest {
    pub activity_id: Option<Uuid>,
    pub title: Option<String>,
    pub content: String,
    #[serde(default)]
    pub content_type: ContentType,
}

impl Validate for PostCreateRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.optional_length("title", self.title.as_deref(), 0, 500);
        errors.length("content", &self.content, 1, 10_000);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostCreateResponse {
    pub post_id: Uuid,
    pub community_id: Uuid,
    pub author_user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostUpdateRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl Validate for PostUpdateRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.optional_length("title", self.title.as_deref(), 0, 500);
        errors.optional_length("content", self.content.as_deref(), 1, 10_000);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostUpdateResponse {
    pub post_id: Uuid,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostDeleteResponse {
    pub post_id: Uuid,
    pub deleted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostListItem {
    pub post_id: Uuid,
    pub author_user_id: Uuid,
    pub author_username: String,
    pub author_first_name: Option<String>,
    pub author_main_photo_url: Option<String>,
    pub activity_id: Option<Uuid>,
    pub title: Option<String>,
    pub content: String,
    pub content_type: String,
    pub view_count: i64,
    pub comment_count: i64,
    pub reaction_count: i64,
    pub is_pinned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostFeedResponse {
    pub posts: Vec<PostListItem>,
    pub pagination: PaginationMeta,
}

/// `limit` 1..=100 (default 20), `offset` >= 0
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedQuery {
    pub limit: Option<i32>,
    pub offset: Option<i32>,
}

impl FeedQuery {
    pub fn resolve(&self) -> Result<Pagination, FieldErrors> {
        let mut errors = FieldErrors::new();
        let page = Pagination::resolve(self.limit, self.offset, 20, 100, &mut errors);
        errors.into_result().map(|_| page)
    }
}
