use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{Pagination, PaginationMeta};
use super::validation::{FieldErrors, Validate};

#[derive(Debug, Clone, Deserialize)]
pub struct CommentCreateRequest {
    pub parent_comment_id: Option<Uuid>,
    pub content: String,
}

impl Validate for CommentCreateRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.length("content", &self.content, 1, 2000);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommentCreateResponse {
    pub comment_id: Uuid,
    pub post_id: Uuid,
    pub parent_comment_id: Option<Uuid>,
    pub author_user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentUpdateRequest {
    pub content: String,
}

impl Validate for CommentUpdateRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.length("content", &self.content, 1, 2000);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommentUpdateResponse {
    pub comment_id: Uuid,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommentDeleteResponse {
    pub comment_id: Uuid,
    pub deleted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommentListItem {
    pub comment_id: Uuid,
    pub parent_comment_id: Option<Uuid>,
    pub author_user_id: Uuid,
    pub author_username: String,
    pub author_first_name: Option<String>,
    pub author_main_photo_url: Option<String>,
    pub content: String,
    pub reaction_count: i64,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentListResponse {
    pub comments: Vec<CommentListItem>,
    pub pagination: PaginationMeta,
}

/// Threaded listing: `parent_comment_id` selects one level of replies.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentsQuery {
    pub parent_comment_id: Option<Uuid>,
    pub limit: Option<i32>,
    pub offset: Option<i32>,
}

impl CommentsQuery {
    pub fn resolve(&self) -> Result<Pagination, FieldErrors> {
        let mut errors = FieldErrors::new();
        let page = Pagination::resolve(self.limit, self.offset, 50, 200, &mut errors);
        errors.into_result().map(|_| page)
    }
}
