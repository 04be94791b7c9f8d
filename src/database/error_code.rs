//! Closed catalog of error codes surfaced by the stored procedures, plus the
//! handful of codes the API produces on its own.
//!
//! Procedures report business-rule violations with `RAISE EXCEPTION` and
//! embed one of the tags below verbatim in the message text. Classification
//! is a substring scan over that text.
//!
//! The scan can misfire when unrelated text that happens to contain a tag is
//! echoed into an error message (for example a user-supplied name). A
//! dedicated error-code channel from the data layer (SQLSTATE or `DETAIL`)
//! would remove that ambiguity; until procedures provide one the substring
//! contract is kept as-is.

use std::fmt;
use std::str::FromStr;

use axum::http::StatusCode;

/// Message used for any code the taxonomy does not know about.
pub const GENERIC_MESSAGE: &str = "An unexpected error occurred";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Not found
    UserNotFound,
    CommunityNotFound,
    PostNotFound,
    CommentNotFound,
    ActivityNotFound,
    OrganizationNotFound,
    TargetNotFound,

    // Permission
    InsufficientPermissions,
    NotMember,
    NotCommunityOrganizer,
    NotActivityOrganizer,
    OrganizerCannotLeave,
    CommunityNotOpen,
    NotOrganizationMember,

    // Conflict / state
    SlugExists,
    AlreadyMember,
    CommunityFull,
    LinkAlreadyExists,
    CommunityNotActive,
    PostNotPublished,
    CommentDeleted,
    ParentCommentNotFound,
    InvalidCommunityType,
    InvalidTargetType,

    // Produced by the API itself
    UnknownError,
    DatabaseError,
    InternalError,
    ValidationError,
    InvalidJson,
    Unauthorized,
    NotFound,
    MethodNotAllowed,
}

impl ErrorCode {
    /// Tags a stored procedure may raise, in scan order.
    ///
    /// A tag that contains another tag must come first, otherwise the shorter
    /// tag would shadow it (`PARENT_COMMENT_NOT_FOUND` vs `COMMENT_NOT_FOUND`).
    pub const DOMAIN: [ErrorCode; 24] = [
        ErrorCode::UserNotFound,
        ErrorCode::CommunityNotFound,
        ErrorCode::PostNotFound,
        ErrorCode::ParentCommentNotFound,
        ErrorCode::CommentNotFound,
        ErrorCode::ActivityNotFound,
        ErrorCode::OrganizationNotFound,
        ErrorCode::InsufficientPermissions,
        ErrorCode::NotMember,
        ErrorCode::NotCommunityOrganizer,
        ErrorCode::NotActivityOrganizer,
        ErrorCode::OrganizerCannotLeave,
        ErrorCode::CommunityNotOpen,
        ErrorCode::SlugExists,
        ErrorCode::AlreadyMember,
        ErrorCode::CommunityFull,
        ErrorCode::LinkAlreadyExists,
        ErrorCode::CommunityNotActive,
        ErrorCode::PostNotPublished,
        ErrorCode::CommentDeleted,
        ErrorCode::InvalidCommunityType,
        ErrorCode::InvalidTargetType,
        ErrorCode::TargetNotFound,
        ErrorCode::NotOrganizationMember,
    ];

    /// Classify a raw data-layer error message.
    ///
    /// Returns the first domain tag found in `raw`, or `UnknownError`.
    pub fn classify(raw: &str) -> ErrorCode {
        Self::DOMAIN
            .iter()
            .copied()
            .find(|code| raw.contains(code.as_str()))
            .unwrap_or(ErrorCode::UnknownError)
    }

    /// Status and message for an arbitrary tag string. Unknown tags get the
    /// generic 500 pair.
    pub fn lookup(tag: &str) -> (StatusCode, &'static str) {
        match tag.parse::<ErrorCode>() {
            Ok(code) => (code.status_code(), code.message()),
            Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_MESSAGE),
        }
    }

    pub fn is_domain(&self) -> bool {
        Self::DOMAIN.contains(self)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::CommunityNotFound => "COMMUNITY_NOT_FOUND",
            ErrorCode::PostNotFound => "POST_NOT_FOUND",
            ErrorCode::CommentNotFound => "COMMENT_NOT_FOUND",
            ErrorCode::ActivityNotFound => "ACTIVITY_NOT_FOUND",
            ErrorCode::OrganizationNotFound => "ORGANIZATION_NOT_FOUND",
            ErrorCode::TargetNotFound => "TARGET_NOT_FOUND",
            ErrorCode::InsufficientPermissions => "INSUFFICIENT_PERMISSIONS",
            ErrorCode::NotMember => "NOT_MEMBER",
            ErrorCode::NotCommunityOrganizer => "NOT_COMMUNITY_ORGANIZER",
            ErrorCode::NotActivityOrganizer => "NOT_ACTIVITY_ORGANIZER",
            ErrorCode::OrganizerCannotLeave => "ORGANIZER_CANNOT_LEAVE",
            ErrorCode::CommunityNotOpen => "COMMUNITY_NOT_OPEN",
            ErrorCode::NotOrganizationMember => "NOT_ORGANIZATION_MEMBER",
            ErrorCode::SlugExists => "SLUG_EXISTS",
            ErrorCode::AlreadyMember => "ALREADY_MEMBER",
            ErrorCode::CommunityFull => "COMMUNITY_FULL",
            ErrorCode::LinkAlreadyExists => "LINK_ALREADY_EXISTS",
            ErrorCode::CommunityNotActive => "COMMUNITY_NOT_ACTIVE",
            ErrorCode::PostNotPublished => "POST_NOT_PUBLISHED",
            ErrorCode::CommentDeleted => "COMMENT_DELETED",
            ErrorCode::ParentCommentNotFound => "PARENT_COMMENT_NOT_FOUND",
            ErrorCode::InvalidCommunityType => "INVALID_COMMUNITY_TYPE",
            ErrorCode::InvalidTargetType => "INVALID_TARGET_TYPE",
            ErrorCode::UnknownError => "UNKNOWN_ERROR",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InvalidJson => "INVALID_JSON",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::MethodNotAllowed => "METHOD_NOT_ALLOWED",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::UserNotFound
            | ErrorCode::CommunityNotFound
            | ErrorCode::PostNotFound
            | ErrorCode::CommentNotFound
            | ErrorCode::ActivityNotFound
            | ErrorCode::OrganizationNotFound
            | ErrorCode::TargetNotFound
            | ErrorCode::NotFound => StatusCode::NOT_FOUND,

            ErrorCode::InsufficientPermissions
            | ErrorCode::NotMember
            | ErrorCode::NotCommunityOrganizer
            | ErrorCode::NotActivityOrganizer
            | ErrorCode::OrganizerCannotLeave
            | ErrorCode::CommunityNotOpen
            | ErrorCode::NotOrganizationMember => StatusCode::FORBIDDEN,

            ErrorCode::SlugExists | ErrorCode::CommunityFull | ErrorCode::LinkAlreadyExists => {
                StatusCode::CONFLICT
            }

            ErrorCode::AlreadyMember
            | ErrorCode::CommunityNotActive
            | ErrorCode::PostNotPublished
            | ErrorCode::CommentDeleted
            | ErrorCode::ParentCommentNotFound
            | ErrorCode::InvalidCommunityType
            | ErrorCode::InvalidTargetType
            | ErrorCode::InvalidJson => StatusCode::BAD_REQUEST,

            ErrorCode::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,

            ErrorCode::UnknownError | ErrorCode::DatabaseError | ErrorCode::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Client-facing message
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::CommunityNotFound => "Community not found",
            ErrorCode::PostNotFound => "Post not found",
            ErrorCode::CommentNotFound => "Comment not found",
            ErrorCode::ActivityNotFound => "Activity not found",
            ErrorCode::OrganizationNotFound => "Organization not found",
            ErrorCode::TargetNotFound => "Target not found",
            ErrorCode::InsufficientPermissions => "Insufficient permissions",
            ErrorCode::NotMember => "Not a community member",
            ErrorCode::NotCommunityOrganizer => "Not a community organizer",
            ErrorCode::NotActivityOrganizer => "Not an activity organizer",
            ErrorCode::OrganizerCannotLeave => "Organizer cannot leave community",
            ErrorCode::CommunityNotOpen => "Community is not open",
            ErrorCode::NotOrganizationMember => "Not an organization member",
            ErrorCode::SlugExists => "Community slug already exists",
            ErrorCode::AlreadyMember => "Already a member",
            ErrorCode::CommunityFull => "Community is full",
            ErrorCode::LinkAlreadyExists => "Activity already linked to community",
            ErrorCode::CommunityNotActive => "Community is not active",
            ErrorCode::PostNotPublished => "Post is not published",
            ErrorCode::CommentDeleted => "Comment has been deleted",
            ErrorCode::ParentCommentNotFound => "Parent comment not found",
            ErrorCode::InvalidCommunityType => "Invalid community type",
            ErrorCode::InvalidTargetType => "Invalid target type",
            ErrorCode::ValidationError => "Request validation failed",
            ErrorCode::InvalidJson => "Malformed JSON body",
            ErrorCode::Unauthorized => "Could not validate credentials",
            ErrorCode::NotFound => "Not found",
            ErrorCode::MethodNotAllowed => "Method not allowed",
            ErrorCode::UnknownError | ErrorCode::DatabaseError | ErrorCode::InternalError => {
                GENERIC_MESSAGE
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown error code: {0}")]
pub struct UnknownErrorCode(pub String);

const ALL: [ErrorCode; 32] = [
    ErrorCode::UserNotFound,
    ErrorCode::CommunityNotFound,
    ErrorCode::PostNotFound,
    ErrorCode::CommentNotFound,
    ErrorCode::ActivityNotFound,
    ErrorCode::OrganizationNotFound,
    ErrorCode::TargetNotFound,
    ErrorCode::InsufficientPermissions,
    ErrorCode::NotMember,
    ErrorCode::NotCommunityOrganizer,
    ErrorCode::NotActivityOrganizer,
    ErrorCode::OrganizerCannotLeave,
    ErrorCode::CommunityNotOpen,
    ErrorCode::NotOrganizationMember,
    ErrorCode::SlugExists,
    ErrorCode::AlreadyMember,
    ErrorCode::CommunityFull,
    ErrorCode::LinkAlreadyExists,
    ErrorCode::CommunityNotActive,
    ErrorCode::PostNotPublished,
    ErrorCode::CommentDeleted,
    ErrorCode::ParentCommentNotFound,
    ErrorCode::InvalidCommunityType,
    ErrorCode::InvalidTargetType,
    ErrorCode::UnknownError,
    ErrorCode::DatabaseError,
    ErrorCode::InternalError,
    ErrorCode::ValidationError,
    ErrorCode::InvalidJson,
    ErrorCode::Unauthorized,
    ErrorCode::NotFound,
    ErrorCode::MethodNotAllowed,
];

impl FromStr for ErrorCode {
    type Err = UnknownErrorCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL.iter()
            .copied()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| UnknownErrorCode(s.to_string()))
    }
}
