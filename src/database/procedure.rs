//! Procedure catalog and call construction.
//!
//! A [`ProcedureCall`] is a procedure plus an ordered list of named
//! bindings. Names exist for logging and for test doubles; the data layer
//! only ever sees positions.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Stored procedures the API is allowed to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Procedure {
    CommunityCreate,
    CommunityGetById,
    CommunityUpdate,
    CommunityJoin,
    CommunityLeave,
    CommunityGetMembers,
    CommunitySearch,
    PostCreate,
    PostUpdate,
    PostDelete,
    PostGetFeed,
    CommentCreate,
    CommentUpdate,
    CommentDelete,
    PostGetComments,
    ReactionCreate,
    ReactionDelete,
    LinkActivity,
}

impl Procedure {
    /// Unqualified procedure name; the schema comes from configuration.
    pub fn name(&self) -> &'static str {
        match self {
            Procedure::CommunityCreate => "sp_community_create",
            Procedure::CommunityGetById => "sp_community_get_by_id",
            Procedure::CommunityUpdate => "sp_community_update",
            Procedure::CommunityJoin => "sp_community_join",
            Procedure::CommunityLeave => "sp_community_leave",
            Procedure::CommunityGetMembers => "sp_community_get_members",
            Procedure::CommunitySearch => "sp_community_search",
            Procedure::PostCreate => "sp_community_post_create",
            Procedure::PostUpdate => "sp_community_post_update",
            Procedure::PostDelete => "sp_community_post_delete",
            Procedure::PostGetFeed => "sp_community_post_get_feed",
            Procedure::CommentCreate => "sp_community_comment_create",
            Procedure::CommentUpdate => "sp_community_comment_update",
            Procedure::CommentDelete => "sp_community_comment_delete",
            Procedure::PostGetComments => "sp_community_post_get_comments",
            Procedure::ReactionCreate => "sp_community_reaction_create",
            Procedure::ReactionDelete => "sp_community_reaction_delete",
            Procedure::LinkActivity => "sp_community_link_activity",
        }
    }
}

impl fmt::Display for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Values a procedure parameter can carry. `None` binds a typed SQL NULL so
/// Postgres can still resolve the function signature.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(Option<String>),
    Bool(Option<bool>),
    Int(Option<i32>),
    BigInt(Option<i64>),
    Uuid(Option<Uuid>),
    Timestamp(Option<DateTime<Utc>>),
    TextArray(Option<Vec<String>>),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        match self {
            SqlValue::Text(v) => v.is_none(),
            SqlValue::Bool(v) => v.is_none(),
            SqlValue::Int(v) => v.is_none(),
            SqlValue::BigInt(v) => v.is_none(),
            SqlValue::Uuid(v) => v.is_none(),
            SqlValue::Timestamp(v) => v.is_none(),
            SqlValue::TextArray(v) => v.is_none(),
        }
    }

    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            SqlValue::Uuid(v) => *v,
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SqlValue::Text(v) => v.as_deref(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SqlValue::Int(v) => v.map(i64::from),
            SqlValue::BigInt(v) => *v,
            _ => None,
        }
    }

    /// Short rendering for logs; long values are cut at 50 characters.
    pub fn preview(&self) -> String {
        let full = match self {
            SqlValue::Text(Some(s)) => s.clone(),
            SqlValue::Bool(Some(b)) => b.to_string(),
            SqlValue::Int(Some(i)) => i.to_string(),
            SqlValue::BigInt(Some(i)) => i.to_string(),
            SqlValue::Uuid(Some(u)) => u.to_string(),
            SqlValue::Timestamp(Some(t)) => t.to_rfc3339(),
            SqlValue::TextArray(Some(items)) => format!("{:?}", items),
            _ => return "NULL".to_string(),
        };
        full.chars().take(50).collect()
    }
}

macro_rules! impl_sql_value {
    ($ty:ty => $variant:ident) => {
        impl From<$ty> for SqlValue {
            fn from(v: $ty) -> Self {
                SqlValue::$variant(Some(v.into()))
            }
        }

        impl From<Option<$ty>> for SqlValue {
            fn from(v: Option<$ty>) -> Self {
                SqlValue::$variant(v.map(Into::into))
            }
        }
    };
}

impl_sql_value!(String => Text);
impl_sql_value!(&str => Text);
impl_sql_value!(bool => Bool);
impl_sql_value!(i32 => Int);
impl_sql_value!(i64 => BigInt);
impl_sql_value!(Uuid => Uuid);
impl_sql_value!(DateTime<Utc> => Timestamp);
impl_sql_value!(Vec<String> => TextArray);

/// One invocation of a stored procedure. Built fresh per call.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureCall {
    procedure: Procedure,
    params: Vec<(&'static str, SqlValue)>,
}

impl ProcedureCall {
    pub fn new(procedure: Procedure) -> Self {
        Self {
            procedure,
            params: Vec::new(),
        }
    }

    /// Append a binding. Position follows call order.
    pub fn bind(mut self, name: &'static str, value: impl Into<SqlValue>) -> Self {
        self.params.push((name, value.into()));
        self
    }

    pub fn procedure(&self) -> Procedure {
        self.procedure
    }

    pub fn params(&self) -> &[(&'static str, SqlValue)] {
        &self.params
    }

    pub fn values(&self) -> impl Iterator<Item = &SqlValue> {
        self.params.iter().map(|(_, v)| v)
    }

    /// Look a binding up by name.
    pub fn param(&self, name: &str) -> Option<&SqlValue> {
        self.params
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// `SELECT * FROM <schema>.<procedure>($1, $2, ...)`
    pub fn to_sql(&self, schema: &str) -> String {
        let placeholders = (1..=self.params.len())
            .map(|i| format!("${}", i))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "SELECT * FROM {}.{}({})",
            schema,
            self.procedure.name(),
            placeholders
        )
    }
}

/// Schema names are spliced into SQL text, so only plain identifiers pass.
pub fn is_valid_schema_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
