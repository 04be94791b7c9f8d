use serde::{Deserialize, Serialize};

use super::validation::FieldErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub limit: i32,
    pub offset: i32,
    pub total_count: i64,
}

/// Validated `limit`/`offset` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i32,
    pub offset: i32,
}

impl Pagination {
    /// Apply the route's default and upper bound. `limit` must be in
    /// `1..=max_limit`, `offset` non-negative.
    pub fn resolve(
        limit: Option<i32>,
        offset: Option<i32>,
        default_limit: i32,
        max_limit: i32,
        errors: &mut FieldErrors,
    ) -> Self {
        let limit = limit.unwrap_or(default_limit);
        let offset = offset.unwrap_or(0);

        errors.range("limit", i64::from(limit), 1, i64::from(max_limit));
        if offset < 0 {
            errors.add("offset", "must be greater than or equal to 0");
        }

        Self { limit, offset }
    }

    pub fn meta(&self, total_count: i64) -> PaginationMeta {
        PaginationMeta {
            limit: self.limit,
            offset: self.offset,
            total_count,
        }
    }
}
