pub mod comment;
pub mod common;
pub mod community;
pub mod post;
pub mod reaction;
pub mod validation;

pub use common::{Pagination, PaginationMeta};
pub use validation::{FieldErrors, Validate};
