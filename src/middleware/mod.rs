pub mod auth;
pub mod extract;
pub mod response;
pub mod trace_id;

pub use auth::CurrentUser;
pub use extract::{ApiJson, ApiPath, ApiQuery};
pub use response::{ApiResponse, ApiResult};
pub use trace_id::{trace_id, TRACE_ID_HEADER};
