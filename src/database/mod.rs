pub mod error_code;
pub mod executor;
pub mod invoker;
pub mod manager;
pub mod procedure;
pub mod row;

pub use error_code::ErrorCode;
pub use executor::{ExecutorError, ProcedureExecutor};
pub use invoker::{InvokeError, ProcedureInvoker};
pub use manager::{Database, DatabaseError};
pub use procedure::{Procedure, ProcedureCall, SqlValue};
pub use row::{decode_page, DecodeError, Row, RowPage};
