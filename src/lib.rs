// dynacrud - single-table CRUD driven by method-name conventions
//
//   getUsersById(7)                 -> SELECT * FROM users WHERE id = ?
//   insertOrderItems({...})         -> INSERT INTO order_items (...) VALUES (...)
//   updateUsersByEmail(e, {...})    -> UPDATE users SET ... WHERE email = ?
//   deleteSessionsByUserId(7)       -> DELETE FROM sessions WHERE user_id = ?

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]

// Values, records, arguments, errors, identifiers
pub mod core;

// Operation-name and call-text parsing
pub mod parser;

// Statement building, execution, dispatch
pub mod executor;

// Connection seam and backend adapters
pub mod storage;

// Re-export commonly used types for convenience
pub use crate::core::{Argument, CrudError, Record, Value};
pub use crate::parser::{Call, parse_call};
pub use crate::executor::{Dispatcher, QueryResult};
pub use crate::storage::{BackendError, Connection, PlaceholderStyle, SqliteConnection};
