// Storage module - connection seam and backend adapters

mod connection;
pub mod sqlite;

pub use connection::{BackendError, Connection, PlaceholderStyle};
pub use sqlite::SqliteConnection;
