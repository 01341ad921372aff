// Module declarations
pub mod error;
pub mod value;
pub mod record;
pub mod argument;
pub(crate) mod identifier;

// Re-exports for convenience
pub use error::CrudError;
pub use value::Value;
pub use record::Record;
pub use argument::Argument;
pub(crate) use identifier::Identifier;
