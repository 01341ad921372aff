//! Connection seam - the boundary between the CRUD layer and a database
//!
//! The layer never opens, pools or closes connections. Whatever implements
//! this trait is handed in already connected and is driven one statement at a
//! time.

use thiserror::Error;
use crate::core::{Record, Value};

/// Failure reported by a backend, carried through unchanged
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("backend error [{code}]: {message}")]
pub struct BackendError {
    pub code: i32,
    pub message: String,
}

impl BackendError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// How a backend spells its positional placeholders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaceholderStyle {
    /// `?` (MySQL, ODBC, SQLite)
    #[default]
    QuestionMark,
    /// `?1`, `?2`, ... (SQLite)
    Indexed,
    /// `$1`, `$2`, ... (PostgreSQL)
    Dollar,
}

impl PlaceholderStyle {
    /// Placeholder for the 1-based parameter `position`
    #[must_use]
    pub fn placeholder(self, position: usize) -> String {
        match self {
            Self::QuestionMark => "?".to_string(),
            Self::Indexed => format!("?{position}"),
            Self::Dollar => format!("${position}"),
        }
    }
}

/// Trait for an already-established database connection
pub trait Connection {
    /// Placeholder syntax the generated SQL must use
    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::QuestionMark
    }

    /// Run a write statement, returning the affected-row count
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<u64, BackendError>;

    /// Run a query, returning rows in backend order with columns in select order
    fn query(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Record>, BackendError>;

    /// Identifier generated by the most recent insert on this connection
    fn last_insert_id(&mut self) -> Result<i64, BackendError>;
}

impl<C: Connection + ?Sized> Connection for &mut C {
    fn placeholder_style(&self) -> PlaceholderStyle {
        (**self).placeholder_style()
    }

    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<u64, BackendError> {
        (**self).execute(sql, params)
    }

    fn query(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Record>, BackendError> {
        (**self).query(sql, params)
    }

    fn last_insert_id(&mut self) -> Result<i64, BackendError> {
        (**self).last_insert_id()
    }
}

impl<C: Connection + ?Sized> Connection for Box<C> {
    fn placeholder_style(&self) -> PlaceholderStyle {
        (**self).placeholder_style()
    }

    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<u64, BackendError> {
        (**self).execute(sql, params)
    }

    fn query(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Record>, BackendError> {
        (**self).query(sql, params)
    }

    fn last_insert_id(&mut self) -> Result<i64, BackendError> {
        (**self).last_insert_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_styles() {
        assert_eq!(PlaceholderStyle::QuestionMark.placeholder(3), "?");
        assert_eq!(PlaceholderStyle::Indexed.placeholder(3), "?3");
        assert_eq!(PlaceholderStyle::Dollar.placeholder(1), "$1");
        assert_eq!(PlaceholderStyle::default(), PlaceholderStyle::QuestionMark);
    }

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::new(19, "UNIQUE constraint failed: users.email");
        assert_eq!(err.to_string(), "backend error [19]: UNIQUE constraint failed: users.email");
    }
}
