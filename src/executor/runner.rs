use tracing::warn;

use super::builder::BuiltStatement;
use super::result::QueryResult;
use crate::core::CrudError;
use crate::storage::{BackendError, Connection, PlaceholderStyle};

/// Runs built statements on the held connection.
///
/// Nothing is retried: writes are not assumed idempotent, so every backend
/// failure goes straight back to the caller.
pub struct Executor<C: Connection> {
    conn: C,
}

impl<C: Connection> Executor<C> {
    pub const fn new(conn: C) -> Self {
        Self { conn }
    }

    pub fn placeholder_style(&self) -> PlaceholderStyle {
        self.conn.placeholder_style()
    }

    pub fn execute(&mut self, stmt: &BuiltStatement) -> Result<QueryResult, CrudError> {
        if stmt.returns_rows {
            let rows = self.conn.query(&stmt.sql, &stmt.params).map_err(failure)?;
            Ok(QueryResult::from_rows(rows))
        } else {
            let affected = self.conn.execute(&stmt.sql, &stmt.params).map_err(failure)?;
            Ok(QueryResult::AffectedCount(affected))
        }
    }

    pub fn last_insert_id(&mut self) -> Result<QueryResult, CrudError> {
        let id = self.conn.last_insert_id().map_err(failure)?;
        Ok(QueryResult::GeneratedId(id))
    }

    pub const fn connection(&self) -> &C {
        &self.conn
    }

    pub const fn connection_mut(&mut self) -> &mut C {
        &mut self.conn
    }

    pub fn into_inner(self) -> C {
        self.conn
    }
}

fn failure(err: BackendError) -> CrudError {
    warn!(code = err.code, message = %err.message, "statement failed");
    err.into()
}
