use tracing::debug;

use super::builder::StatementBuilder;
use super::result::QueryResult;
use super::runner::Executor;
use crate::core::{Argument, CrudError, Identifier};
use crate::parser::{Verb, parse_operation};
use crate::storage::Connection;

/// Entry point of the CRUD layer.
///
/// Owns the connection it was given. `invoke` takes `&mut self`, so one
/// dispatcher runs one operation at a time; use one dispatcher per
/// connection when calls need to run concurrently.
pub struct Dispatcher<C: Connection> {
    executor: Executor<C>,
}

impl<C: Connection> Dispatcher<C> {
    pub const fn new(conn: C) -> Self {
        Self {
            executor: Executor::new(conn),
        }
    }

    /// Runs one operation by name.
    ///
    /// ```text
    /// get<Table>By<Field>(value)              -> NoRows | SingleRecord | RecordSet
    /// insert<Table>(fields)                   -> AffectedCount
    /// update<Table>By<Field>(value, fields)   -> AffectedCount
    /// delete<Table>By<Field>(value)           -> AffectedCount
    /// lastInsertId()                          -> GeneratedId
    /// ```
    ///
    /// Name, identifier and argument errors are raised before the connection
    /// is touched.
    pub fn invoke(&mut self, operation: &str, args: &[Argument]) -> Result<QueryResult, CrudError> {
        let op = parse_operation(operation)?;

        if op.verb == Verb::LastInsertId {
            if !args.is_empty() {
                return Err(CrudError::InvalidArgument(format!(
                    "'{operation}' takes no arguments, got {}",
                    args.len()
                )));
            }
            debug!(operation, "fetching last generated id");
            return self.executor.last_insert_id();
        }

        let table = Identifier::normalize(op.table)?;
        let field = op.field.map(Identifier::normalize).transpose()?;
        let stmt = StatementBuilder::new(self.executor.placeholder_style())
            .build(op.verb, &table, field.as_ref(), args)?;

        debug!(operation, sql = %stmt.sql, params = stmt.params.len(), "executing");
        self.executor.execute(&stmt)
    }

    /// The connection this dispatcher was built with, for work outside the
    /// naming convention (schema setup, transactions, ...)
    pub const fn connection(&self) -> &C {
        self.executor.connection()
    }

    pub const fn connection_mut(&mut self) -> &mut C {
        self.executor.connection_mut()
    }

    pub fn into_inner(self) -> C {
        self.executor.into_inner()
    }
}
