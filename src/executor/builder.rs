//! Statement builder - turns a decoded operation into parameterized SQL
//!
//! Only [`Identifier`]s are spliced into the SQL text. Every value travels
//! in `params`, in placeholder order.

use crate::core::{Argument, CrudError, Identifier, Record, Value};
use crate::parser::Verb;
use crate::storage::PlaceholderStyle;

#[derive(Debug, Clone, PartialEq)]
pub struct BuiltStatement {
    pub sql: String,
    pub params: Vec<Value>,
    /// `SELECT` statements hand back rows, everything else an affected count
    pub returns_rows: bool,
}

/// Hands out placeholders in parameter order
struct Placeholders {
    style: PlaceholderStyle,
    issued: usize,
}

impl Placeholders {
    const fn new(style: PlaceholderStyle) -> Self {
        Self { style, issued: 0 }
    }

    fn next(&mut self) -> String {
        self.issued += 1;
        self.style.placeholder(self.issued)
    }
}

pub struct StatementBuilder {
    style: PlaceholderStyle,
}

impl StatementBuilder {
    pub const fn new(style: PlaceholderStyle) -> Self {
        Self { style }
    }

    pub fn build(
        &self,
        verb: Verb,
        table: &Identifier,
        field: Option<&Identifier>,
        args: &[Argument],
    ) -> Result<BuiltStatement, CrudError> {
        match (verb, field) {
            (Verb::Get, Some(field)) => {
                let [lookup] = Self::arity::<1>(verb, args)?;
                let lookup = Self::scalar(lookup, 1)?;
                Ok(self.keyed(format!("SELECT * FROM {table}"), field, lookup, true))
            }
            (Verb::Delete, Some(field)) => {
                let [lookup] = Self::arity::<1>(verb, args)?;
                let lookup = Self::scalar(lookup, 1)?;
                Ok(self.keyed(format!("DELETE FROM {table}"), field, lookup, false))
            }
            (Verb::Insert, None) => {
                let [data] = Self::arity::<1>(verb, args)?;
                let data = Self::field_map(data, 1)?;
                Ok(self.insert(table, data))
            }
            (Verb::Update, Some(field)) => {
                let [lookup, set] = Self::arity::<2>(verb, args)?;
                let lookup = Self::scalar(lookup, 1)?;
                let set = Self::field_map(set, 2)?;
                Ok(self.update(table, field, set, lookup))
            }
            _ => Err(CrudError::InvalidArgument(format!(
                "no statement shape for '{verb}' on '{table}'"
            ))),
        }
    }

    /// `<prefix> WHERE <field> = <ph>`
    fn keyed(&self, prefix: String, field: &Identifier, lookup: Value, returns_rows: bool) -> BuiltStatement {
        let mut ph = Placeholders::new(self.style);
        BuiltStatement {
            sql: format!("{prefix} WHERE {field} = {}", ph.next()),
            params: vec![lookup],
            returns_rows,
        }
    }

    fn insert(&self, table: &Identifier, data: Vec<(Identifier, Value)>) -> BuiltStatement {
        let mut ph = Placeholders::new(self.style);
        let mut columns = Vec::with_capacity(data.len());
        let mut marks = Vec::with_capacity(data.len());
        let mut params = Vec::with_capacity(data.len());
        for (column, value) in data {
            columns.push(column.to_string());
            marks.push(ph.next());
            params.push(value);
        }

        BuiltStatement {
            sql: format!(
                "INSERT INTO {table} ({}) VALUES ({})",
                columns.join(", "),
                marks.join(", ")
            ),
            params,
            returns_rows: false,
        }
    }

    fn update(
        &self,
        table: &Identifier,
        field: &Identifier,
        set: Vec<(Identifier, Value)>,
        lookup: Value,
    ) -> BuiltStatement {
        let mut ph = Placeholders::new(self.style);
        let mut assignments = Vec::with_capacity(set.len());
        let mut params = Vec::with_capacity(set.len() + 1);
        for (column, value) in set {
            assignments.push(format!("{column} = {}", ph.next()));
            params.push(value);
        }
        params.push(lookup);

        BuiltStatement {
            sql: format!(
                "UPDATE {table} SET {} WHERE {field} = {}",
                assignments.join(", "),
                ph.next()
            ),
            params,
            returns_rows: false,
        }
    }

    fn arity<const N: usize>(verb: Verb, args: &[Argument]) -> Result<&[Argument; N], CrudError> {
        args.try_into().map_err(|_| {
            CrudError::InvalidArgument(format!(
                "'{verb}' takes {N} argument(s), got {}",
                args.len()
            ))
        })
    }

    fn scalar(arg: &Argument, position: usize) -> Result<Value, CrudError> {
        match arg {
            Argument::Value(value) => Ok(value.clone()),
            other @ Argument::Fields(_) => Err(CrudError::InvalidArgument(format!(
                "argument {position} must be a value, got a {}",
                other.kind()
            ))),
        }
    }

    /// Validates a field map: non-empty, every key normalizes to a safe
    /// identifier, no two keys collapse onto the same column.
    fn field_map(arg: &Argument, position: usize) -> Result<Vec<(Identifier, Value)>, CrudError> {
        let record: &Record = match arg {
            Argument::Fields(record) => record,
            other @ Argument::Value(_) => {
                return Err(CrudError::InvalidArgument(format!(
                    "argument {position} must be a field map, got a {}",
                    other.kind()
                )));
            }
        };
        if record.is_empty() {
            return Err(CrudError::InvalidArgument(format!(
                "argument {position} must be a non-empty field map"
            )));
        }

        let mut columns: Vec<(Identifier, Value)> = Vec::with_capacity(record.len());
        for (name, value) in record.iter() {
            let column = Identifier::normalize(name)?;
            if columns.iter().any(|(c, _)| *c == column) {
                return Err(CrudError::InvalidArgument(format!(
                    "field '{name}' maps to column '{column}' more than once"
                )));
            }
            columns.push((column, value.clone()));
        }
        Ok(columns)
    }
}
