//! `SQLite` backend adapter over `rusqlite`

use std::path::Path;

use rusqlite::types::{ToSqlOutput, Value as SqlValue, ValueRef};
use rusqlite::{ToSql, params_from_iter};

use super::connection::{BackendError, Connection, PlaceholderStyle};
use crate::core::{Record, Value};

/// Code used when rusqlite fails before SQLite itself reports anything
/// (type conversion, invalid parameter count, ...)
const CLIENT_ERROR_CODE: i32 = -1;

pub struct SqliteConnection {
    conn: rusqlite::Connection,
}

impl SqliteConnection {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BackendError> {
        Ok(Self::from_connection(rusqlite::Connection::open(path)?))
    }

    pub fn open_in_memory() -> Result<Self, BackendError> {
        Ok(Self::from_connection(rusqlite::Connection::open_in_memory()?))
    }

    /// Wrap a connection the application already opened and configured
    #[must_use]
    pub const fn from_connection(conn: rusqlite::Connection) -> Self {
        Self { conn }
    }

    /// Run one or more raw statements (schema setup, pragmas, ...)
    pub fn execute_batch(&self, sql: &str) -> Result<(), BackendError> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    #[must_use]
    pub const fn inner(&self) -> &rusqlite::Connection {
        &self.conn
    }

    #[must_use]
    pub fn into_inner(self) -> rusqlite::Connection {
        self.conn
    }

    /// TEXT that is not valid UTF-8 comes back as a blob with its bytes intact
    fn cell(value: ValueRef<'_>) -> Value {
        match value {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(i) => Value::Integer(i),
            ValueRef::Real(r) => Value::Real(r),
            ValueRef::Text(bytes) => String::from_utf8(bytes.to_vec())
                .map_or_else(|err| Value::Blob(err.into_bytes()), Value::Text),
            ValueRef::Blob(bytes) => Value::Blob(bytes.to_vec()),
        }
    }
}

impl Connection for SqliteConnection {
    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::Indexed
    }

    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<u64, BackendError> {
        let mut stmt = self.conn.prepare(sql)?;
        let affected = stmt.execute(params_from_iter(params))?;
        Ok(affected as u64)
    }

    fn query(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Record>, BackendError> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(str::to_string).collect();

        let mut rows = stmt.query(params_from_iter(params))?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let mut record = Record::with_capacity(columns.len());
            for (idx, name) in columns.iter().enumerate() {
                record.insert(name.clone(), Self::cell(row.get_ref(idx)?));
            }
            records.push(record);
        }
        Ok(records)
    }

    fn last_insert_id(&mut self) -> Result<i64, BackendError> {
        Ok(self.conn.last_insert_rowid())
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Self::Null => ToSqlOutput::Owned(SqlValue::Null),
            Self::Integer(i) => ToSqlOutput::Owned(SqlValue::Integer(*i)),
            Self::Real(r) => ToSqlOutput::Owned(SqlValue::Real(*r)),
            Self::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            Self::Boolean(b) => ToSqlOutput::Owned(SqlValue::Integer(i64::from(*b))),
            Self::Blob(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b)),
        })
    }
}

impl From<rusqlite::Error> for BackendError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(failure, message) => Self {
                code: failure.extended_code,
                message: message.unwrap_or_else(|| failure.to_string()),
            },
            other => Self::new(CLIENT_ERROR_CODE, other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> SqliteConnection {
        let conn = SqliteConnection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE users (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL UNIQUE, age INTEGER, photo BLOB)",
        )
        .unwrap();
        conn
    }

    #[test]
    fn test_execute_reports_affected_rows() {
        let mut conn = setup();
        let n = conn
            .execute("INSERT INTO users (name, age) VALUES (?1, ?2)", &[Value::from("Alice"), Value::from(30)])
            .unwrap();
        assert_eq!(n, 1);
        assert_eq!(conn.last_insert_id().unwrap(), 1);
    }

    #[test]
    fn test_query_keeps_column_order_and_types() {
        let mut conn = setup();
        conn.execute(
            "INSERT INTO users (name, age, photo) VALUES (?1, ?2, ?3)",
            &[Value::from("Bob"), Value::Null, Value::Blob(vec![1, 2])],
        )
        .unwrap();

        let rows = conn.query("SELECT * FROM users WHERE name = ?1", &[Value::from("Bob")]).unwrap();
        assert_eq!(rows.len(), 1);
        let names: Vec<&str> = rows[0].names().collect();
        assert_eq!(names, vec!["id", "name", "age", "photo"]);
        assert_eq!(rows[0].get("age"), Some(&Value::Null));
        assert_eq!(rows[0].get("photo"), Some(&Value::Blob(vec![1, 2])));
    }

    #[test]
    fn test_boolean_binds_as_integer() {
        let mut conn = setup();
        conn.execute("INSERT INTO users (name, age) VALUES (?1, ?2)", &[Value::from("Eve"), Value::Boolean(true)])
            .unwrap();
        let rows = conn.query("SELECT age FROM users", &[]).unwrap();
        assert_eq!(rows[0].get("age"), Some(&Value::Integer(1)));
    }

    #[test]
    fn test_constraint_violation_carries_sqlite_code() {
        let mut conn = setup();
        let insert = "INSERT INTO users (name) VALUES (?1)";
        conn.execute(insert, &[Value::from("Alice")]).unwrap();
        let err = conn.execute(insert, &[Value::from("Alice")]).unwrap_err();
        // SQLITE_CONSTRAINT_UNIQUE
        assert_eq!(err.code, 2067);
        assert!(err.message.contains("UNIQUE"));
    }

    #[test]
    fn test_non_utf8_text_keeps_its_bytes() {
        let mut conn = setup();
        conn.execute_batch("INSERT INTO users (name) VALUES (CAST(X'FF61' AS TEXT))").unwrap();
        let rows = conn.query("SELECT name, typeof(name) AS kind FROM users", &[]).unwrap();
        assert_eq!(rows[0].get("kind"), Some(&Value::from("text")));
        assert_eq!(rows[0].get("name"), Some(&Value::Blob(vec![0xff, 0x61])));
    }

    #[test]
    fn test_missing_table_is_reported() {
        let mut conn = setup();
        let err = conn.query("SELECT * FROM nope", &[]).unwrap_err();
        assert!(err.message.contains("no such table"));
    }
}
