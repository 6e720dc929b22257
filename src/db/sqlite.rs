//! SQLite driver backed by `rusqlite`.
//!
//! Declared column types come from the table schema (`CREATE TABLE t (id BIGINT, ...)`), so
//! the type table sees the same names the schema author wrote. Timestamps are stored as
//! ISO-8601 text and parsed back by the timestamp accessor.

use std::path::{Path, PathBuf};

use rusqlite::params_from_iter;
use rusqlite::types::Value as SqliteValue;

use super::backend::{place_parameter, ColumnDescriptor, Connection, ConnectionProvider, ResultSet, Statement};
use super::result::BufferedResultSet;
use super::DriverError;
use crate::types::{Value, TIMESTAMP_FORMAT};

#[derive(Debug, Clone, PartialEq, Eq)]
enum SqliteTarget {
    Memory,
    File(PathBuf),
}

/// Opens SQLite connections to a file or to a private in-memory database.
///
/// Every in-memory connection is a separate database; a `Session` keeps one connection, so
/// its tables live as long as the session's connection.
#[derive(Debug, Clone)]
pub struct SqliteProvider {
    target: SqliteTarget,
}

impl SqliteProvider {
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self {
            target: SqliteTarget::File(path.as_ref().to_path_buf()),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            target: SqliteTarget::Memory,
        }
    }

    fn describe(&self) -> String {
        match &self.target {
            SqliteTarget::Memory => ":memory:".to_string(),
            SqliteTarget::File(path) => path.display().to_string(),
        }
    }
}

impl ConnectionProvider for SqliteProvider {
    fn connect(&self) -> Result<Box<dyn Connection>, DriverError> {
        let opened = match &self.target {
            SqliteTarget::Memory => rusqlite::Connection::open_in_memory(),
            SqliteTarget::File(path) => rusqlite::Connection::open(path),
        };
        let inner = opened.map_err(|e| DriverError::OpenFailed {
            target: self.describe(),
            message: e.to_string(),
        })?;
        Ok(Box::new(SqliteConnection { inner: Some(inner) }))
    }

    fn backend_name(&self) -> &'static str {
        match self.target {
            SqliteTarget::Memory => "SqliteMem",
            SqliteTarget::File(_) => "Sqlite",
        }
    }
}

struct SqliteConnection {
    inner: Option<rusqlite::Connection>,
}

impl Connection for SqliteConnection {
    fn prepare(&mut self, sql: &str) -> Result<Box<dyn Statement + '_>, DriverError> {
        let connection = self.inner.as_ref().ok_or(DriverError::Closed)?;
        let inner = connection.prepare(sql)?;
        Ok(Box::new(SqliteStatement {
            inner,
            params: Vec::new(),
        }))
    }

    fn is_closed(&self) -> bool {
        self.inner.is_none()
    }

    fn close(&mut self) -> Result<(), DriverError> {
        match self.inner.take() {
            Some(connection) => connection.close().map_err(|(_, e)| DriverError::Sqlite(e)),
            None => Ok(()),
        }
    }
}

struct SqliteStatement<'conn> {
    inner: rusqlite::Statement<'conn>,
    params: Vec<Value>,
}

impl SqliteStatement<'_> {
    fn sqlite_params(&self) -> Vec<SqliteValue> {
        self.params.iter().map(to_sqlite).collect()
    }
}

impl Statement for SqliteStatement<'_> {
    fn bind(&mut self, position: usize, value: &Value) -> Result<(), DriverError> {
        place_parameter(&mut self.params, position, value)
    }

    fn execute_update(&mut self) -> Result<u64, DriverError> {
        let params = self.sqlite_params();
        let affected = self.inner.execute(params_from_iter(params.iter()))?;
        Ok(affected as u64)
    }

    fn execute_query(&mut self) -> Result<Box<dyn ResultSet>, DriverError> {
        let columns: Vec<ColumnDescriptor> = self
            .inner
            .columns()
            .iter()
            .map(|column| ColumnDescriptor::new(column.name(), column.decl_type()))
            .collect();
        let count = columns.len();
        let params = self.sqlite_params();

        let mut rows = self.inner.query(params_from_iter(params.iter()))?;
        let mut buffered = Vec::new();
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(count);
            for index in 0..count {
                let raw: SqliteValue = row.get(index)?;
                values.push(from_sqlite(raw));
            }
            buffered.push(values);
        }

        Ok(Box::new(BufferedResultSet::new(columns, buffered)))
    }
}

fn to_sqlite(value: &Value) -> SqliteValue {
    match value {
        Value::Null => SqliteValue::Null,
        Value::Bool(b) => SqliteValue::Integer(i64::from(*b)),
        Value::Int(v) => SqliteValue::Integer(i64::from(*v)),
        Value::BigInt(v) => SqliteValue::Integer(*v),
        Value::Double(v) => SqliteValue::Real(*v),
        Value::Text(s) => SqliteValue::Text(s.clone()),
        Value::DateTime(dt) => SqliteValue::Text(dt.format(TIMESTAMP_FORMAT).to_string()),
        Value::Bytes(b) => SqliteValue::Blob(b.clone()),
    }
}

fn from_sqlite(value: SqliteValue) -> Value {
    match value {
        SqliteValue::Null => Value::Null,
        SqliteValue::Integer(v) => Value::BigInt(v),
        SqliteValue::Real(v) => Value::Double(v),
        SqliteValue::Text(s) => Value::Text(s),
        SqliteValue::Blob(b) => Value::Bytes(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use rstest::{fixture, rstest};

    #[fixture]
    fn connection() -> Box<dyn Connection> {
        let mut connection = SqliteProvider::in_memory().connect().unwrap();
        connection
            .prepare("CREATE TABLE items (id BIGINT, label VARCHAR(20), price DECIMAL(8,2), added TIMESTAMP)")
            .unwrap()
            .execute_update()
            .unwrap();
        connection
    }

    fn insert(connection: &mut dyn Connection, values: &[Value]) -> u64 {
        let mut statement = connection
            .prepare("INSERT INTO items (id, label, price, added) VALUES (?, ?, ?, ?)")
            .unwrap();
        for (i, value) in values.iter().enumerate() {
            statement.bind(i + 1, value).unwrap();
        }
        statement.execute_update().unwrap()
    }

    #[rstest]
    fn test_declared_types_are_reported(mut connection: Box<dyn Connection>) {
        let mut statement = connection.prepare("SELECT id, label, price, added, 1 + 1 AS two FROM items").unwrap();
        let rows = statement.execute_query().unwrap();
        let types: Vec<Option<&str>> = rows
            .columns()
            .iter()
            .map(|c| c.declared_type.as_deref())
            .collect();
        assert_eq!(
            types,
            vec![Some("BIGINT"), Some("VARCHAR(20)"), Some("DECIMAL(8,2)"), Some("TIMESTAMP"), None]
        );
        assert_eq!(rows.columns()[4].label, "two");
    }

    #[rstest]
    fn test_bind_and_read_back(mut connection: Box<dyn Connection>) {
        let added = NaiveDateTime::parse_from_str("2024-05-06 07:08:09", "%Y-%m-%d %H:%M:%S").unwrap();
        let affected = insert(
            connection.as_mut(),
            &[Value::BigInt(1), Value::from("lamp"), Value::Double(12.5), Value::DateTime(added)],
        );
        assert_eq!(affected, 1);

        let mut statement = connection.prepare("SELECT id, label, price, added FROM items WHERE id = ?").unwrap();
        statement.bind(1, &Value::Int(1)).unwrap();
        let mut rows = statement.execute_query().unwrap();
        assert!(rows.next().unwrap());
        assert_eq!(rows.value(0).unwrap(), Value::BigInt(1));
        assert_eq!(rows.value(1).unwrap(), Value::Text("lamp".into()));
        assert_eq!(rows.value(2).unwrap(), Value::Double(12.5));
        assert_eq!(rows.timestamp(3).unwrap(), Some(added));
        assert!(!rows.next().unwrap());
    }

    #[rstest]
    fn test_update_counts_rows(mut connection: Box<dyn Connection>) {
        insert(connection.as_mut(), &[Value::BigInt(1), Value::from("a"), Value::Null, Value::Null]);
        insert(connection.as_mut(), &[Value::BigInt(2), Value::from("b"), Value::Null, Value::Null]);

        let mut statement = connection.prepare("UPDATE items SET label = 'z'").unwrap();
        assert_eq!(statement.execute_update().unwrap(), 2);
    }

    #[rstest]
    fn test_bad_sql_is_a_driver_error(mut connection: Box<dyn Connection>) {
        let err = connection.prepare("SELEKT nothing").err().unwrap();
        assert!(matches!(err, DriverError::Sqlite(_)));
    }

    #[rstest]
    fn test_closed_connection_refuses_prepare(mut connection: Box<dyn Connection>) {
        connection.close().unwrap();
        assert!(connection.is_closed());
        assert!(matches!(connection.prepare("SELECT 1").err(), Some(DriverError::Closed)));
        connection.close().unwrap();
    }

    #[rstest]
    fn test_file_database_persists() {
        let dir = tempfile::tempdir().unwrap();
        let provider = SqliteProvider::open(dir.path().join("test.sqlite"));
        assert_eq!(provider.backend_name(), "Sqlite");

        let mut first = provider.connect().unwrap();
        first.prepare("CREATE TABLE t (n INT)").unwrap().execute_update().unwrap();
        first.prepare("INSERT INTO t VALUES (5)").unwrap().execute_update().unwrap();
        first.close().unwrap();

        let mut second = provider.connect().unwrap();
        let mut statement = second.prepare("SELECT n FROM t").unwrap();
        let mut rows = statement.execute_query().unwrap();
        assert!(rows.next().unwrap());
        assert_eq!(rows.value(0).unwrap(), Value::BigInt(5));
    }

    #[rstest]
    fn test_open_failure_names_target() {
        let provider = SqliteProvider::open("/nonexistent-dir/for/sure/db.sqlite");
        let err = provider.connect().err().unwrap();
        assert!(matches!(err, DriverError::OpenFailed { ref target, .. } if target.contains("nonexistent-dir")));
    }
}
