//! Driver traits the executors run against.
//!
//! A [`ConnectionProvider`] opens connections, a [`Connection`] prepares statements, a
//! [`Statement`] binds positional values and executes, and a [`ResultSet`] is a forward-only
//! cursor over the rows. Statements and result sets are released when dropped, so every
//! exit path of a call (including `?` returns) closes them.

use chrono::NaiveDateTime;

use super::DriverError;
use crate::template::MarkerStyle;
use crate::types::Value;

/// Name and declared type of one result column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Column label (alias if the query renamed it)
    pub label: String,
    /// Declared database type, `None` for expressions without one
    pub declared_type: Option<String>,
}

impl ColumnDescriptor {
    pub fn new(label: impl Into<String>, declared_type: Option<&str>) -> Self {
        Self {
            label: label.into(),
            declared_type: declared_type.map(str::to_string),
        }
    }
}

/// Opens connections to one database.
pub trait ConnectionProvider: Send + Sync {
    fn connect(&self) -> Result<Box<dyn Connection>, DriverError>;

    /// Positional marker syntax the driver's SQL dialect expects.
    fn marker_style(&self) -> MarkerStyle {
        MarkerStyle::Question
    }

    /// Get the backend name for logging/debugging.
    fn backend_name(&self) -> &'static str;
}

pub trait Connection {
    fn prepare(&mut self, sql: &str) -> Result<Box<dyn Statement + '_>, DriverError>;

    fn is_closed(&self) -> bool;

    /// Close the connection. Closing twice is a no-op.
    fn close(&mut self) -> Result<(), DriverError>;
}

pub trait Statement {
    /// Bind `value` at the 1-indexed `position`.
    fn bind(&mut self, position: usize, value: &Value) -> Result<(), DriverError>;

    /// Run the statement and return the affected row count.
    fn execute_update(&mut self) -> Result<u64, DriverError>;

    /// Run the statement and return its rows.
    fn execute_query(&mut self) -> Result<Box<dyn ResultSet>, DriverError>;
}

pub trait ResultSet {
    fn columns(&self) -> &[ColumnDescriptor];

    /// Advance to the next row. Returns false once the rows are exhausted.
    fn next(&mut self) -> Result<bool, DriverError>;

    /// Raw value of the 0-indexed column in the current row.
    fn value(&self, index: usize) -> Result<Value, DriverError>;

    /// Timestamp accessor for the 0-indexed column in the current row.
    fn timestamp(&self, index: usize) -> Result<Option<NaiveDateTime>, DriverError> {
        let value = self.value(index)?;
        value
            .into_timestamp()
            .map_err(|e| DriverError::Conversion { index, source: e })
    }

    fn column_count(&self) -> usize {
        self.columns().len()
    }
}

/// Store a 1-indexed parameter in a buffer, growing it with nulls as needed.
pub(crate) fn place_parameter(
    params: &mut Vec<Value>,
    position: usize,
    value: &Value,
) -> Result<(), DriverError> {
    if position == 0 {
        return Err(DriverError::ParameterOutOfRange { position });
    }
    if params.len() < position {
        params.resize(position, Value::Null);
    }
    params[position - 1] = value.clone();
    Ok(())
}
