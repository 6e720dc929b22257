//! Buffered result sets.
//!
//! Drivers fetch all rows eagerly and hand them out through this cursor, which keeps driver
//! row borrows out of the public traits.

use super::backend::{ColumnDescriptor, ResultSet};
use super::DriverError;
use crate::types::Value;

#[derive(Debug)]
pub struct BufferedResultSet {
    columns: Vec<ColumnDescriptor>,
    rows: std::vec::IntoIter<Vec<Value>>,
    current: Option<Vec<Value>>,
}

impl BufferedResultSet {
    pub fn new(columns: Vec<ColumnDescriptor>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            columns,
            rows: rows.into_iter(),
            current: None,
        }
    }
}

impl ResultSet for BufferedResultSet {
    fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    fn next(&mut self) -> Result<bool, DriverError> {
        self.current = self.rows.next();
        Ok(self.current.is_some())
    }

    fn value(&self, index: usize) -> Result<Value, DriverError> {
        let row = self.current.as_ref().ok_or(DriverError::NoCurrentRow)?;
        row.get(index)
            .cloned()
            .ok_or(DriverError::ColumnOutOfRange {
                index,
                count: row.len(),
            })
    }
}
