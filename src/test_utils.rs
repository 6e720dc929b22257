//! Shared test utilities for executor and hydration tests.
//!
//! This module provides an in-memory driver that serves canned rows and counts every
//! connection, statement and result set it hands out, so tests can check that resources
//! are released on every exit path.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::commands::Context;
use crate::db::{
    BufferedResultSet, ColumnDescriptor, Connection, ConnectionProvider, DriverError, ResultSet, Session,
    SqliteProvider, Statement,
};
use crate::diagnostics::NullSink;
use crate::executor::Executor;
use crate::template::MarkerStyle;
use crate::types::Value;

/// Where a [`MockProvider`] should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePoint {
    Connect,
    Prepare,
    Execute,
}

/// Counters and call records of a [`MockProvider`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MockStats {
    pub connections_opened: usize,
    pub connections_closed: usize,
    pub statements_prepared: usize,
    pub statements_released: usize,
    pub result_sets_released: usize,
    /// SQL of every prepared statement, in order
    pub prepared_sql: Vec<String>,
    /// Parameters of every executed statement, in order
    pub bound: Vec<Vec<Value>>,
}

#[derive(Debug, Default)]
struct MockState {
    stats: MockStats,
    columns: Vec<ColumnDescriptor>,
    rows: Vec<Vec<Value>>,
    affected: u64,
    failure: Option<FailurePoint>,
}

#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    state: Arc<Mutex<MockState>>,
    style: MarkerStyle,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve these rows to every query.
    pub fn with_rows(self, columns: &[(&str, Option<&str>)], rows: Vec<Vec<Value>>) -> Self {
        {
            let mut state = self.lock();
            state.columns = columns
                .iter()
                .map(|(label, declared)| ColumnDescriptor::new(*label, *declared))
                .collect();
            state.rows = rows;
        }
        self
    }

    /// Report this many affected rows for every update.
    pub fn with_affected(self, affected: u64) -> Self {
        self.lock().affected = affected;
        self
    }

    pub fn failing_at(self, point: FailurePoint) -> Self {
        self.lock().failure = Some(point);
        self
    }

    pub fn with_marker_style(mut self, style: MarkerStyle) -> Self {
        self.style = style;
        self
    }

    pub fn stats(&self) -> MockStats {
        self.lock().stats.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }
}

fn failure(point: FailurePoint) -> DriverError {
    DriverError::Other {
        message: format!("mock failure at {:?}", point),
    }
}

impl ConnectionProvider for MockProvider {
    fn connect(&self) -> Result<Box<dyn Connection>, DriverError> {
        let mut state = self.lock();
        if state.failure == Some(FailurePoint::Connect) {
            return Err(failure(FailurePoint::Connect));
        }
        state.stats.connections_opened += 1;
        Ok(Box::new(MockConnection {
            state: Arc::clone(&self.state),
            closed: false,
        }))
    }

    fn marker_style(&self) -> MarkerStyle {
        self.style
    }

    fn backend_name(&self) -> &'static str {
        "Mock"
    }
}

struct MockConnection {
    state: Arc<Mutex<MockState>>,
    closed: bool,
}

impl Connection for MockConnection {
    fn prepare(&mut self, sql: &str) -> Result<Box<dyn Statement + '_>, DriverError> {
        if self.closed {
            return Err(DriverError::Closed);
        }
        let mut state = self.state.lock().unwrap();
        if state.failure == Some(FailurePoint::Prepare) {
            return Err(failure(FailurePoint::Prepare));
        }
        state.stats.statements_prepared += 1;
        state.stats.prepared_sql.push(sql.to_string());
        Ok(Box::new(MockStatement {
            state: Arc::clone(&self.state),
            params: Vec::new(),
        }))
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn close(&mut self) -> Result<(), DriverError> {
        if !self.closed {
            self.closed = true;
            self.state.lock().unwrap().stats.connections_closed += 1;
        }
        Ok(())
    }
}

struct MockStatement {
    state: Arc<Mutex<MockState>>,
    params: Vec<Value>,
}

impl MockStatement {
    fn record(&self) -> Result<MutexGuard<'_, MockState>, DriverError> {
        let mut state = self.state.lock().unwrap();
        state.stats.bound.push(self.params.clone());
        if state.failure == Some(FailurePoint::Execute) {
            return Err(failure(FailurePoint::Execute));
        }
        Ok(state)
    }
}

impl Statement for MockStatement {
    fn bind(&mut self, position: usize, value: &Value) -> Result<(), DriverError> {
        crate::db::place_parameter(&mut self.params, position, value)
    }

    fn execute_update(&mut self) -> Result<u64, DriverError> {
        Ok(self.record()?.affected)
    }

    fn execute_query(&mut self) -> Result<Box<dyn ResultSet>, DriverError> {
        let state = self.record()?;
        Ok(Box::new(MockResultSet {
            inner: BufferedResultSet::new(state.columns.clone(), state.rows.clone()),
            state: Arc::clone(&self.state),
        }))
    }
}

impl Drop for MockStatement {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            state.stats.statements_released += 1;
        }
    }
}

struct MockResultSet {
    inner: BufferedResultSet,
    state: Arc<Mutex<MockState>>,
}

impl ResultSet for MockResultSet {
    fn columns(&self) -> &[ColumnDescriptor] {
        self.inner.columns()
    }

    fn next(&mut self) -> Result<bool, DriverError> {
        self.inner.next()
    }

    fn value(&self, index: usize) -> Result<Value, DriverError> {
        self.inner.value(index)
    }
}

impl Drop for MockResultSet {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            state.stats.result_sets_released += 1;
        }
    }
}

/// A buffered result set from `(label, declared type)` pairs and rows.
pub fn result_set(columns: &[(&str, Option<&str>)], rows: Vec<Vec<Value>>) -> BufferedResultSet {
    BufferedResultSet::new(
        columns
            .iter()
            .map(|(label, declared)| ColumnDescriptor::new(*label, *declared))
            .collect(),
        rows,
    )
}

/// A command context over a fresh in-memory SQLite database, with diagnostics discarded.
pub fn memory_context() -> Context {
    Context::new(
        Session::new(Arc::new(SqliteProvider::in_memory())),
        Executor::new().with_sink(Arc::new(NullSink)),
    )
}
