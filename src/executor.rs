//! Query and update execution.
//!
//! An [`Executor`] runs one statement per call on a caller-owned [`Session`]: prepare, bind
//! the values at positions 1..n, execute and, for queries, hydrate. The statement and its
//! result set are dropped before the call returns, whichever way it returns.

use std::sync::Arc;

use crate::access::FieldAccessible;
use crate::binder::{self, BoundStatement};
use crate::db::{DriverError, ResultSet, Session, Statement};
use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::error::{Error, Result};
use crate::hydrator::{ResultHydrator, TargetShape};
use crate::type_table::TypeTable;
use crate::types::Value;

#[derive(Clone)]
enum Types {
    Global,
    Owned(Arc<TypeTable>),
}

/// Runs statements with a type table and a diagnostic sink.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use rowbind::{Executor, ScalarInt, Session, SqliteProvider, Value};
///
/// let mut session = Session::new(Arc::new(SqliteProvider::in_memory()));
/// let executor = Executor::new();
/// executor.execute_update(&mut session, "CREATE TABLE t (n INT)", &[]).unwrap();
/// executor
///     .execute_update(&mut session, "INSERT INTO t VALUES (?), (?)", &[Value::Int(1), Value::Int(2)])
///     .unwrap();
/// let counts = executor
///     .execute_query(&mut session, &ScalarInt, "SELECT count(*) FROM t", &[])
///     .unwrap();
/// assert_eq!(counts, vec![2]);
/// session.close().unwrap();
/// ```
#[derive(Clone)]
pub struct Executor {
    types: Types,
    sink: Arc<dyn DiagnosticSink>,
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor {
    /// Executor using the process-wide type table and `tracing` diagnostics.
    pub fn new() -> Self {
        Self {
            types: Types::Global,
            sink: Arc::new(TracingSink),
        }
    }

    pub fn with_type_table(mut self, types: Arc<TypeTable>) -> Self {
        self.types = Types::Owned(types);
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn type_table(&self) -> &TypeTable {
        match &self.types {
            Types::Global => TypeTable::global(),
            Types::Owned(types) => types,
        }
    }

    pub fn sink(&self) -> &dyn DiagnosticSink {
        self.sink.as_ref()
    }

    /// Run an update and return the number of affected rows.
    pub fn execute_update(&self, session: &mut Session, sql: &str, values: &[Value]) -> Result<u64> {
        tracing::debug!(sql, params = values.len(), "executing update");
        run_update(session, sql, values).map_err(|e| self.failed(sql, e))
    }

    /// Bind `template` against `source` and run it as an update.
    pub fn execute_update_with(
        &self,
        session: &mut Session,
        template: &str,
        source: &dyn FieldAccessible,
    ) -> Result<u64> {
        let bound = self.bind(session, template, source)?;
        self.execute_update(session, &bound.sql, &bound.values)
    }

    /// Run a query and hydrate every row into `shape`.
    pub fn execute_query<S: TargetShape>(
        &self,
        session: &mut Session,
        shape: &S,
        sql: &str,
        values: &[Value],
    ) -> Result<Vec<S::Output>> {
        tracing::debug!(sql, params = values.len(), "executing query");
        let mut rows = run_query(session, sql, values).map_err(|e| self.failed(sql, e))?;

        let hydrator = ResultHydrator::new(self.type_table(), self.sink());
        match shape.hydrate(&hydrator, rows.as_mut()) {
            Err(Error::Execution(e)) => Err(self.failed(sql, e)),
            other => other,
        }
    }

    /// Bind `template` against `source`, run it and hydrate every row into `shape`.
    pub fn execute_query_with<S: TargetShape>(
        &self,
        session: &mut Session,
        shape: &S,
        template: &str,
        source: &dyn FieldAccessible,
    ) -> Result<Vec<S::Output>> {
        let bound = self.bind(session, template, source)?;
        self.execute_query(session, shape, &bound.sql, &bound.values)
    }

    fn bind(&self, session: &Session, template: &str, source: &dyn FieldAccessible) -> Result<BoundStatement> {
        binder::bind_with(template, Some(source), session.marker_style(), self.sink())
    }

    fn failed(&self, sql: &str, error: DriverError) -> Error {
        self.sink.emit(&Diagnostic::ExecutionFailed {
            sql: sql.to_string(),
            message: error.to_string(),
        });
        Error::Execution(error)
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let types = match self.types {
            Types::Global => "global",
            Types::Owned(_) => "owned",
        };
        f.debug_struct("Executor").field("types", &types).finish_non_exhaustive()
    }
}

fn bind_values(statement: &mut dyn Statement, values: &[Value]) -> Result<(), DriverError> {
    for (i, value) in values.iter().enumerate() {
        statement.bind(i + 1, value)?;
    }
    Ok(())
}

fn run_update(session: &mut Session, sql: &str, values: &[Value]) -> Result<u64, DriverError> {
    let connection = session.connection()?;
    let mut statement = connection.prepare(sql)?;
    bind_values(statement.as_mut(), values)?;
    statement.execute_update()
}

fn run_query(session: &mut Session, sql: &str, values: &[Value]) -> Result<Box<dyn ResultSet>, DriverError> {
    let connection = session.connection()?;
    let mut statement = connection.prepare(sql)?;
    bind_values(statement.as_mut(), values)?;
    statement.execute_query()
}
