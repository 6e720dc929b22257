use std::error::Error;

use serde::Serialize;

use super::QueryCmd;
use crate::commands::params::to_source;
use crate::commands::{Context, Execute, Param};
use crate::hydrator::{ScalarInt, TargetShape, TupleOfColumns};
use crate::types::Value;

/// Rows returned by the query command
#[derive(Debug, Default, Serialize)]
pub struct QueryResult {
    pub sql: String,
    pub row_count: usize,
    pub rows: Vec<Vec<Value>>,
}

/// Run `sql` as is, or bound from `params` when any were given.
fn run<S: TargetShape>(
    ctx: &mut Context,
    shape: &S,
    sql: &str,
    params: &[Param],
) -> crate::Result<Vec<S::Output>> {
    let Context { session, executor } = ctx;
    if params.is_empty() {
        executor.execute_query(session, shape, sql, &[])
    } else {
        executor.execute_query_with(session, shape, sql, &to_source(params))
    }
}

impl Execute for QueryCmd {
    type Output = QueryResult;

    fn execute(self, ctx: &mut Context) -> Result<Self::Output, Box<dyn Error>> {
        let rows: Vec<Vec<Value>> = if self.scalar {
            run(ctx, &ScalarInt, &self.sql, &self.params)?
                .into_iter()
                .map(|n| vec![Value::Int(n)])
                .collect()
        } else {
            run(ctx, &TupleOfColumns, &self.sql, &self.params)?
        };

        Ok(QueryResult {
            sql: self.sql,
            row_count: rows.len(),
            rows,
        })
    }
}
