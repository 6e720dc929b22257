//! Parameter binding from object accessors.

use crate::access::{accessor_name, AccessError, FieldAccessible};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::{Error, Result};
use crate::template::{self, MarkerStyle};
use crate::types::Value;

/// Rewritten SQL with the values for its positional markers, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundStatement {
    pub sql: String,
    pub values: Vec<Value>,
}

/// Bind a template against `source` using `?` markers.
///
/// # Example
/// ```
/// use rowbind::{binder, MapSource, NullSink, Value};
///
/// let source = MapSource::new().with("id", 7).with("name", "Ann");
/// let bound = binder::bind(
///     "SELECT * FROM users WHERE id=#{id} AND name=#{name}",
///     Some(&source),
///     &NullSink,
/// )
/// .unwrap();
/// assert_eq!(bound.sql, "SELECT * FROM users WHERE id=? AND name=?");
/// assert_eq!(bound.values, vec![Value::Int(7), Value::from("Ann")]);
/// ```
pub fn bind(
    template: &str,
    source: Option<&dyn FieldAccessible>,
    sink: &dyn DiagnosticSink,
) -> Result<BoundStatement> {
    bind_with(template, source, MarkerStyle::Question, sink)
}

/// Bind a template against `source`, writing markers in the given style.
///
/// Each token is resolved through its accessor (`#{userName}` → `getUserName`) every time it
/// occurs. A template without placeholders needs no source.
pub fn bind_with(
    template: &str,
    source: Option<&dyn FieldAccessible>,
    style: MarkerStyle,
    sink: &dyn DiagnosticSink,
) -> Result<BoundStatement> {
    let parsed = template::parse_with(template, style)?;

    let mut values = Vec::with_capacity(parsed.tokens.len());
    for token in &parsed.tokens {
        let accessor = accessor_name(token);
        let value = match source {
            Some(source) => source.get(&accessor),
            None => Err(AccessError::NullSource { name: accessor }),
        };
        values.push(value.map_err(|source| Error::Binding {
            token: token.clone(),
            source,
        })?);
    }

    let bound = BoundStatement {
        sql: parsed.sql,
        values,
    };
    sink.emit(&Diagnostic::Bound {
        sql: bound.sql.clone(),
        values: bound.values.clone(),
    });
    Ok(bound)
}
