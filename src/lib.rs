//! rowbind - named-placeholder SQL for plain Rust structs
//!
//! Write statements with `#{name}` placeholders, bind them from any value that exposes
//! conventional `getName` accessors, and hydrate result rows back into structs, tuples of
//! column values or plain integers. Column types are mapped to host types through a
//! shared [`TypeTable`]; every binding and hydration decision is reported to a
//! [`DiagnosticSink`].
//!
//! SQLite is always available. PostgreSQL needs the `postgres` feature.

pub mod access;
pub mod binder;
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod diagnostics;
pub mod error;
pub mod executor;
pub mod hydrator;
pub mod output;
pub mod template;
pub mod type_table;
pub mod types;

#[cfg(test)]
#[macro_use]
mod test_macros;

#[cfg(test)]
pub mod test_utils;

pub use access::{AccessError, FieldAccessible, MapSource};
pub use binder::BoundStatement;
pub use db::{DatabaseConfig, Session, SqliteProvider};
#[cfg(feature = "postgres")]
pub use db::PostgresProvider;
pub use diagnostics::{Diagnostic, DiagnosticSink, MemorySink, NullSink, TracingSink};
pub use error::{Error, HydrationError, Result};
pub use executor::Executor;
pub use hydrator::{ObjectType, ResultHydrator, ScalarInt, TargetShape, TupleOfColumns};
pub use template::MarkerStyle;
pub use type_table::TypeTable;
pub use types::{ConversionError, HostType, HostValue, Value};
