//! Database drivers and connection scoping.
//!
//! This module provides everything the executors need from a database:
//! - Driver traits (`ConnectionProvider`, `Connection`, `Statement`, `ResultSet`)
//! - A `Session` that opens one connection lazily and closes it explicitly
//! - SQLite (always available) and PostgreSQL (`postgres` feature) drivers
//! - Runtime backend selection from URLs, environment and config files
//!
//! # Architecture
//!
//! Drivers buffer query results and expose them through `BufferedResultSet`, so hydration
//! sees one forward-only cursor regardless of backend. Values cross the driver boundary as
//! `Value`; each driver converts its native types at the edge.

mod backend;
mod config;
mod connection;
#[cfg(feature = "postgres")]
mod postgres;
mod result;
mod sqlite;

pub use backend::{ColumnDescriptor, Connection, ConnectionProvider, ResultSet, Statement};
pub(crate) use backend::place_parameter;
pub use config::DatabaseConfig;
pub use connection::Session;
#[cfg(feature = "postgres")]
pub use postgres::PostgresProvider;
pub use result::BufferedResultSet;
pub use sqlite::SqliteProvider;

use thiserror::Error;

use crate::types::ConversionError;

/// Database driver error types
#[derive(Error, Debug)]
pub enum DriverError {
    #[error("Failed to open database '{target}': {message}")]
    OpenFailed { target: String, message: String },

    #[error("Connection is closed")]
    Closed,

    #[error("Parameter position {position} is out of range (positions start at 1)")]
    ParameterOutOfRange { position: usize },

    #[error("Column index {index} is out of range ({count} columns)")]
    ColumnOutOfRange { index: usize, count: usize },

    #[error("No current row; call next() first")]
    NoCurrentRow,

    #[error("Column {index}: {source}")]
    Conversion {
        index: usize,
        #[source]
        source: ConversionError,
    },

    #[error("Unsupported column type '{type_name}'")]
    UnsupportedType { type_name: String },

    #[error("SQLite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[cfg(feature = "postgres")]
    #[error("PostgreSQL: {0}")]
    Postgres(#[from] ::postgres::Error),

    #[error("{message}")]
    Other { message: String },
}
