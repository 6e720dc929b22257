//! Error types reported to callers, one variant per phase.

use thiserror::Error;

use crate::access::AccessError;
use crate::db::DriverError;
use crate::types::ConversionError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed template at byte {position}: {reason}")]
    MalformedTemplate { position: usize, reason: String },

    #[error("Cannot bind placeholder #{{{token}}}: {source}")]
    Binding {
        token: String,
        #[source]
        source: AccessError,
    },

    #[error("Execution failed: {0}")]
    Execution(#[from] DriverError),

    #[error("Hydration failed: {0}")]
    Hydration(#[from] HydrationError),
}

#[derive(Error, Debug)]
pub enum HydrationError {
    #[error("cannot instantiate target type: {0}")]
    Instantiate(AccessError),

    #[error("column '{column}' has declared type {declared_type:?} with no type mapping")]
    UnmappedType {
        column: String,
        declared_type: Option<String>,
    },

    #[error("column '{column}': {source}")]
    Conversion {
        column: String,
        #[source]
        source: ConversionError,
    },

    #[error("mutator {mutator} failed for column '{column}': {source}")]
    Mutator {
        mutator: String,
        column: String,
        #[source]
        source: AccessError,
    },

    #[error("result set has no columns")]
    NoColumns,
}
