//! Host value types and conversions shared by binding and hydration.

mod host;
mod value;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use host::HostValue;
pub use value::{parse_timestamp, Value, TIMESTAMP_FORMAT};

/// Host-side type a database column is coerced into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostType {
    /// 64-bit integer (`i64`)
    BigInt,
    /// 32-bit integer (`i32`)
    Int,
    /// String
    Text,
    /// Date-time (`chrono::NaiveDateTime`)
    DateTime,
    /// Double-precision float (`f64`)
    Double,
    /// Boolean
    Bool,
}

impl HostType {
    /// Temporal columns are always read through the timestamp accessor.
    pub fn is_temporal(self) -> bool {
        matches!(self, HostType::DateTime)
    }

    pub fn name(self) -> &'static str {
        match self {
            HostType::BigInt => "i64",
            HostType::Int => "i32",
            HostType::Text => "String",
            HostType::DateTime => "NaiveDateTime",
            HostType::Double => "f64",
            HostType::Bool => "bool",
        }
    }
}

impl fmt::Display for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value could not be represented as the requested host type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("cannot convert {from} to {to}")]
    Mismatch { from: &'static str, to: HostType },

    #[error("value {value} is out of range for {to}")]
    OutOfRange { value: String, to: HostType },

    #[error("cannot parse '{value}' as {to}")]
    Parse { value: String, to: HostType },

    #[error("null is not allowed for {to}")]
    UnexpectedNull { to: HostType },
}
