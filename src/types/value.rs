//! Runtime values exchanged with database drivers.
//!
//! `Value` is the opaque cell type flowing both ways: bound parameters on the way in, raw
//! column reads on the way out. Every driver converts its native representation into a
//! `Value`, and hydration coerces it into the host type the type table asks for.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::{ConversionError, HostType};

/// Text layout used when a timestamp is stored as a string.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

const TIMESTAMP_FORMATS: [&str; 2] = [TIMESTAMP_FORMAT, "%Y-%m-%dT%H:%M:%S%.f"];

/// A single database value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i32),
    BigInt(i64),
    Double(f64),
    Text(String),
    DateTime(NaiveDateTime),
    Bytes(Vec<u8>),
}

impl Value {
    /// Runtime type name, reported by hydration diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "i32",
            Value::BigInt(_) => "i64",
            Value::Double(_) => "f64",
            Value::Text(_) => "string",
            Value::DateTime(_) => "datetime",
            Value::Bytes(_) => "bytes",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Coerce into the representation of `target`.
    ///
    /// This is the generic typed read used for every non-temporal column: integers widen or
    /// narrow (range checked), integers become booleans when they are 0 or 1, scalars render to
    /// text and text parses back. `Null` stays `Null` whatever the target.
    pub fn coerce(self, target: HostType) -> Result<Value, ConversionError> {
        if self.is_null() {
            return Ok(Value::Null);
        }
        let from = self.type_name();
        let mismatch = || ConversionError::Mismatch { from, to: target };

        match target {
            HostType::BigInt => match self {
                Value::BigInt(v) => Ok(Value::BigInt(v)),
                Value::Int(v) => Ok(Value::BigInt(i64::from(v))),
                Value::Bool(b) => Ok(Value::BigInt(i64::from(b))),
                Value::Double(f) => integral(f, target).map(Value::BigInt),
                Value::Text(s) => parse_text(&s, target).map(Value::BigInt),
                _ => Err(mismatch()),
            },
            HostType::Int => match self {
                Value::Int(v) => Ok(Value::Int(v)),
                Value::BigInt(v) => i32::try_from(v)
                    .map(Value::Int)
                    .map_err(|_| ConversionError::OutOfRange { value: v.to_string(), to: target }),
                Value::Bool(b) => Ok(Value::Int(i32::from(b))),
                Value::Double(f) => {
                    let wide = integral(f, target)?;
                    i32::try_from(wide)
                        .map(Value::Int)
                        .map_err(|_| ConversionError::OutOfRange { value: f.to_string(), to: target })
                }
                Value::Text(s) => parse_text(&s, target).map(Value::Int),
                _ => Err(mismatch()),
            },
            HostType::Double => match self {
                Value::Double(f) => Ok(Value::Double(f)),
                Value::Int(v) => Ok(Value::Double(f64::from(v))),
                Value::BigInt(v) => Ok(Value::Double(v as f64)),
                Value::Text(s) => parse_text(&s, target).map(Value::Double),
                _ => Err(mismatch()),
            },
            HostType::Bool => match self {
                Value::Bool(b) => Ok(Value::Bool(b)),
                Value::Int(v) => int_to_bool(i64::from(v)),
                Value::BigInt(v) => int_to_bool(v),
                Value::Text(s) => match s.trim() {
                    "true" | "TRUE" | "1" => Ok(Value::Bool(true)),
                    "false" | "FALSE" | "0" => Ok(Value::Bool(false)),
                    _ => Err(ConversionError::Parse { value: s, to: target }),
                },
                _ => Err(mismatch()),
            },
            HostType::Text => match self {
                Value::Text(s) => Ok(Value::Text(s)),
                Value::Bool(b) => Ok(Value::Text(b.to_string())),
                Value::Int(v) => Ok(Value::Text(v.to_string())),
                Value::BigInt(v) => Ok(Value::Text(v.to_string())),
                Value::Double(f) => Ok(Value::Text(f.to_string())),
                Value::DateTime(dt) => Ok(Value::Text(dt.format(TIMESTAMP_FORMAT).to_string())),
                _ => Err(mismatch()),
            },
            HostType::DateTime => self.into_timestamp().map(|ts| match ts {
                Some(dt) => Value::DateTime(dt),
                None => Value::Null,
            }),
        }
    }

    /// Read through the timestamp accessor path.
    ///
    /// Accepts native timestamps, ISO-8601 text (with either a space or `T` separator, or a
    /// bare date) and integer epoch seconds.
    pub fn into_timestamp(self) -> Result<Option<NaiveDateTime>, ConversionError> {
        match self {
            Value::Null => Ok(None),
            Value::DateTime(dt) => Ok(Some(dt)),
            Value::Text(s) => parse_timestamp(&s).map(Some),
            Value::BigInt(secs) => epoch_seconds(secs).map(Some),
            Value::Int(secs) => epoch_seconds(i64::from(secs)).map(Some),
            other => Err(ConversionError::Mismatch {
                from: other.type_name(),
                to: HostType::DateTime,
            }),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(v) => write!(f, "{}", v),
            Value::BigInt(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::Text(s) => write!(f, "{}", s),
            Value::DateTime(dt) => write!(f, "{}", dt.format(TIMESTAMP_FORMAT)),
            Value::Bytes(b) => write!(f, "0x{}", hex::encode(b)),
        }
    }
}

/// Parse a timestamp stored as text.
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime, ConversionError> {
    let text = text.trim();
    for format in TIMESTAMP_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| ConversionError::Parse {
            value: text.to_string(),
            to: HostType::DateTime,
        })
}

fn epoch_seconds(secs: i64) -> Result<NaiveDateTime, ConversionError> {
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.naive_utc())
        .ok_or(ConversionError::OutOfRange {
            value: secs.to_string(),
            to: HostType::DateTime,
        })
}

fn integral(f: f64, to: HostType) -> Result<i64, ConversionError> {
    if f.fract() != 0.0 || !f.is_finite() || f < i64::MIN as f64 || f >= i64::MAX as f64 {
        return Err(ConversionError::OutOfRange { value: f.to_string(), to });
    }
    Ok(f as i64)
}

fn int_to_bool(v: i64) -> Result<Value, ConversionError> {
    match v {
        0 => Ok(Value::Bool(false)),
        1 => Ok(Value::Bool(true)),
        _ => Err(ConversionError::OutOfRange {
            value: v.to_string(),
            to: HostType::Bool,
        }),
    }
}

fn parse_text<T: std::str::FromStr>(text: &str, to: HostType) -> Result<T, ConversionError> {
    text.trim().parse().map_err(|_| ConversionError::Parse {
        value: text.to_string(),
        to,
    })
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::BigInt(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
