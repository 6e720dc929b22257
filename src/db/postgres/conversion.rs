//! Conversion between `Value` and PostgreSQL wire types.
//!
//! Handles:
//! - `Value` → PostgreSQL parameters, coerced to the type the server inferred for each `$n`
//! - PostgreSQL row cells → `Value`
//! - Native type names → the type table's vocabulary

use std::error::Error as StdError;
use std::str::FromStr;

use ::postgres::types::{to_sql_checked, IsNull, ToSql, Type};
use ::postgres::Row;
use bytes::BytesMut;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::db::DriverError;
use crate::types::{ConversionError, HostType, HostValue, Value};

type BoxError = Box<dyn StdError + Sync + Send>;

/// Map a PostgreSQL type to the name the type table knows it by.
///
/// Types without a canonical name keep their uppercased native name (`JSONB`, `UUID`, ...),
/// which callers can register themselves.
pub(super) fn declared_type_name(ty: &Type) -> String {
    let canonical = match *ty {
        Type::INT8 => "BIGINT",
        Type::INT4 | Type::INT2 => "INT",
        Type::FLOAT4 | Type::FLOAT8 | Type::NUMERIC => "DECIMAL",
        Type::BOOL => "BIT",
        Type::TIMESTAMP | Type::TIMESTAMPTZ => "TIMESTAMP",
        Type::TEXT | Type::BPCHAR | Type::NAME => "TEXT",
        Type::VARCHAR => "VARCHAR",
        _ => return ty.name().to_ascii_uppercase(),
    };
    canonical.to_string()
}

/// Decode every cell of a row.
pub(super) fn row_values(row: &Row) -> Result<Vec<Value>, DriverError> {
    (0..row.len()).map(|index| cell_value(row, index)).collect()
}

fn cell_value(row: &Row, index: usize) -> Result<Value, DriverError> {
    let ty = row.columns()[index].type_();
    let value = match *ty {
        Type::BOOL => row.try_get::<_, Option<bool>>(index)?.into(),
        Type::INT2 => row.try_get::<_, Option<i16>>(index)?.map(i32::from).into(),
        Type::INT4 => row.try_get::<_, Option<i32>>(index)?.into(),
        Type::INT8 => row.try_get::<_, Option<i64>>(index)?.into(),
        Type::FLOAT4 => row.try_get::<_, Option<f32>>(index)?.map(f64::from).into(),
        Type::FLOAT8 => row.try_get::<_, Option<f64>>(index)?.into(),
        Type::NUMERIC => match row.try_get::<_, Option<Decimal>>(index)? {
            Some(decimal) => decimal
                .to_f64()
                .map(Value::Double)
                .unwrap_or_else(|| Value::Text(decimal.to_string())),
            None => Value::Null,
        },
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME | Type::UNKNOWN => {
            row.try_get::<_, Option<String>>(index)?.into()
        }
        Type::TIMESTAMP => row.try_get::<_, Option<NaiveDateTime>>(index)?.into(),
        Type::TIMESTAMPTZ => row
            .try_get::<_, Option<DateTime<Utc>>>(index)?
            .map(|dt| dt.naive_utc())
            .into(),
        Type::DATE => row
            .try_get::<_, Option<NaiveDate>>(index)?
            .map(|d| d.and_time(NaiveTime::MIN))
            .into(),
        Type::BYTEA => row.try_get::<_, Option<Vec<u8>>>(index)?.into(),
        _ => {
            return Err(DriverError::UnsupportedType {
                type_name: ty.name().to_string(),
            });
        }
    };
    Ok(value)
}

fn to_decimal(value: &Value) -> Result<Decimal, BoxError> {
    match value {
        Value::Int(v) => Ok(Decimal::from(*v)),
        Value::BigInt(v) => Ok(Decimal::from(*v)),
        Value::Text(s) => Ok(Decimal::from_str(s.trim())?),
        other => Ok(Decimal::try_from(f64::from_value(other.clone())?)?),
    }
}

impl ToSql for Value {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
        if self.is_null() {
            return Ok(IsNull::Yes);
        }
        match *ty {
            Type::BOOL => bool::from_value(self.clone())?.to_sql(ty, out),
            Type::INT2 => {
                let wide = i64::from_value(self.clone())?;
                let narrow = i16::try_from(wide).map_err(|_| ConversionError::OutOfRange {
                    value: wide.to_string(),
                    to: HostType::Int,
                })?;
                narrow.to_sql(ty, out)
            }
            Type::INT4 => i32::from_value(self.clone())?.to_sql(ty, out),
            Type::INT8 => i64::from_value(self.clone())?.to_sql(ty, out),
            Type::FLOAT4 => (f64::from_value(self.clone())? as f32).to_sql(ty, out),
            Type::FLOAT8 => f64::from_value(self.clone())?.to_sql(ty, out),
            Type::NUMERIC => to_decimal(self)?.to_sql(ty, out),
            Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME | Type::UNKNOWN => {
                String::from_value(self.clone())?.to_sql(ty, out)
            }
            Type::TIMESTAMP => NaiveDateTime::from_value(self.clone())?.to_sql(ty, out),
            Type::TIMESTAMPTZ => NaiveDateTime::from_value(self.clone())?.and_utc().to_sql(ty, out),
            Type::DATE => NaiveDateTime::from_value(self.clone())?.date().to_sql(ty, out),
            Type::BYTEA => match self {
                Value::Bytes(bytes) => bytes.to_sql(ty, out),
                other => Err(format!("cannot bind {} as bytea", other.type_name()).into()),
            },
            _ => Err(format!("cannot bind {} to parameter of type {}", self.type_name(), ty).into()),
        }
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    to_sql_checked!();
}
