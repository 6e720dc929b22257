//! Mapping between Rust field types and host types.

use chrono::NaiveDateTime;

use super::{ConversionError, HostType, Value};

/// A Rust type that can receive a hydrated column value.
///
/// `HOST_TYPE` is the parameter type a mutator for a field of this type accepts; the row plan
/// only binds a column to a mutator when the type table maps the column to exactly this type.
pub trait HostValue: Sized {
    const HOST_TYPE: HostType;

    /// Build the field value from a (possibly not yet coerced) column value.
    fn from_value(value: Value) -> Result<Self, ConversionError>;
}

macro_rules! host_value {
    ($ty:ty, $host:ident, $variant:ident) => {
        impl HostValue for $ty {
            const HOST_TYPE: HostType = HostType::$host;

            fn from_value(value: Value) -> Result<Self, ConversionError> {
                match value.coerce(HostType::$host)? {
                    Value::$variant(v) => Ok(v),
                    Value::Null => Err(ConversionError::UnexpectedNull { to: HostType::$host }),
                    other => Err(ConversionError::Mismatch {
                        from: other.type_name(),
                        to: HostType::$host,
                    }),
                }
            }
        }
    };
}

host_value!(i64, BigInt, BigInt);
host_value!(i32, Int, Int);
host_value!(f64, Double, Double);
host_value!(bool, Bool, Bool);
host_value!(String, Text, Text);
host_value!(NaiveDateTime, DateTime, DateTime);

impl<T: HostValue> HostValue for Option<T> {
    const HOST_TYPE: HostType = T::HOST_TYPE;

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_host_types() {
        assert_eq!(<i64 as HostValue>::HOST_TYPE, HostType::BigInt);
        assert_eq!(<Option<String> as HostValue>::HOST_TYPE, HostType::Text);
        assert_eq!(<Option<NaiveDateTime> as HostValue>::HOST_TYPE, HostType::DateTime);
    }

    #[rstest]
    fn test_from_value_coerces() {
        assert_eq!(i32::from_value(Value::BigInt(12)), Ok(12));
        assert_eq!(bool::from_value(Value::BigInt(1)), Ok(true));
        assert_eq!(String::from_value(Value::Text("ann".into())), Ok("ann".to_string()));
    }

    #[rstest]
    fn test_null_into_required_field_fails() {
        assert_eq!(
            i64::from_value(Value::Null),
            Err(ConversionError::UnexpectedNull { to: HostType::BigInt })
        );
    }

    #[rstest]
    fn test_null_into_optional_field() {
        assert_eq!(Option::<i64>::from_value(Value::Null), Ok(None));
        assert_eq!(Option::<i64>::from_value(Value::BigInt(3)), Ok(Some(3)));
    }
}
