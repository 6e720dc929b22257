//! Named field access on arbitrary objects.
//!
//! Parameter binding reads fields through accessors and hydration writes them through
//! mutators. Both are addressed by conventional names derived from a field or column name:
//! `get` / `set` followed by the name with its first character upper-cased, so the token
//! `#{userName}` reads `getUserName` and the column `user_name` writes `setUser_name`.
//!
//! Types opt in by implementing [`FieldAccessible`], usually through the
//! [`field_access!`](crate::field_access) macro. [`MapSource`] is a ready-made implementation
//! backed by a name/value map.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::types::{ConversionError, HostType, Value};

pub const ACCESSOR_PREFIX: &str = "get";
pub const MUTATOR_PREFIX: &str = "set";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AccessError {
    #[error("no such method '{name}'")]
    NoSuchMethod { name: String },

    #[error("method '{name}' is not accessible")]
    Inaccessible { name: String },

    #[error("method '{name}' failed: {message}")]
    Invocation { name: String, message: String },

    #[error("no source object to read '{name}' from")]
    NullSource { name: String },

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// Accessor/mutator capability of a bindable or hydratable type.
pub trait FieldAccessible {
    /// Invoke the accessor named `accessor` (e.g. `getUserName`).
    fn get(&self, accessor: &str) -> Result<Value, AccessError>;

    /// Invoke the mutator named `mutator` (e.g. `setUser_name`) with an already coerced value.
    fn set(&mut self, mutator: &str, value: Value) -> Result<(), AccessError>;

    /// Parameter type accepted by the mutator named `mutator`, if the type exposes one.
    fn mutator_type(mutator: &str) -> Option<HostType>
    where
        Self: Sized;

    /// Zero-argument construction of a fresh instance for hydration.
    fn instantiate() -> Result<Self, AccessError>
    where
        Self: Sized;
}

/// `getUserName` for `userName`.
pub fn accessor_name(field: &str) -> String {
    conventional_name(ACCESSOR_PREFIX, field)
}

/// `setUser_name` for `user_name`.
pub fn mutator_name(field: &str) -> String {
    conventional_name(MUTATOR_PREFIX, field)
}

fn conventional_name(prefix: &str, field: &str) -> String {
    let mut chars = field.chars();
    let mut name = String::with_capacity(prefix.len() + field.len());
    name.push_str(prefix);
    if let Some(first) = chars.next() {
        name.extend(first.to_uppercase());
        name.push_str(chars.as_str());
    }
    name
}

/// Whether `method` is the conventional `prefix` method for `field`, without allocating.
pub fn is_conventional_name(prefix: &str, field: &str, method: &str) -> bool {
    let Some(rest) = method.strip_prefix(prefix) else {
        return false;
    };
    let mut expected = field.chars();
    let mut actual = rest.chars();
    match (expected.next(), actual.next()) {
        (Some(e), Some(a)) => e.to_uppercase().eq(std::iter::once(a)) && expected.as_str() == actual.as_str(),
        (None, None) => true,
        _ => false,
    }
}

/// Implement [`FieldAccessible`] for a struct with a `Default` impl.
///
/// Every listed field gets a conventional accessor and a mutator typed by its
/// [`HostValue`](crate::HostValue) type. Unlisted fields are invisible to binding and
/// hydration.
///
/// ```
/// use rowbind::field_access;
///
/// #[derive(Debug, Default)]
/// struct User {
///     id: i64,
///     name: String,
///     email: Option<String>,
/// }
///
/// field_access!(User { id: i64, name: String, email: Option<String> });
/// ```
#[macro_export]
macro_rules! field_access {
    ($target:ty { $($field:ident : $fty:ty),* $(,)? }) => {
        impl $crate::FieldAccessible for $target {
            fn get(&self, accessor: &str) -> ::std::result::Result<$crate::Value, $crate::AccessError> {
                $(
                    if $crate::access::is_conventional_name(
                        $crate::access::ACCESSOR_PREFIX,
                        stringify!($field),
                        accessor,
                    ) {
                        return Ok($crate::Value::from(self.$field.clone()));
                    }
                )*
                Err($crate::AccessError::NoSuchMethod { name: accessor.to_string() })
            }

            fn set(
                &mut self,
                mutator: &str,
                value: $crate::Value,
            ) -> ::std::result::Result<(), $crate::AccessError> {
                $(
                    if $crate::access::is_conventional_name(
                        $crate::access::MUTATOR_PREFIX,
                        stringify!($field),
                        mutator,
                    ) {
                        self.$field = <$fty as $crate::HostValue>::from_value(value)?;
                        return Ok(());
                    }
                )*
                let _ = value;
                Err($crate::AccessError::NoSuchMethod { name: mutator.to_string() })
            }

            fn mutator_type(mutator: &str) -> ::std::option::Option<$crate::HostType> {
                $(
                    if $crate::access::is_conventional_name(
                        $crate::access::MUTATOR_PREFIX,
                        stringify!($field),
                        mutator,
                    ) {
                        return Some(<$fty as $crate::HostValue>::HOST_TYPE);
                    }
                )*
                None
            }

            fn instantiate() -> ::std::result::Result<Self, $crate::AccessError> {
                Ok(<$target as ::std::default::Default>::default())
            }
        }
    };
}

/// A bindable source backed by a name/value map.
///
/// Accessor `getX` reads entry `x` (or `X`). Useful when the parameters do not live on a
/// struct, e.g. values parsed from the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapSource {
    values: BTreeMap<String, Value>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get_value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn find(&self, prefix: &str, method: &str) -> Option<&String> {
        self.values
            .keys()
            .find(|name| is_conventional_name(prefix, name, method))
    }
}

impl FieldAccessible for MapSource {
    fn get(&self, accessor: &str) -> Result<Value, AccessError> {
        self.find(ACCESSOR_PREFIX, accessor)
            .and_then(|name| self.values.get(name))
            .cloned()
            .ok_or_else(|| AccessError::NoSuchMethod {
                name: accessor.to_string(),
            })
    }

    fn set(&mut self, mutator: &str, value: Value) -> Result<(), AccessError> {
        let name = match self.find(MUTATOR_PREFIX, mutator) {
            Some(name) => name.clone(),
            None => {
                let field = mutator.strip_prefix(MUTATOR_PREFIX).unwrap_or(mutator);
                lower_first(field)
            }
        };
        self.values.insert(name, value);
        Ok(())
    }

    fn mutator_type(_mutator: &str) -> Option<HostType> {
        None
    }

    fn instantiate() -> Result<Self, AccessError> {
        Ok(Self::new())
    }
}

fn lower_first(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
