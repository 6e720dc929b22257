//! Mapping from database column type names to host types.
//!
//! The table is read on every hydration and written rarely (startup configuration, or a
//! caller registering a vendor-specific type), so it sits behind an `RwLock`. A process-wide
//! instance seeded with the defaults is available through [`TypeTable::global`]; executors
//! can also be handed a private table.

use std::collections::BTreeMap;
use std::sync::{OnceLock, RwLock};

use crate::types::HostType;

const DEFAULT_TYPES: [(&str, HostType); 9] = [
    ("BIGINT", HostType::BigInt),
    ("INT", HostType::Int),
    ("VARCHAR", HostType::Text),
    ("TEXT", HostType::Text),
    ("DATETIME", HostType::DateTime),
    ("DECIMAL", HostType::Double),
    ("TINYINT", HostType::Int),
    ("BIT", HostType::Bool),
    ("TIMESTAMP", HostType::DateTime),
];

#[derive(Debug)]
pub struct TypeTable {
    entries: RwLock<BTreeMap<String, HostType>>,
}

impl TypeTable {
    /// An empty table. Every lookup misses until entries are added.
    pub fn empty() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// A table seeded with the default column types.
    pub fn with_defaults() -> Self {
        let entries = DEFAULT_TYPES
            .iter()
            .map(|(name, ty)| (name.to_string(), *ty))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// The process-wide table, seeded with the defaults on first use.
    pub fn global() -> &'static TypeTable {
        static GLOBAL: OnceLock<TypeTable> = OnceLock::new();
        GLOBAL.get_or_init(TypeTable::with_defaults)
    }

    /// Register (or replace) the host type for a column type.
    pub fn add_type(&self, column_type: &str, host_type: HostType) {
        let key = normalize_type_name(column_type);
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.insert(key, host_type);
    }

    /// Look up the host type for a declared column type. `None` is a mapping failure.
    pub fn host_type(&self, column_type: &str) -> Option<HostType> {
        let key = normalize_type_name(column_type);
        let entries = self
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.get(&key).copied()
    }

    /// Snapshot of all entries, ordered by column type name.
    pub fn entries(&self) -> Vec<(String, HostType)> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.iter().map(|(k, v)| (k.clone(), *v)).collect()
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Normalize a declared column type: trim, drop a `(len)` / `(p,s)` suffix, upper-case.
///
/// `varchar(64)` and `VARCHAR` both resolve to `VARCHAR`.
pub fn normalize_type_name(column_type: &str) -> String {
    let base = match column_type.find('(') {
        Some(idx) => &column_type[..idx],
        None => column_type,
    };
    base.trim().to_ascii_uppercase()
}
