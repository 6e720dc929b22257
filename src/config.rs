//! Configuration file handling.
//!
//! This module provides loading and parsing of `.rowbind.json` configuration files:
//! the database backend, extra type-table entries and the diagnostics sink.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::DatabaseConfig;
use crate::diagnostics::{DiagnosticSink, NullSink, TracingSink};
use crate::type_table::TypeTable;
use crate::types::HostType;

/// Name of the configuration file looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = ".rowbind.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Database configuration
    pub database: DatabaseConfigFile,

    /// Extra type-table entries, e.g. `"SMALLINT": "int"`
    #[serde(default)]
    pub types: BTreeMap<String, HostType>,

    #[serde(default)]
    pub diagnostics: DiagnosticsMode,
}

/// Database configuration variants for different backends.
///
/// JSON format uses a "type" field with lowercase variant names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DatabaseConfigFile {
    /// SQLite backend with file path
    Sqlite { path: PathBuf },
    /// In-memory SQLite database
    Memory,
    /// PostgreSQL backend
    Postgres { connection_string: String },
}

/// Where diagnostic events go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticsMode {
    #[default]
    Tracing,
    Off,
}

impl DiagnosticsMode {
    pub fn sink(self) -> Arc<dyn DiagnosticSink> {
        match self {
            Self::Tracing => Arc::new(TracingSink),
            Self::Off => Arc::new(NullSink),
        }
    }
}

impl ConfigFile {
    /// Load configuration from `.rowbind.json` in the current directory.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_FILE_NAME))
    }

    /// Load configuration from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file doesn't exist
    /// - The file cannot be read
    /// - The JSON is invalid or required fields are missing
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Register the file's extra type entries.
    pub fn apply_types(&self, table: &TypeTable) {
        for (name, host_type) in &self.types {
            table.add_type(name, *host_type);
        }
    }
}

impl DatabaseConfigFile {
    /// Convert this configuration to a DatabaseConfig.
    pub fn to_database_config(&self) -> DatabaseConfig {
        match self {
            Self::Sqlite { path } => DatabaseConfig::Sqlite { path: path.clone() },
            Self::Memory => DatabaseConfig::Memory,
            Self::Postgres { connection_string } => DatabaseConfig::Postgres {
                connection_string: connection_string.clone(),
            },
        }
    }
}
