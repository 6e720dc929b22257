//! Database connection management.

use std::sync::Arc;

use super::backend::{Connection, ConnectionProvider};
use super::DriverError;
use crate::template::MarkerStyle;

/// A caller-owned connection scope.
///
/// The connection is opened on first use and reused by every call made through this
/// session; it is reopened if the driver reports it closed. Sessions are not shared between
/// threads: each thread (or task) creates its own from a shared provider.
pub struct Session {
    provider: Arc<dyn ConnectionProvider>,
    connection: Option<Box<dyn Connection>>,
}

impl Session {
    pub fn new(provider: Arc<dyn ConnectionProvider>) -> Self {
        Self {
            provider,
            connection: None,
        }
    }

    /// The session's connection, opening it if needed.
    pub fn connection(&mut self) -> Result<&mut (dyn Connection + 'static), DriverError> {
        if self.connection.as_ref().is_none_or(|c| c.is_closed()) {
            tracing::debug!(backend = self.provider.backend_name(), "opening connection");
            self.connection = Some(self.provider.connect()?);
        }
        match self.connection.as_deref_mut() {
            Some(connection) => Ok(connection),
            None => Err(DriverError::Closed),
        }
    }

    /// Whether a live connection is currently held.
    pub fn is_open(&self) -> bool {
        self.connection.as_ref().is_some_and(|c| !c.is_closed())
    }

    /// Close the held connection, if any. The next call opens a fresh one.
    pub fn close(&mut self) -> Result<(), DriverError> {
        match self.connection.take() {
            Some(mut connection) => {
                tracing::debug!(backend = self.provider.backend_name(), "closing connection");
                connection.close()
            }
            None => Ok(()),
        }
    }

    pub fn marker_style(&self) -> MarkerStyle {
        self.provider.marker_style()
    }

    pub fn backend_name(&self) -> &'static str {
        self.provider.backend_name()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("backend", &self.provider.backend_name())
            .field("open", &self.is_open())
            .finish()
    }
}
