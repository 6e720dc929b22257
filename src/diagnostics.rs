//! Diagnostic side channel.
//!
//! Object-form binding reports the rewritten SQL with its resolved values, object hydration
//! reports every mutator call, and executors report failed statements once before returning
//! the error. Callers that keep audit trails plug in their own [`DiagnosticSink`].

use std::sync::Mutex;

use crate::types::{HostType, Value};

pub const DIAGNOSTICS_TARGET: &str = "rowbind::diagnostics";

#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A template was bound against a source object.
    Bound { sql: String, values: Vec<Value> },

    /// A row-plan mutator is about to receive a column value.
    MutatorInvoked {
        mutator: String,
        expected: HostType,
        raw_type: &'static str,
    },

    /// A column has no mutator accepting its mapped type and will be skipped.
    MutatorUnresolved {
        column: String,
        mutator: String,
        expected: Option<HostType>,
    },

    /// A statement failed in the driver.
    ExecutionFailed { sql: String, message: String },
}

pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, diagnostic: &Diagnostic);
}

/// Forwards diagnostics to `tracing` under the `rowbind::diagnostics` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::Bound { sql, values } => {
                tracing::debug!(target: DIAGNOSTICS_TARGET, %sql, params = ?values, "bound template");
            }
            Diagnostic::MutatorInvoked { mutator, expected, raw_type } => {
                tracing::trace!(target: DIAGNOSTICS_TARGET, %mutator, %expected, raw_type, "invoking mutator");
            }
            Diagnostic::MutatorUnresolved { column, mutator, expected } => {
                tracing::debug!(target: DIAGNOSTICS_TARGET, %column, %mutator, expected = ?expected, "no mutator, column skipped");
            }
            Diagnostic::ExecutionFailed { sql, message } => {
                tracing::error!(target: DIAGNOSTICS_TARGET, %sql, error = %message, "statement failed");
            }
        }
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&self, _diagnostic: &Diagnostic) {}
}

/// Collects diagnostics in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far.
    pub fn events(&self) -> Vec<Diagnostic> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, diagnostic: &Diagnostic) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(diagnostic.clone());
    }
}
