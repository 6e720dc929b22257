//! Result hydration into objects, tuples and scalar integers.
//!
//! Column metadata is read once per result set and turned into a [`RowPlan`]: for every
//! column, the host type its declared type maps to and, for object targets, the mutator that
//! receives it. Rows are then materialized eagerly; a failure on any row fails the whole call.

use std::fmt;
use std::marker::PhantomData;

use crate::access::{mutator_name, FieldAccessible};
use crate::db::{ColumnDescriptor, DriverError, ResultSet};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::{HydrationError, Result};
use crate::type_table::TypeTable;
use crate::types::{ConversionError, HostType, HostValue, Value};

/// Something a result set can be hydrated into.
pub trait TargetShape {
    type Output;

    fn hydrate(&self, hydrator: &ResultHydrator<'_>, rows: &mut dyn ResultSet) -> Result<Vec<Self::Output>>;
}

/// First column of every row as an `i32`. SQL NULL reads as 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarInt;

/// Every row as its column values, each coerced to the column's mapped host type.
#[derive(Debug, Clone, Copy, Default)]
pub struct TupleOfColumns;

/// Every row as a fresh `T`, filled through its mutators.
pub struct ObjectType<T>(PhantomData<fn() -> T>);

impl<T> ObjectType<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for ObjectType<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ObjectType<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ObjectType<T> {}

impl<T> fmt::Debug for ObjectType<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectType<{}>", std::any::type_name::<T>())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedColumn {
    pub index: usize,
    pub label: String,
    pub host_type: HostType,
    /// `None` when the column is skipped.
    pub mutator: Option<String>,
}

/// Per-column reading plan, built once per result set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowPlan {
    pub columns: Vec<PlannedColumn>,
}

impl RowPlan {
    /// Plan for tuple hydration: every column must have a type mapping.
    pub fn for_tuple(columns: &[ColumnDescriptor], types: &TypeTable) -> Result<Self> {
        let columns = columns
            .iter()
            .enumerate()
            .map(|(index, column)| -> Result<PlannedColumn> {
                Ok(PlannedColumn {
                    index,
                    label: column.label.clone(),
                    host_type: mapped_type(column, types)?,
                    mutator: None,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { columns })
    }

    /// Plan for object hydration into `T`.
    ///
    /// A column is bound to `set<Label>` only when `T` has that mutator and it accepts
    /// exactly the column's mapped type; otherwise the column is skipped for every row. A
    /// column without a type mapping fails the plan only if `T` has a mutator for it.
    pub fn for_object<T: FieldAccessible>(
        columns: &[ColumnDescriptor],
        types: &TypeTable,
        sink: &dyn DiagnosticSink,
    ) -> Result<Self> {
        let mut planned = Vec::with_capacity(columns.len());
        for (index, column) in columns.iter().enumerate() {
            let mutator = mutator_name(&column.label);
            let accepted = T::mutator_type(&mutator);
            let mapped = column
                .declared_type
                .as_deref()
                .and_then(|name| types.host_type(name));

            match (accepted, mapped) {
                (Some(_), None) => return Err(unmapped(column).into()),
                (Some(accepted), Some(host_type)) if accepted == host_type => {
                    planned.push(PlannedColumn {
                        index,
                        label: column.label.clone(),
                        host_type,
                        mutator: Some(mutator),
                    });
                }
                (_, mapped) => {
                    sink.emit(&Diagnostic::MutatorUnresolved {
                        column: column.label.clone(),
                        mutator,
                        expected: mapped,
                    });
                }
            }
        }
        Ok(Self { columns: planned })
    }
}

fn unmapped(column: &ColumnDescriptor) -> HydrationError {
    HydrationError::UnmappedType {
        column: column.label.clone(),
        declared_type: column.declared_type.clone(),
    }
}

fn mapped_type(column: &ColumnDescriptor, types: &TypeTable) -> Result<HostType> {
    column
        .declared_type
        .as_deref()
        .and_then(|name| types.host_type(name))
        .ok_or_else(|| unmapped(column).into())
}

/// Turns result sets into host values using a type table.
pub struct ResultHydrator<'a> {
    types: &'a TypeTable,
    sink: &'a dyn DiagnosticSink,
}

impl<'a> ResultHydrator<'a> {
    pub fn new(types: &'a TypeTable, sink: &'a dyn DiagnosticSink) -> Self {
        Self { types, sink }
    }

    pub fn hydrate<S: TargetShape>(&self, rows: &mut dyn ResultSet, shape: &S) -> Result<Vec<S::Output>> {
        shape.hydrate(self, rows)
    }

    pub fn scalar_ints(&self, rows: &mut dyn ResultSet) -> Result<Vec<i32>> {
        let label = match rows.columns().first() {
            Some(column) => column.label.clone(),
            None => return Err(HydrationError::NoColumns.into()),
        };

        let mut out = Vec::new();
        while rows.next()? {
            let value = match rows.value(0)? {
                Value::Null => 0,
                raw => i32::from_value(raw).map_err(|source| HydrationError::Conversion {
                    column: label.clone(),
                    source,
                })?,
            };
            out.push(value);
        }
        Ok(out)
    }

    pub fn tuples(&self, rows: &mut dyn ResultSet) -> Result<Vec<Vec<Value>>> {
        let plan = RowPlan::for_tuple(rows.columns(), self.types)?;

        let mut out = Vec::new();
        while rows.next()? {
            let tuple = plan
                .columns
                .iter()
                .map(|column| read_column(rows, column))
                .collect::<Result<Vec<_>>>()?;
            out.push(tuple);
        }
        Ok(out)
    }

    pub fn objects<T: FieldAccessible>(&self, rows: &mut dyn ResultSet) -> Result<Vec<T>> {
        let plan = RowPlan::for_object::<T>(rows.columns(), self.types, self.sink)?;

        let mut out = Vec::new();
        while rows.next()? {
            let mut target = T::instantiate().map_err(HydrationError::Instantiate)?;
            for column in &plan.columns {
                let Some(mutator) = column.mutator.as_deref() else {
                    continue;
                };
                let raw_type = rows.value(column.index)?.type_name();
                self.sink.emit(&Diagnostic::MutatorInvoked {
                    mutator: mutator.to_string(),
                    expected: column.host_type,
                    raw_type,
                });

                let value = read_column(rows, column)?;
                target.set(mutator, value).map_err(|source| HydrationError::Mutator {
                    mutator: mutator.to_string(),
                    column: column.label.clone(),
                    source,
                })?;
            }
            out.push(target);
        }
        Ok(out)
    }
}

/// Read one column of the current row as its planned host type.
///
/// Temporal columns always go through the timestamp accessor.
fn read_column(rows: &dyn ResultSet, column: &PlannedColumn) -> Result<Value> {
    let conversion = |source: ConversionError| HydrationError::Conversion {
        column: column.label.clone(),
        source,
    };

    if column.host_type.is_temporal() {
        return match rows.timestamp(column.index) {
            Ok(timestamp) => Ok(Value::from(timestamp)),
            Err(DriverError::Conversion { source, .. }) => Err(conversion(source).into()),
            Err(e) => Err(e.into()),
        };
    }

    let raw = rows.value(column.index)?;
    Ok(raw.coerce(column.host_type).map_err(conversion)?)
}

impl TargetShape for ScalarInt {
    type Output = i32;

    fn hydrate(&self, hydrator: &ResultHydrator<'_>, rows: &mut dyn ResultSet) -> Result<Vec<i32>> {
        hydrator.scalar_ints(rows)
    }
}

impl TargetShape for TupleOfColumns {
    type Output = Vec<Value>;

    fn hydrate(&self, hydrator: &ResultHydrator<'_>, rows: &mut dyn ResultSet) -> Result<Vec<Vec<Value>>> {
        hydrator.tuples(rows)
    }
}

impl<T: FieldAccessible> TargetShape for ObjectType<T> {
    type Output = T;

    fn hydrate(&self, hydrator: &ResultHydrator<'_>, rows: &mut dyn ResultSet) -> Result<Vec<T>> {
        hydrator.objects(rows)
    }
}
