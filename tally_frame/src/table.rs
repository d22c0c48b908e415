// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owned columnar record tables.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use crate::value::Value;

/// Errors returned when building or querying a [`RecordTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// The requested column is not present in the table.
    ColumnNotFound(String),
    /// The table has zero rows; percent-of-total is undefined.
    EmptyTable,
    /// The column list is empty.
    EmptyColumns,
    /// A column's length differs from the first column's length.
    LengthMismatch {
        /// Name of the offending column.
        column: String,
        /// Row count of the first column.
        expected: usize,
        /// Row count of the offending column.
        got: usize,
    },
}

/// A named column of values.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: Vec<Value>,
}

impl Column {
    /// Creates a column from owned values.
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Creates a string column.
    pub fn from_strs<'a>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self::new(name, values.into_iter().map(Value::from).collect())
    }

    /// Creates a numeric column.
    pub fn from_nums(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self::new(name, values.into_iter().map(Value::from).collect())
    }

    /// Creates a boolean column.
    pub fn from_bools(name: impl Into<String>, values: impl IntoIterator<Item = bool>) -> Self {
        Self::new(name, values.into_iter().map(Value::from).collect())
    }

    /// Creates a timestamp column from epoch seconds.
    pub fn from_times(name: impl Into<String>, values: impl IntoIterator<Item = i64>) -> Self {
        Self::new(name, values.into_iter().map(Value::Time).collect())
    }

    /// Returns the column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the values in row order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Returns the value at `row`, if in range.
    pub fn get(&self, row: usize) -> Option<&Value> {
        self.values.get(row)
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// An owned columnar table: named columns of equal length.
///
/// Tables are immutable once built. Downstream summaries and charts read
/// them but never mutate them.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordTable {
    columns: Vec<Column>,
}

impl RecordTable {
    /// Builds a table, validating that the column list is non-empty and all
    /// columns have the same length.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self, FrameError> {
        let Some(first) = columns.first() else {
            return Err(FrameError::EmptyColumns);
        };
        let expected = first.len();
        for col in &columns[1..] {
            if col.len() != expected {
                return Err(FrameError::LengthMismatch {
                    column: String::from(col.name()),
                    expected,
                    got: col.len(),
                });
            }
        }
        Ok(Self { columns })
    }

    /// Returns the number of rows.
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Returns the columns in declaration order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Looks up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Looks up a column by name, failing with [`FrameError::ColumnNotFound`].
    pub fn require_column(&self, name: &str) -> Result<&Column, FrameError> {
        self.column(name)
            .ok_or_else(|| FrameError::ColumnNotFound(String::from(name)))
    }

    /// Returns the value at `(row, column)`, if both exist.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        self.column(column)?.get(row)
    }
}
