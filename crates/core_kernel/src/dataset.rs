//! Column-oriented in-memory dataset
//!
//! A [`Dataset`] is an ordered list of named, equally long columns. Columns are
//! typed once, on load, and only change type through categorical casting.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::categorical::CategoricalColumn;
use crate::error::CoreError;
use crate::format::format_number;

/// The type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Real-valued column
    Numeric,
    /// Free text column
    Text,
    /// Label column with a fixed level set
    Categorical,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Text => "text",
            ColumnKind::Categorical => "categorical",
        };
        f.pad(name)
    }
}

/// Values of a single column; `None` marks a missing value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
    Categorical(CategoricalColumn),
}

impl ColumnData {
    /// Returns the column type
    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnData::Numeric(_) => ColumnKind::Numeric,
            ColumnData::Text(_) => ColumnKind::Text,
            ColumnData::Categorical(_) => ColumnKind::Categorical,
        }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Text(v) => v.len(),
            ColumnData::Categorical(c) => c.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Renders the value at `row` as text, `None` when missing
    ///
    /// Categorical values render as their original label and numbers in their
    /// shortest round-trip form.
    pub fn render(&self, row: usize) -> Option<String> {
        match self {
            ColumnData::Numeric(v) => v[row].map(format_number),
            ColumnData::Text(v) => v[row].clone(),
            ColumnData::Categorical(c) => c.label(row).map(str::to_string),
        }
    }

    /// Casts to a categorical column
    ///
    /// Casting is idempotent: a categorical column is returned unchanged.
    pub fn to_categorical(&self) -> ColumnData {
        match self {
            ColumnData::Categorical(c) => ColumnData::Categorical(c.clone()),
            ColumnData::Text(v) => ColumnData::Categorical(CategoricalColumn::from_labels(
                v.iter().map(|s| s.as_deref()),
            )),
            ColumnData::Numeric(v) => ColumnData::Categorical(CategoricalColumn::from_labels(
                v.iter().map(|x| x.map(format_number)),
            )),
        }
    }

    fn select(&self, rows: &[usize]) -> ColumnData {
        match self {
            ColumnData::Numeric(v) => ColumnData::Numeric(rows.iter().map(|&r| v[r]).collect()),
            ColumnData::Text(v) => ColumnData::Text(rows.iter().map(|&r| v[r].clone()).collect()),
            ColumnData::Categorical(c) => ColumnData::Categorical(c.select(rows)),
        }
    }
}

/// A named column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    /// Creates a new column
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Creates a numeric column
    pub fn numeric(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self::new(name, ColumnData::Numeric(values))
    }

    /// Creates a text column
    pub fn text(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self::new(name, ColumnData::Text(values))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn kind(&self) -> ColumnKind {
        self.data.kind()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the same column cast to categorical
    pub fn to_categorical(&self) -> Column {
        Column::new(self.name.clone(), self.data.to_categorical())
    }
}

/// An ordered collection of equally long named columns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Dataset {
    /// Creates a dataset, checking that names are unique and lengths agree
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DuplicateColumn` or `CoreError::LengthMismatch`
    pub fn new(columns: Vec<Column>) -> Result<Self, CoreError> {
        let n_rows = columns.first().map(Column::len).unwrap_or(0);
        let mut seen = HashSet::new();

        for column in &columns {
            if !seen.insert(column.name().to_string()) {
                return Err(CoreError::DuplicateColumn(column.name().to_string()));
            }
            if column.len() != n_rows {
                return Err(CoreError::LengthMismatch {
                    column: column.name().to_string(),
                    expected: n_rows,
                    found: column.len(),
                });
            }
        }

        Ok(Self { columns, n_rows })
    }

    /// Number of rows
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Returns `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.columns.len())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Returns the values of a numeric column
    ///
    /// # Errors
    ///
    /// `ColumnNotFound` if absent, `TypeMismatch` if not numeric
    pub fn numeric(&self, name: &str) -> Result<&[Option<f64>], CoreError> {
        let column = self
            .column(name)
            .ok_or_else(|| CoreError::column_not_found(name))?;
        match column.data() {
            ColumnData::Numeric(v) => Ok(v),
            other => Err(CoreError::type_mismatch(name, ColumnKind::Numeric, other.kind())),
        }
    }

    /// Returns a categorical column
    ///
    /// # Errors
    ///
    /// `ColumnNotFound` if absent, `TypeMismatch` if not categorical
    pub fn categorical(&self, name: &str) -> Result<&CategoricalColumn, CoreError> {
        let column = self
            .column(name)
            .ok_or_else(|| CoreError::column_not_found(name))?;
        match column.data() {
            ColumnData::Categorical(c) => Ok(c),
            other => Err(CoreError::type_mismatch(name, ColumnKind::Categorical, other.kind())),
        }
    }

    /// Replaces the column with the same name
    ///
    /// # Errors
    ///
    /// `ColumnNotFound` if no column has that name, `LengthMismatch` if the
    /// replacement has a different row count
    pub fn replace_column(&mut self, column: Column) -> Result<(), CoreError> {
        if column.len() != self.n_rows {
            return Err(CoreError::LengthMismatch {
                column: column.name().to_string(),
                expected: self.n_rows,
                found: column.len(),
            });
        }
        let slot = self
            .columns
            .iter_mut()
            .find(|c| c.name() == column.name())
            .ok_or_else(|| CoreError::column_not_found(column.name()))?;
        *slot = column;
        Ok(())
    }

    /// Keeps the listed columns that are present, in the listed order
    pub fn project(&self, names: &[&str]) -> Dataset {
        let columns: Vec<Column> = names
            .iter()
            .filter_map(|name| self.column(name).cloned())
            .collect();
        let n_rows = if columns.is_empty() { 0 } else { self.n_rows };
        Dataset { columns, n_rows }
    }

    /// Keeps the given rows, in the given order
    pub fn select_rows(&self, rows: &[usize]) -> Dataset {
        Dataset {
            columns: self
                .columns
                .iter()
                .map(|c| Column::new(c.name(), c.data().select(rows)))
                .collect(),
            n_rows: rows.len(),
        }
    }

    /// Keeps the rows for which `keep` returns true
    pub fn filter_rows<F>(&self, mut keep: F) -> Dataset
    where
        F: FnMut(usize) -> bool,
    {
        let rows: Vec<usize> = (0..self.n_rows).filter(|&r| keep(r)).collect();
        self.select_rows(&rows)
    }
}
