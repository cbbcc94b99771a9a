//! Core error types used across the system

use thiserror::Error;

use crate::dataset::ColumnKind;

/// Core error type for the kernel
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Column '{column}' is {found}, expected {expected}")]
    TypeMismatch {
        column: String,
        expected: ColumnKind,
        found: ColumnKind,
    },

    #[error("Column '{column}' has {found} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),
}

impl CoreError {
    pub fn column_not_found(name: impl Into<String>) -> Self {
        CoreError::ColumnNotFound(name.into())
    }

    pub fn type_mismatch(column: impl Into<String>, expected: ColumnKind, found: ColumnKind) -> Self {
        CoreError::TypeMismatch {
            column: column.into(),
            expected,
            found,
        }
    }
}
