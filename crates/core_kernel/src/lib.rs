//! Core Kernel - Foundational types for the claim severity analysis
//!
//! This crate provides the building blocks shared by every stage of the pipeline:
//! - An in-memory, column-oriented dataset with typed columns
//! - Categorical (label) columns with deterministic level ordering
//! - Summary statistics and number formatting for reports and charts

pub mod dataset;
pub mod categorical;
pub mod stats;
pub mod format;
pub mod error;

pub use dataset::{Column, ColumnData, ColumnKind, Dataset};
pub use categorical::{CategoricalColumn, MISSING_LEVEL};
pub use stats::{quantile, Summary};
pub use format::{format_number, format_thousands};
pub use error::CoreError;
