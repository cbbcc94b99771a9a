//! Claims Dataset Domain
//!
//! This crate turns a raw claims extract into the dataset the severity model
//! is fitted on, and writes that dataset back out for reuse.
//!
//! # Loading
//!
//! ```text
//! CSV file -> typed table -> allow-list projection -> drop missing severity -> categorical cast
//! ```

pub mod schema;
pub mod loader;
pub mod writer;
pub mod error;

pub use schema::{CATEGORICAL_COLUMNS, DEDUCTIBLE, MODEL_COLUMNS, SEVERITY};
pub use loader::{cast_categorical, load_claims, prepare_model_dataset, read_table, LoadReport, LoadedClaims};
pub use writer::{write_dataset, write_dataset_to};
pub use error::ClaimDataError;
