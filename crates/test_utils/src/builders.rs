//! Test Data Builders
//!
//! Builder for small in-memory datasets, so tests state only the columns that
//! matter to them.

use core_kernel::{Column, Dataset};

/// Builder for constructing test datasets
#[derive(Default)]
pub struct TestDatasetBuilder {
    columns: Vec<Column>,
}

impl TestDatasetBuilder {
    /// Creates an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a fully observed numeric column
    pub fn numeric(mut self, name: &str, values: &[f64]) -> Self {
        self.columns
            .push(Column::numeric(name, values.iter().copied().map(Some).collect()));
        self
    }

    /// Adds a fully observed categorical column
    pub fn categorical(mut self, name: &str, labels: &[&str]) -> Self {
        let values = labels.iter().map(|s| Some(s.to_string())).collect();
        self.columns.push(Column::text(name, values).to_categorical());
        self
    }

    /// Adds a categorical column with missing values
    pub fn categorical_opt(mut self, name: &str, labels: &[Option<&str>]) -> Self {
        let values = labels.iter().map(|s| s.map(str::to_string)).collect();
        self.columns.push(Column::text(name, values).to_categorical());
        self
    }

    /// Builds the dataset
    ///
    /// # Panics
    ///
    /// Panics if column lengths differ or names repeat
    pub fn build(self) -> Dataset {
        Dataset::new(self.columns).expect("invalid test dataset")
    }
}
