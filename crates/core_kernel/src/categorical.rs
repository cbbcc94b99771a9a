//! Categorical (label) columns
//!
//! A categorical column stores one level code per row against a sorted list of
//! level labels. Levels are the distinct observed values, ordered by byte-wise
//! string comparison, so the first level is stable across runs and can serve as
//! the reference level of a model encoding.
//!
//! Missing values keep a `None` code and surface as the distinct
//! [`MISSING_LEVEL`], which always sorts after every observed label.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Label reported for rows whose value was missing
pub const MISSING_LEVEL: &str = "(missing)";

/// A column of labels drawn from a fixed, sorted level set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalColumn {
    levels: Vec<String>,
    codes: Vec<Option<usize>>,
}

impl CategoricalColumn {
    /// Builds a categorical column from raw labels
    ///
    /// # Arguments
    ///
    /// * `values` - One optional label per row; `None` marks a missing value
    pub fn from_labels<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        let raw: Vec<Option<String>> = values
            .into_iter()
            .map(|v| v.map(|s| s.as_ref().to_string()))
            .collect();

        let levels: Vec<String> = raw
            .iter()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let codes = raw
            .iter()
            .map(|v| {
                v.as_ref()
                    .and_then(|label| levels.binary_search(label).ok())
            })
            .collect();

        Self { levels, codes }
    }

    /// Returns the observed levels in sorted order (missing level excluded)
    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    /// Returns the observed levels followed by [`MISSING_LEVEL`] when any row is missing
    pub fn all_levels(&self) -> Vec<String> {
        let mut levels = self.levels.clone();
        if self.has_missing() {
            levels.push(MISSING_LEVEL.to_string());
        }
        levels
    }

    /// Returns the level code of each row
    pub fn codes(&self) -> &[Option<usize>] {
        &self.codes
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// True if at least one row is missing
    pub fn has_missing(&self) -> bool {
        self.codes.iter().any(Option::is_none)
    }

    /// Returns the original label of a row, `None` when missing
    pub fn label(&self, row: usize) -> Option<&str> {
        self.codes
            .get(row)
            .copied()
            .flatten()
            .map(|code| self.levels[code].as_str())
    }

    /// Returns the level of a row, mapping missing values to [`MISSING_LEVEL`]
    pub fn level(&self, row: usize) -> &str {
        self.label(row).unwrap_or(MISSING_LEVEL)
    }

    /// Counts rows per level, in [`all_levels`](Self::all_levels) order
    pub fn level_counts(&self) -> Vec<(String, usize)> {
        let mut counts = vec![0usize; self.levels.len()];
        let mut missing = 0usize;
        for code in &self.codes {
            match code {
                Some(c) => counts[*c] += 1,
                None => missing += 1,
            }
        }

        let mut out: Vec<(String, usize)> = self
            .levels
            .iter()
            .cloned()
            .zip(counts)
            .collect();
        if missing > 0 {
            out.push((MISSING_LEVEL.to_string(), missing));
        }
        out
    }

    /// Keeps the given rows; the level set is left untouched
    pub fn select(&self, rows: &[usize]) -> Self {
        Self {
            levels: self.levels.clone(),
            codes: rows.iter().map(|&r| self.codes[r]).collect(),
        }
    }
}
