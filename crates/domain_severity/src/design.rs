//! Design matrix construction
//!
//! Resolves a [`ModelSpec`] against a dataset and produces the model matrix:
//! an intercept, one column per numeric predictor, then one indicator column
//! per non-reference level of each categorical predictor.
//!
//! Rows with a missing response or a missing numeric predictor are excluded.
//! Missing categorical values are kept as their own level.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use core_kernel::{CategoricalColumn, ColumnData, Dataset, MISSING_LEVEL};

use crate::error::FitError;
use crate::spec::ModelSpec;

/// Name of the intercept term
pub const INTERCEPT: &str = "Intercept";

/// What a design column represents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TermKind {
    Intercept,
    Numeric { predictor: String },
    Level { predictor: String, level: String },
}

/// A named design column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub name: String,
    pub kind: TermKind,
}

impl Term {
    fn intercept() -> Self {
        Self {
            name: INTERCEPT.to_string(),
            kind: TermKind::Intercept,
        }
    }

    fn numeric(predictor: &str) -> Self {
        Self {
            name: predictor.to_string(),
            kind: TermKind::Numeric {
                predictor: predictor.to_string(),
            },
        }
    }

    fn level(predictor: &str, level: &str) -> Self {
        Self {
            name: format!("{predictor}[T.{level}]"),
            kind: TermKind::Level {
                predictor: predictor.to_string(),
                level: level.to_string(),
            },
        }
    }
}

/// Reference-level encoding of one categorical predictor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalEncoding {
    pub predictor: String,
    /// Baseline level, absorbed into the intercept
    pub reference: String,
    /// Levels with an indicator column, in column order
    pub indicators: Vec<String>,
}

/// Model matrix, response and bookkeeping
#[derive(Debug, Clone)]
pub struct DesignMatrix {
    pub x: DMatrix<f64>,
    pub y: DVector<f64>,
    pub terms: Vec<Term>,
    pub response: String,
    pub encodings: Vec<CategoricalEncoding>,
    /// Dataset rows used, in matrix row order
    pub rows: Vec<usize>,
    /// Rows left out for a missing response or numeric predictor
    pub excluded_rows: usize,
    /// Predictors of the `ModelSpec` absent from the dataset
    pub omitted_predictors: Vec<String>,
}

impl DesignMatrix {
    pub fn n_obs(&self) -> usize {
        self.x.nrows()
    }

    pub fn n_params(&self) -> usize {
        self.x.ncols()
    }

    pub fn term_names(&self) -> Vec<&str> {
        self.terms.iter().map(|t| t.name.as_str()).collect()
    }
}

/// Builds the design matrix for `spec` from `dataset`
///
/// # Errors
///
/// * `FitError::MissingResponse` if the response column is absent
/// * `FitError::Column` if a numeric predictor or the response is not numeric
/// * `FitError::NonPositiveResponse` if a used response value is `<= 0`
/// * `FitError::RankDeficient` if a categorical predictor has fewer than two
///   observed levels
/// * `FitError::InsufficientData` if there are not more rows than parameters
pub fn build_design(dataset: &Dataset, spec: &ModelSpec) -> Result<DesignMatrix, FitError> {
    if !dataset.contains(&spec.response) {
        return Err(FitError::MissingResponse(spec.response.clone()));
    }
    let response = dataset.numeric(&spec.response)?;

    let mut omitted_predictors = Vec::new();
    let mut numeric: Vec<(&str, &[Option<f64>])> = Vec::new();
    for name in &spec.numeric {
        if dataset.contains(name) {
            numeric.push((name.as_str(), dataset.numeric(name)?));
        } else {
            warn!(predictor = %name, "Predictor not in dataset, omitted from model");
            omitted_predictors.push(name.clone());
        }
    }

    let mut categorical: Vec<(&str, CategoricalColumn)> = Vec::new();
    for name in &spec.categorical {
        match dataset.column(name).map(|c| c.to_categorical()) {
            Some(column) => {
                if let ColumnData::Categorical(cat) = column.data() {
                    categorical.push((name.as_str(), cat.clone()));
                }
            }
            None => {
                warn!(predictor = %name, "Predictor not in dataset, omitted from model");
                omitted_predictors.push(name.clone());
            }
        }
    }

    let rows: Vec<usize> = (0..dataset.n_rows())
        .filter(|&r| response[r].is_some() && numeric.iter().all(|(_, v)| v[r].is_some()))
        .collect();
    let excluded_rows = dataset.n_rows() - rows.len();
    if excluded_rows > 0 {
        warn!(excluded_rows, "Rows with a missing response or numeric predictor excluded from fit");
    }

    let y: Vec<f64> = rows.iter().filter_map(|&r| response[r]).collect();
    let non_positive: Vec<f64> = y.iter().copied().filter(|v| *v <= 0.0).collect();
    if !non_positive.is_empty() {
        let min = non_positive.iter().copied().fold(f64::INFINITY, f64::min);
        return Err(FitError::NonPositiveResponse {
            count: non_positive.len(),
            min,
        });
    }

    let mut terms = vec![Term::intercept()];
    let mut columns: Vec<Vec<f64>> = vec![vec![1.0; rows.len()]];

    for (name, values) in &numeric {
        terms.push(Term::numeric(name));
        columns.push(rows.iter().filter_map(|&r| values[r]).collect());
    }

    let mut encodings = Vec::new();
    for (name, cat) in &categorical {
        let encoding = encode_levels(name, cat, &rows)?;
        for level in &encoding.indicators {
            terms.push(Term::level(name, level));
            columns.push(
                rows.iter()
                    .map(|&r| if cat.level(r) == level.as_str() { 1.0 } else { 0.0 })
                    .collect(),
            );
        }
        encodings.push(encoding);
    }

    let n = rows.len();
    let p = columns.len();
    if n <= p {
        return Err(FitError::InsufficientData {
            observations: n,
            parameters: p,
        });
    }

    debug!(observations = n, parameters = p, "Design matrix built");

    Ok(DesignMatrix {
        x: DMatrix::from_fn(n, p, |i, j| columns[j][i]),
        y: DVector::from_vec(y),
        terms,
        response: spec.response.clone(),
        encodings,
        rows,
        excluded_rows,
        omitted_predictors,
    })
}

/// Chooses the reference level among the levels observed in `rows`
///
/// Observed levels keep the column's sorted order with the missing level last,
/// so the reference is the first observed level in sorted order.
fn encode_levels(
    predictor: &str,
    column: &CategoricalColumn,
    rows: &[usize],
) -> Result<CategoricalEncoding, FitError> {
    let mut observed = vec![false; column.levels().len()];
    let mut missing = false;
    for &r in rows {
        match column.codes()[r] {
            Some(code) => observed[code] = true,
            None => missing = true,
        }
    }

    let mut levels: Vec<String> = column
        .levels()
        .iter()
        .zip(&observed)
        .filter(|(_, seen)| **seen)
        .map(|(level, _)| level.clone())
        .collect();
    if missing {
        levels.push(MISSING_LEVEL.to_string());
    }

    if levels.len() < 2 {
        let only = levels.first().map(String::as_str).unwrap_or("<none>");
        return Err(FitError::rank_deficient(format!(
            "categorical predictor '{predictor}' has a single observed level '{only}'"
        )));
    }

    let reference = levels.remove(0);
    Ok(CategoricalEncoding {
        predictor: predictor.to_string(),
        reference,
        indicators: levels,
    })
}
