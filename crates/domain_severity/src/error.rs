//! Model fitting errors

use thiserror::Error;

use core_kernel::CoreError;

/// Errors that can occur while building the design matrix or fitting the model
#[derive(Debug, Error, PartialEq)]
pub enum FitError {
    /// The design matrix does not have full column rank
    #[error("Design matrix is rank deficient: {0}")]
    RankDeficient(String),

    /// IRLS did not reach the convergence tolerance
    #[error("IRLS did not converge after {iterations} iterations (deviance {deviance})")]
    NonConvergence { iterations: usize, deviance: f64 },

    /// The Gamma family requires a strictly positive response
    #[error("{count} response values are not strictly positive (minimum {min})")]
    NonPositiveResponse { count: usize, min: f64 },

    /// Fewer usable rows than the model needs
    #[error("Insufficient data: {observations} observations for {parameters} parameters")]
    InsufficientData { observations: usize, parameters: usize },

    /// The response column is not in the dataset
    #[error("Response column not found: {0}")]
    MissingResponse(String),

    #[error(transparent)]
    Column(#[from] CoreError),
}

impl FitError {
    pub fn rank_deficient(reason: impl Into<String>) -> Self {
        FitError::RankDeficient(reason.into())
    }
}
