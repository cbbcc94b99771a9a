//! Fitted model

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::design::{CategoricalEncoding, Term};
use crate::family::{self, Family, Link};
use crate::special::Z_975;
use crate::summary::GlmSummary;

/// One estimated coefficient with its Wald inference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coefficient {
    pub term: String,
    pub estimate: f64,
    pub std_error: f64,
    pub z_value: f64,
    /// Two-sided p-value against the standard normal
    pub p_value: f64,
}

impl Coefficient {
    /// 95% Wald confidence interval
    pub fn conf_int(&self) -> (f64, f64) {
        let half = Z_975 * self.std_error;
        (self.estimate - half, self.estimate + half)
    }

    /// Significance code: `***` < 0.001, `**` < 0.01, `*` < 0.05, `.` < 0.1
    pub fn significance(&self) -> &'static str {
        match self.p_value {
            p if p < 0.001 => "***",
            p if p < 0.01 => "**",
            p if p < 0.05 => "*",
            p if p < 0.1 => ".",
            _ => "",
        }
    }
}

/// Goodness-of-fit measures
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub n_obs: usize,
    /// Parameters besides the intercept
    pub df_model: usize,
    pub df_resid: usize,
    pub deviance: f64,
    /// Deviance of the intercept-only model
    pub null_deviance: f64,
    pub pearson_chi2: f64,
    /// Log-likelihood at the estimated dispersion
    pub log_likelihood: f64,
    pub aic: f64,
    pub bic: f64,
    pub iterations: usize,
}

/// A fitted Gamma GLM
#[derive(Debug, Clone)]
pub struct FittedModel {
    pub family: Family,
    pub link: Link,
    pub response: String,
    pub terms: Vec<Term>,
    /// One entry per design column, intercept first
    pub coefficients: Vec<Coefficient>,
    /// Covariance of the estimates, scaled by the dispersion
    pub covariance: DMatrix<f64>,
    /// Pearson estimate of the dispersion `phi`
    pub dispersion: f64,
    pub diagnostics: Diagnostics,
    pub encodings: Vec<CategoricalEncoding>,
    pub omitted_predictors: Vec<String>,
    pub excluded_rows: usize,
    pub(crate) observed: Vec<f64>,
    pub(crate) fitted: Vec<f64>,
}

impl FittedModel {
    /// Looks up a coefficient by term name
    pub fn coefficient(&self, term: &str) -> Option<&Coefficient> {
        self.coefficients.iter().find(|c| c.term == term)
    }

    /// Term to estimate, in design column order
    pub fn params(&self) -> Vec<(&str, f64)> {
        self.coefficients
            .iter()
            .map(|c| (c.term.as_str(), c.estimate))
            .collect()
    }

    pub fn n_params(&self) -> usize {
        self.coefficients.len()
    }

    /// Fitted means of the rows used in the fit
    pub fn fitted_values(&self) -> &[f64] {
        &self.fitted
    }

    /// Raw residuals `y - mu`
    pub fn resid_response(&self) -> Vec<f64> {
        self.observed
            .iter()
            .zip(&self.fitted)
            .map(|(y, m)| y - m)
            .collect()
    }

    /// Pearson residuals `(y - mu) / mu`
    pub fn resid_pearson(&self) -> Vec<f64> {
        self.observed
            .iter()
            .zip(&self.fitted)
            .map(|(&y, &m)| family::pearson_residual(y, m))
            .collect()
    }

    /// Deviance residuals
    pub fn resid_deviance(&self) -> Vec<f64> {
        self.observed
            .iter()
            .zip(&self.fitted)
            .map(|(&y, &m)| family::deviance_residual(y, m))
            .collect()
    }

    /// Printable regression summary
    pub fn summary(&self) -> GlmSummary<'_> {
        GlmSummary::new(self)
    }
}
