//! Gamma family with log link
//!
//! Unit deviance, variance and log-likelihood of the Gamma distribution
//! parameterized by its mean `mu` and dispersion `phi`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::special::ln_gamma;

/// Error distribution of the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Family {
    Gamma,
}

/// Link between the mean and the linear predictor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Link {
    Log,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::Gamma => f.pad("Gamma"),
        }
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Link::Log => f.pad("log"),
        }
    }
}

/// Variance function `V(mu) = mu^2`
pub fn variance(mu: f64) -> f64 {
    mu * mu
}

/// Unit deviance `2 * (-ln(y / mu) + (y - mu) / mu)`
pub fn unit_deviance(y: f64, mu: f64) -> f64 {
    2.0 * (-(y / mu).ln() + (y - mu) / mu)
}

/// Total deviance
pub fn deviance(y: &[f64], mu: &[f64]) -> f64 {
    y.iter().zip(mu).map(|(&y, &m)| unit_deviance(y, m)).sum()
}

/// Pearson residual `(y - mu) / sqrt(V(mu))`
pub fn pearson_residual(y: f64, mu: f64) -> f64 {
    (y - mu) / variance(mu).sqrt()
}

/// Signed square root of the unit deviance
pub fn deviance_residual(y: f64, mu: f64) -> f64 {
    (y - mu).signum() * unit_deviance(y, mu).max(0.0).sqrt()
}

/// Log-likelihood at dispersion `scale`
///
/// With shape `nu = 1 / scale` each observation contributes
/// `nu * ln(nu * y / mu) - nu * y / mu - ln(y) - ln_gamma(nu)`.
pub fn log_likelihood(y: &[f64], mu: &[f64], scale: f64) -> f64 {
    let nu = 1.0 / scale;
    let ln_gamma_nu = ln_gamma(nu);
    y.iter()
        .zip(mu)
        .map(|(&y, &m)| {
            let ratio = y / m;
            nu * (nu * ratio).ln() - nu * ratio - y.ln() - ln_gamma_nu
        })
        .sum()
}
