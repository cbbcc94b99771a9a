//! Iteratively reweighted least squares for the Gamma / log model
//!
//! For the log link the Gamma working weights `(dmu/deta)^2 / V(mu)` are
//! identically one, so every iteration solves the same least-squares system
//! against a new working response `z = eta + (y - mu) / mu`. The system is
//! factored once: columns are scaled to unit norm and decomposed by SVD, which
//! also yields the rank check and the covariance of the estimates.

use nalgebra::{DMatrix, DVector};
use tracing::{debug, info};

use core_kernel::Dataset;

use crate::design::{build_design, DesignMatrix};
use crate::error::FitError;
use crate::family::{self, Family, Link};
use crate::model::{Coefficient, Diagnostics, FittedModel};
use crate::special::normal_two_sided_p;
use crate::spec::ModelSpec;

const MAX_STEP_HALVINGS: usize = 30;

/// Convergence controls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    /// Upper bound on IRLS iterations
    pub max_iterations: usize,
    /// Relative deviance change `|D - D_old| / (|D| + 0.1)` that ends iteration
    pub tolerance: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1e-8,
        }
    }
}

/// Builds the design matrix for `spec` and fits it
///
/// # Errors
///
/// Any error of [`build_design`] or [`fit_design`]
pub fn fit(dataset: &Dataset, spec: &ModelSpec, options: &FitOptions) -> Result<FittedModel, FitError> {
    let design = build_design(dataset, spec)?;
    fit_design(design, options)
}

/// Fits a Gamma GLM with log link to a prepared design matrix
///
/// # Errors
///
/// * `FitError::RankDeficient` if the design matrix lacks full column rank
/// * `FitError::NonConvergence` if the deviance does not settle within
///   `options.max_iterations`
pub fn fit_design(design: DesignMatrix, options: &FitOptions) -> Result<FittedModel, FitError> {
    let ls = LeastSquares::new(&design)?;
    let x = &design.x;
    let y = &design.y;
    let n = design.n_obs();
    let p = design.n_params();

    let y_mean = y.mean();
    let mut mu = y.map(|v| (v + y_mean) / 2.0);
    let mut eta = mu.map(f64::ln);
    let mut dev_old = family::deviance(y.as_slice(), mu.as_slice());
    let mut beta: Option<DVector<f64>> = None;
    let mut iterations = 0;
    let mut converged = false;

    for iteration in 1..=options.max_iterations {
        iterations = iteration;
        let z = DVector::from_fn(n, |i, _| eta[i] + (y[i] - mu[i]) / mu[i]);

        let mut candidate = ls.solve(&z);
        let (mut new_eta, mut new_mu, mut dev) = evaluate(x, &candidate, y);

        let mut halvings = 0;
        if let Some(previous) = &beta {
            while (!dev.is_finite() || dev > dev_old) && halvings < MAX_STEP_HALVINGS {
                candidate = (previous + &candidate) * 0.5;
                (new_eta, new_mu, dev) = evaluate(x, &candidate, y);
                halvings += 1;
            }
        }
        if !dev.is_finite() {
            return Err(FitError::NonConvergence {
                iterations: iteration,
                deviance: dev,
            });
        }

        debug!(iteration, deviance = dev, halvings, "IRLS iteration");

        let change = (dev - dev_old).abs() / (dev.abs() + 0.1);
        beta = Some(candidate);
        eta = new_eta;
        mu = new_mu;
        dev_old = dev;

        if change < options.tolerance {
            converged = true;
            break;
        }
    }

    let beta = match beta {
        Some(beta) if converged => beta,
        _ => {
            return Err(FitError::NonConvergence {
                iterations,
                deviance: dev_old,
            })
        }
    };

    let observed: Vec<f64> = y.iter().copied().collect();
    let fitted: Vec<f64> = mu.iter().copied().collect();

    let df_resid = n - p;
    let pearson_chi2: f64 = observed
        .iter()
        .zip(&fitted)
        .map(|(&y, &m)| family::pearson_residual(y, m).powi(2))
        .sum();
    let dispersion = pearson_chi2 / df_resid as f64;
    let covariance = ls.covariance() * dispersion;

    let coefficients = design
        .terms
        .iter()
        .enumerate()
        .map(|(j, term)| {
            let std_error = covariance[(j, j)].sqrt();
            let z_value = beta[j] / std_error;
            Coefficient {
                term: term.name.clone(),
                estimate: beta[j],
                std_error,
                z_value,
                p_value: normal_two_sided_p(z_value),
            }
        })
        .collect();

    let null_deviance = family::deviance(&observed, &vec![y_mean; n]);
    let log_likelihood = family::log_likelihood(&observed, &fitted, dispersion);
    let diagnostics = Diagnostics {
        n_obs: n,
        df_model: p - 1,
        df_resid,
        deviance: dev_old,
        null_deviance,
        pearson_chi2,
        log_likelihood,
        aic: -2.0 * log_likelihood + 2.0 * p as f64,
        bic: -2.0 * log_likelihood + p as f64 * (n as f64).ln(),
        iterations,
    };

    info!(
        iterations,
        deviance = dev_old,
        dispersion,
        parameters = p,
        observations = n,
        "Gamma GLM fitted"
    );

    Ok(FittedModel {
        family: Family::Gamma,
        link: Link::Log,
        response: design.response,
        terms: design.terms,
        coefficients,
        covariance,
        dispersion,
        diagnostics,
        encodings: design.encodings,
        omitted_predictors: design.omitted_predictors,
        excluded_rows: design.excluded_rows,
        observed,
        fitted,
    })
}

fn evaluate(x: &DMatrix<f64>, beta: &DVector<f64>, y: &DVector<f64>) -> (DVector<f64>, DVector<f64>, f64) {
    let eta = x * beta;
    let mu = eta.map(f64::exp);
    let dev = family::deviance(y.as_slice(), mu.as_slice());
    (eta, mu, dev)
}

/// Factored least-squares system on column-scaled regressors
struct LeastSquares {
    scales: DVector<f64>,
    u: DMatrix<f64>,
    inv_sigma: DVector<f64>,
    v: DMatrix<f64>,
}

impl LeastSquares {
    fn new(design: &DesignMatrix) -> Result<Self, FitError> {
        let x = &design.x;
        let (n, p) = x.shape();

        let scales = DVector::from_iterator(p, x.column_iter().map(|c| c.norm()));
        if let Some(j) = scales.iter().position(|s| *s == 0.0) {
            return Err(FitError::rank_deficient(format!(
                "column '{}' is identically zero",
                design.terms[j].name
            )));
        }

        let mut scaled = x.clone();
        for (j, mut column) in scaled.column_iter_mut().enumerate() {
            column /= scales[j];
        }

        let svd = scaled.svd(true, true);
        let sigma = svd.singular_values;
        let (Some(u), Some(v_t)) = (svd.u, svd.v_t) else {
            return Err(FitError::rank_deficient("singular value decomposition failed"));
        };

        let sigma_max = sigma.iter().copied().fold(0.0, f64::max);
        let threshold = n.max(p) as f64 * f64::EPSILON * sigma_max;
        let rank = sigma.iter().filter(|s| **s > threshold).count();
        if rank < p {
            return Err(FitError::rank_deficient(format!(
                "rank {rank} is below the {p} design columns"
            )));
        }

        Ok(Self {
            scales,
            u,
            inv_sigma: sigma.map(|s| 1.0 / s),
            v: v_t.transpose(),
        })
    }

    /// Least-squares coefficients on the original column scale
    fn solve(&self, z: &DVector<f64>) -> DVector<f64> {
        let projected = self.u.tr_mul(z).component_mul(&self.inv_sigma);
        (&self.v * projected).component_div(&self.scales)
    }

    /// `(X'X)^-1` on the original column scale
    fn covariance(&self) -> DMatrix<f64> {
        let weighted = &self.v * DMatrix::from_diagonal(&self.inv_sigma.map(|s| s * s));
        let scaled = weighted * self.v.transpose();
        DMatrix::from_fn(scaled.nrows(), scaled.ncols(), |i, j| {
            scaled[(i, j)] / (self.scales[i] * self.scales[j])
        })
    }
}
