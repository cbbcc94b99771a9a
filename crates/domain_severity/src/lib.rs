//! Claim Severity Modeling Domain
//!
//! Fits a Gamma generalized linear model with a log link to claim severity and
//! turns the fitted coefficients into percentage effects on expected cost.
//!
//! # Model
//!
//! ```text
//! eta = X beta        mu = exp(eta)        Var(Y) = phi * mu^2
//! ```
//!
//! Categorical predictors enter through reference-level encoding: levels are
//! sorted, the first observed level is the baseline and every other level gets
//! an indicator column named `predictor[T.level]`.

pub mod spec;
pub mod design;
pub mod family;
pub mod irls;
pub mod model;
pub mod summary;
pub mod effects;
pub mod special;
pub mod error;

pub use spec::ModelSpec;
pub use design::{build_design, CategoricalEncoding, DesignMatrix, Term, TermKind, INTERCEPT};
pub use family::{Family, Link};
pub use irls::{fit, fit_design, FitOptions};
pub use model::{Coefficient, Diagnostics, FittedModel};
pub use summary::GlmSummary;
pub use effects::{pct_effect, EffectRow, EffectTable, EffectTableView};
pub use error::FitError;
