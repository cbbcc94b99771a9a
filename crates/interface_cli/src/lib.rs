//! Claim Severity Analysis Driver
//!
//! This crate wires the analysis stages together and renders the console
//! report.
//!
//! # Stages
//!
//! 1. **Load**: read the claims extract into the modeling dataset
//! 2. **Visualize**: severity histogram and box-plots by deductible
//! 3. **Fit**: Gamma GLM with log link
//! 4. **Report**: effect table, modeling dataset and JSON output
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_cli::{run, AnalysisConfig};
//!
//! let outcome = run(&AnalysisConfig::from_env()?)?;
//! println!("{}", outcome.report());
//! ```

pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;

pub use config::{AnalysisConfig, EFFECTS_FILE};
pub use error::{PipelineError, Stage};
pub use pipeline::{run, AnalysisOutcome};
pub use report::AnalysisReport;
