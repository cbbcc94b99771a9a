//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claim severity analysis test suite.
//!
//! # Modules
//!
//! - `fixtures`: Claims CSV fixtures and helpers to place them on disk
//! - `builders`: Builder for small in-memory datasets
//! - `assertions`: Float and ordering assertions with readable messages
//! - `generators`: Property-based test data generators
//! - `simulation`: Claims simulated from a Gamma log-link process with known coefficients

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;
pub mod simulation;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
pub use simulation::*;
