//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use proptest::collection::vec;
use proptest::prelude::*;

/// Strategy for a strictly positive claim severity
pub fn severity_strategy() -> impl Strategy<Value = f64> {
    1.0f64..250_000.0f64
}

/// Strategy for a coefficient on the log scale
pub fn coefficient_strategy() -> impl Strategy<Value = f64> {
    -3.0f64..3.0f64
}

/// Strategy for a list of uniquely named terms with coefficients
///
/// The first term is always `Intercept`.
pub fn term_coefficients_strategy(max_terms: usize) -> impl Strategy<Value = Vec<(String, f64)>> {
    vec(coefficient_strategy(), 1..=max_terms).prop_map(|betas| {
        betas
            .into_iter()
            .enumerate()
            .map(|(i, beta)| {
                let name = if i == 0 {
                    "Intercept".to_string()
                } else {
                    format!("x{i}")
                };
                (name, beta)
            })
            .collect()
    })
}

/// Strategy for a category label drawn from a small alphabet
pub fn label_strategy() -> impl Strategy<Value = String> {
    "[A-E]{1,2}"
}

/// Strategy for a label column with occasional missing values
pub fn label_column_strategy(max_len: usize) -> impl Strategy<Value = Vec<Option<String>>> {
    vec(
        prop_oneof![8 => label_strategy().prop_map(Some), 1 => Just(None)],
        1..=max_len,
    )
}

/// Strategy for a deductible amount as offered on policies
pub fn deductible_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![Just(500.0), Just(1000.0), Just(2000.0)]
}
