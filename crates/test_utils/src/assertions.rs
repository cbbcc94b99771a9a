//! Custom Test Assertions
//!
//! Assertion helpers that give more meaningful messages than standard
//! assertions for estimated quantities.

/// Asserts that `actual` is within `tolerance` (a fraction) of `expected`
///
/// # Panics
///
/// Panics if `|actual - expected| > tolerance * |expected|`
pub fn assert_within_relative(what: &str, actual: f64, expected: f64, tolerance: f64) {
    let diff = (actual - expected).abs();
    let allowed = tolerance * expected.abs();
    assert!(
        diff <= allowed,
        "{what}: actual={actual}, expected={expected}, diff={diff}, allowed={allowed}"
    );
}

/// Asserts that values are ordered by non-increasing absolute value
pub fn assert_descending_by_abs(values: &[f64]) {
    for (i, pair) in values.windows(2).enumerate() {
        assert!(
            pair[0].abs() >= pair[1].abs(),
            "values out of order at {i}: |{}| < |{}|",
            pair[0],
            pair[1]
        );
    }
}

/// Asserts that a file exists and is not empty
pub fn assert_non_empty_file(path: &std::path::Path) {
    let metadata = std::fs::metadata(path)
        .unwrap_or_else(|e| panic!("expected file at {}: {e}", path.display()));
    assert!(metadata.len() > 0, "file {} is empty", path.display());
}
