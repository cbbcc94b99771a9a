//! Claims modeling schema
//!
//! Fixed field lists that decide which columns of the raw extract take part in
//! the analysis and which of them are categorical.

/// Claim severity, the modeled response
pub const SEVERITY: &str = "total_claim_amount";

/// Policy deductible, the box-plot grouping key
pub const DEDUCTIBLE: &str = "policy_deductable";

/// Columns kept for modeling, in output order
pub const MODEL_COLUMNS: [&str; 18] = [
    "months_as_customer",
    "age",
    "policy_state",
    "policy_csl",
    "policy_deductable",
    "policy_annual_premium",
    "umbrella_limit",
    "insured_sex",
    "insured_education_level",
    "insured_occupation",
    "insured_relationship",
    "number_of_vehicles_involved",
    "total_claim_amount",
    "injury_claim",
    "property_claim",
    "vehicle_claim",
    "auto_make",
    "auto_year",
];

/// Columns cast to categorical after loading
pub const CATEGORICAL_COLUMNS: [&str; 8] = [
    "policy_state",
    "policy_csl",
    "insured_sex",
    "insured_education_level",
    "insured_occupation",
    "insured_relationship",
    "auto_make",
    "auto_year",
];

/// Returns true if `name` is one of the categorical columns
pub fn is_categorical(name: &str) -> bool {
    CATEGORICAL_COLUMNS.contains(&name)
}
