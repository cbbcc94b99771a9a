//! Model specification

use serde::{Deserialize, Serialize};

use domain_claims::SEVERITY;

/// Response and predictors of a severity model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Response column
    pub response: String,
    /// Predictors entering the linear predictor as-is
    pub numeric: Vec<String>,
    /// Predictors expanded into indicator columns
    pub categorical: Vec<String>,
}

impl ModelSpec {
    /// Creates a specification from column names
    pub fn new<S: Into<String>>(
        response: impl Into<String>,
        numeric: impl IntoIterator<Item = S>,
        categorical: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            response: response.into(),
            numeric: numeric.into_iter().map(Into::into).collect(),
            categorical: categorical.into_iter().map(Into::into).collect(),
        }
    }

    /// The claim severity model: policyholder, coverage and vehicle predictors
    pub fn claim_severity() -> Self {
        Self::new(
            SEVERITY,
            [
                "age",
                "months_as_customer",
                "policy_deductable",
                "policy_annual_premium",
                "umbrella_limit",
            ],
            [
                "insured_sex",
                "insured_education_level",
                "insured_relationship",
                "auto_year",
            ],
        )
    }

    /// All predictor names, numeric first
    pub fn predictors(&self) -> impl Iterator<Item = &str> {
        self.numeric
            .iter()
            .chain(self.categorical.iter())
            .map(String::as_str)
    }
}

impl Default for ModelSpec {
    fn default() -> Self {
        Self::claim_severity()
    }
}
