//! Simulated Claims
//!
//! Draws claim severities from a Gamma distribution whose mean follows a
//! log-linear model with known coefficients, so fitted estimates can be
//! checked against the truth.

use core_kernel::{Column, Dataset};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Gamma;

/// A simulated claims dataset together with the coefficients that generated it
#[derive(Debug, Clone)]
pub struct SimulatedClaims {
    pub dataset: Dataset,
    /// `(term name, coefficient)` in design-matrix order
    pub coefficients: Vec<(String, f64)>,
}

impl SimulatedClaims {
    pub fn coefficient(&self, term: &str) -> f64 {
        self.coefficients
            .iter()
            .find(|(name, _)| name == term)
            .map(|(_, beta)| *beta)
            .unwrap_or_else(|| panic!("no simulated coefficient for {term}"))
    }

    /// Renders the dataset as CSV text
    pub fn to_csv(&self) -> String {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(self.dataset.column_names())
            .expect("failed to write header");
        for row in 0..self.dataset.n_rows() {
            let record: Vec<String> = self
                .dataset
                .columns()
                .iter()
                .map(|c| c.data().render(row).unwrap_or_default())
                .collect();
            writer.write_record(&record).expect("failed to write row");
        }
        let bytes = writer.into_inner().expect("failed to flush csv");
        String::from_utf8(bytes).expect("csv is valid utf-8")
    }
}

/// Simulator for claims with the full severity predictor set
///
/// Numeric predictors are drawn independently and each categorical predictor
/// has three (or two) equally likely levels. The first level in sorted order is
/// the reference and has no coefficient.
pub struct ClaimSimulator {
    rows: usize,
    shape: f64,
    seed: u64,
}

const EDUCATION: [&str; 3] = ["College", "High School", "MD"];
const RELATIONSHIP: [&str; 3] = ["husband", "unmarried", "wife"];
const AUTO_YEAR: [&str; 3] = ["2005", "2010", "2015"];
const SEX: [&str; 2] = ["FEMALE", "MALE"];
const DEDUCTIBLES: [f64; 3] = [500.0, 1000.0, 2000.0];
const UMBRELLA: [f64; 4] = [0.0, 2_000_000.0, 5_000_000.0, 10_000_000.0];

impl ClaimSimulator {
    /// `shape` is the Gamma shape; the coefficient of variation is `1/sqrt(shape)`
    pub fn new(rows: usize, shape: f64, seed: u64) -> Self {
        Self { rows, shape, seed }
    }

    /// The generating coefficients, in design-matrix order
    pub fn true_coefficients() -> Vec<(String, f64)> {
        [
            ("Intercept", 8.0),
            ("age", 0.01),
            ("months_as_customer", 0.001),
            ("policy_deductable", 0.0002),
            ("policy_annual_premium", 0.0003),
            ("umbrella_limit", 5e-8),
            ("insured_sex[T.MALE]", 0.15),
            ("insured_education_level[T.High School]", -0.2),
            ("insured_education_level[T.MD]", 0.25),
            ("insured_relationship[T.unmarried]", 0.3),
            ("insured_relationship[T.wife]", -0.25),
            ("auto_year[T.2010]", 0.2),
            ("auto_year[T.2015]", 0.35),
        ]
        .into_iter()
        .map(|(name, beta)| (name.to_string(), beta))
        .collect()
    }

    pub fn simulate(&self) -> SimulatedClaims {
        let coefficients = Self::true_coefficients();
        let beta = |term: &str| {
            coefficients
                .iter()
                .find(|(name, _)| name == term)
                .map(|(_, b)| *b)
                .unwrap_or(0.0)
        };
        let mut rng = StdRng::seed_from_u64(self.seed);

        let mut age = Vec::with_capacity(self.rows);
        let mut months = Vec::with_capacity(self.rows);
        let mut deductible = Vec::with_capacity(self.rows);
        let mut premium = Vec::with_capacity(self.rows);
        let mut umbrella = Vec::with_capacity(self.rows);
        let mut sex = Vec::with_capacity(self.rows);
        let mut education = Vec::with_capacity(self.rows);
        let mut relationship = Vec::with_capacity(self.rows);
        let mut auto_year = Vec::with_capacity(self.rows);
        let mut severity = Vec::with_capacity(self.rows);

        for _ in 0..self.rows {
            let a = rng.random_range(19.0f64..64.0).round();
            let m = rng.random_range(0.0f64..480.0).round();
            let d = DEDUCTIBLES[rng.random_range(0..DEDUCTIBLES.len())];
            let p = (rng.random_range(500.0f64..2000.0) * 100.0).round() / 100.0;
            let u = UMBRELLA[rng.random_range(0..UMBRELLA.len())];
            let s = SEX[rng.random_range(0..SEX.len())];
            let e = EDUCATION[rng.random_range(0..EDUCATION.len())];
            let r = RELATIONSHIP[rng.random_range(0..RELATIONSHIP.len())];
            let y = AUTO_YEAR[rng.random_range(0..AUTO_YEAR.len())];

            let eta = beta("Intercept")
                + beta("age") * a
                + beta("months_as_customer") * m
                + beta("policy_deductable") * d
                + beta("policy_annual_premium") * p
                + beta("umbrella_limit") * u
                + beta(&format!("insured_sex[T.{s}]"))
                + beta(&format!("insured_education_level[T.{e}]"))
                + beta(&format!("insured_relationship[T.{r}]"))
                + beta(&format!("auto_year[T.{y}]"));
            let mean = eta.exp();
            let gamma = Gamma::new(self.shape, mean / self.shape).expect("valid gamma parameters");

            age.push(Some(a));
            months.push(Some(m));
            deductible.push(Some(d));
            premium.push(Some(p));
            umbrella.push(Some(u));
            sex.push(Some(s.to_string()));
            education.push(Some(e.to_string()));
            relationship.push(Some(r.to_string()));
            auto_year.push(Some(y.to_string()));
            severity.push(Some(rng.sample(gamma)));
        }

        let dataset = Dataset::new(vec![
            Column::numeric("months_as_customer", months),
            Column::numeric("age", age),
            Column::numeric("policy_deductable", deductible),
            Column::numeric("policy_annual_premium", premium),
            Column::numeric("umbrella_limit", umbrella),
            Column::text("insured_sex", sex).to_categorical(),
            Column::text("insured_education_level", education).to_categorical(),
            Column::text("insured_relationship", relationship).to_categorical(),
            Column::numeric("total_claim_amount", severity),
            Column::text("auto_year", auto_year).to_categorical(),
        ])
        .expect("simulated columns share a length");

        SimulatedClaims {
            dataset,
            coefficients,
        }
    }
}

/// Simulates a small claims sample with one numeric and one binary predictor
///
/// `severity = Gamma(shape, mean / shape)` with
/// `log(mean) = intercept + age_coef * age + male_coef * [sex == MALE]`.
pub fn simulate_simple_claims(
    rows: usize,
    shape: f64,
    seed: u64,
    intercept: f64,
    age_coef: f64,
    male_coef: f64,
) -> SimulatedClaims {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut age = Vec::with_capacity(rows);
    let mut sex = Vec::with_capacity(rows);
    let mut severity = Vec::with_capacity(rows);
    for _ in 0..rows {
        let a = f64::from(rng.random_range(19u8..64));
        let male = rng.random_bool(0.5);
        let mean = (intercept + age_coef * a + if male { male_coef } else { 0.0 }).exp();
        let gamma = Gamma::new(shape, mean / shape).expect("valid gamma parameters");
        age.push(Some(a));
        sex.push(Some(if male { "MALE" } else { "FEMALE" }.to_string()));
        severity.push(Some(rng.sample(gamma)));
    }
    let dataset = Dataset::new(vec![
        Column::numeric("age", age),
        Column::text("insured_sex", sex).to_categorical(),
        Column::numeric("total_claim_amount", severity),
    ])
    .expect("simulated columns share a length");
    SimulatedClaims {
        dataset,
        coefficients: vec![
            ("Intercept".to_string(), intercept),
            ("age".to_string(), age_coef),
            ("insured_sex[T.MALE]".to_string(), male_coef),
        ],
    }
}
