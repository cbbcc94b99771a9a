//! Percentage effects of model terms on expected severity
//!
//! Under the log link a coefficient `beta` multiplies the expected severity by
//! `exp(beta)`, so its percentage effect is `(exp(beta) - 1) * 100`: per unit
//! of a numeric predictor, or relative to the reference level for a
//! categorical indicator. The intercept carries no such interpretation and is
//! left out.

use std::fmt;

use serde::{Deserialize, Serialize};

use core_kernel::format_thousands;

use crate::design::INTERCEPT;
use crate::model::FittedModel;

/// Percentage change in expected severity implied by a log-link coefficient
pub fn pct_effect(beta: f64) -> f64 {
    beta.exp_m1() * 100.0
}

/// One term of the effect table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectRow {
    pub term: String,
    pub coefficient: f64,
    pub pct_effect: f64,
}

impl EffectRow {
    pub fn new(term: impl Into<String>, coefficient: f64) -> Self {
        Self {
            term: term.into(),
            coefficient,
            pct_effect: pct_effect(coefficient),
        }
    }
}

/// All non-intercept terms ranked by descending absolute percentage effect
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectTable {
    rows: Vec<EffectRow>,
}

impl EffectTable {
    /// Builds the table from term / coefficient pairs, skipping the intercept
    ///
    /// Ties keep their input order.
    pub fn from_coefficients<'a, I>(coefficients: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut rows: Vec<EffectRow> = coefficients
            .into_iter()
            .filter(|(term, _)| *term != INTERCEPT)
            .map(|(term, beta)| EffectRow::new(term, beta))
            .collect();
        rows.sort_by(|a, b| b.pct_effect.abs().total_cmp(&a.pct_effect.abs()));
        Self { rows }
    }

    /// Builds the table from a fitted model
    pub fn from_model(model: &FittedModel) -> Self {
        Self::from_coefficients(model.params())
    }

    /// Every ranked row
    pub fn rows(&self) -> &[EffectRow] {
        &self.rows
    }

    /// The `n` largest effects
    pub fn top(&self, n: usize) -> &[EffectRow] {
        &self.rows[..n.min(self.rows.len())]
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, term: &str) -> Option<&EffectRow> {
        self.rows.iter().find(|r| r.term == term)
    }

    /// Printable view of the `n` largest effects
    pub fn display_top(&self, n: usize) -> EffectTableView<'_> {
        EffectTableView { rows: self.top(n) }
    }

    /// Pretty-printed JSON of every row
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.rows)
    }
}

/// Printable slice of an effect table
pub struct EffectTableView<'a> {
    rows: &'a [EffectRow],
}

impl fmt::Display for EffectTableView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .rows
            .iter()
            .map(|r| r.term.len())
            .max()
            .unwrap_or(0)
            .max(4);
        write!(f, "{:<width$} {:>12} {:>14}", "term", "coef", "pct_effect")?;
        for row in self.rows {
            write!(
                f,
                "\n{:<width$} {:>12.6} {:>13}%",
                row.term,
                row.coefficient,
                format_thousands(row.pct_effect, 2)
            )?;
        }
        Ok(())
    }
}
