//! Descriptive statistics
//!
//! Conventions follow the usual data-frame `describe()` output: the standard
//! deviation uses the sample (n - 1) denominator and quantiles interpolate
//! linearly between order statistics.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::format::format_thousands;

/// Linearly interpolated quantile of an ascending slice
///
/// Returns `None` for an empty slice. `q` is clamped to `[0, 1]`.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let q = q.clamp(0.0, 1.0);
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

/// Summary statistics of a numeric sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation, `None` with fewer than two observations
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl Summary {
    /// Summarizes the non-missing values of a column
    ///
    /// Returns `None` when no value is present.
    pub fn of_column(values: &[Option<f64>]) -> Option<Self> {
        let present: Vec<f64> = values.iter().flatten().copied().collect();
        Self::of(&present)
    }

    /// Summarizes a sample, `None` when empty
    pub fn of(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;
        let std = (count > 1).then(|| {
            let ss: f64 = sorted.iter().map(|x| (x - mean).powi(2)).sum();
            (ss / (count - 1) as f64).sqrt()
        });

        Some(Self {
            count,
            mean,
            std,
            min: sorted[0],
            q25: quantile(&sorted, 0.25)?,
            median: quantile(&sorted, 0.5)?,
            q75: quantile(&sorted, 0.75)?,
            max: sorted[count - 1],
        })
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let std = self
            .std
            .map(|s| format_thousands(s, 2))
            .unwrap_or_else(|| "NaN".to_string());
        writeln!(f, "{:<6} {:>16}", "count", self.count)?;
        writeln!(f, "{:<6} {:>16}", "mean", format_thousands(self.mean, 2))?;
        writeln!(f, "{:<6} {:>16}", "std", std)?;
        writeln!(f, "{:<6} {:>16}", "min", format_thousands(self.min, 2))?;
        writeln!(f, "{:<6} {:>16}", "25%", format_thousands(self.q25, 2))?;
        writeln!(f, "{:<6} {:>16}", "50%", format_thousands(self.median, 2))?;
        writeln!(f, "{:<6} {:>16}", "75%", format_thousands(self.q75, 2))?;
        write!(f, "{:<6} {:>16}", "max", format_thousands(self.max, 2))
    }
}
