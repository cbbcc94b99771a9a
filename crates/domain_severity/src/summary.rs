//! Regression summary table

use std::fmt;

use crate::model::FittedModel;

const RULE_WIDTH: usize = 96;

/// Human-readable summary of a fitted model
pub struct GlmSummary<'a> {
    model: &'a FittedModel,
}

impl<'a> GlmSummary<'a> {
    pub fn new(model: &'a FittedModel) -> Self {
        Self { model }
    }
}

impl fmt::Display for GlmSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.model;
        let d = &m.diagnostics;
        let heavy = "=".repeat(RULE_WIDTH);
        let light = "-".repeat(RULE_WIDTH);

        writeln!(f, "{:^width$}", "Generalized Linear Model Regression Results", width = RULE_WIDTH)?;
        writeln!(f, "{heavy}")?;
        writeln!(f, "{:<18}{:>28}   {:<18}{:>29}", "Dep. Variable:", m.response, "No. Observations:", d.n_obs)?;
        writeln!(f, "{:<18}{:>28}   {:<18}{:>29}", "Model:", "GLM", "Df Residuals:", d.df_resid)?;
        writeln!(f, "{:<18}{:>28}   {:<18}{:>29}", "Model Family:", m.family, "Df Model:", d.df_model)?;
        writeln!(f, "{:<18}{:>28}   {:<18}{:>29.6}", "Link Function:", m.link, "Scale:", m.dispersion)?;
        writeln!(f, "{:<18}{:>28}   {:<18}{:>29.2}", "Method:", "IRLS", "Log-Likelihood:", d.log_likelihood)?;
        writeln!(f, "{:<18}{:>28.4}   {:<18}{:>29.4}", "Deviance:", d.deviance, "Pearson chi2:", d.pearson_chi2)?;
        writeln!(f, "{:<18}{:>28.4}   {:<18}{:>29.2}", "Null Deviance:", d.null_deviance, "AIC:", d.aic)?;
        writeln!(f, "{:<18}{:>28}   {:<18}{:>29.2}", "No. Iterations:", d.iterations, "BIC:", d.bic)?;
        writeln!(f, "{heavy}")?;

        let term_width = m
            .coefficients
            .iter()
            .map(|c| c.term.len())
            .max()
            .unwrap_or(0)
            .max(10);
        writeln!(
            f,
            "{:<tw$} {:>11} {:>10} {:>8} {:>7} {:>11} {:>11}",
            "",
            "coef",
            "std err",
            "z",
            "P>|z|",
            "[0.025",
            "0.975]",
            tw = term_width
        )?;
        writeln!(f, "{light}")?;
        for c in &m.coefficients {
            let (lo, hi) = c.conf_int();
            writeln!(
                f,
                "{:<tw$} {:>11.4} {:>10.4} {:>8.3} {:>7.3} {:>11.4} {:>11.4} {}",
                c.term,
                c.estimate,
                c.std_error,
                c.z_value,
                c.p_value,
                lo,
                hi,
                c.significance(),
                tw = term_width
            )?;
        }
        writeln!(f, "{heavy}")?;
        write!(f, "Signif. codes: 0 '***' 0.001 '**' 0.01 '*' 0.05 '.' 0.1 ' ' 1")?;

        if !m.omitted_predictors.is_empty() {
            write!(f, "\nOmitted predictors (absent from data): {}", m.omitted_predictors.join(", "))?;
        }
        if m.excluded_rows > 0 {
            write!(f, "\nRows excluded for missing values: {}", m.excluded_rows)?;
        }
        Ok(())
    }
}
