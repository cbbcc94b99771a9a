//! Console report

use std::fmt;

use domain_claims::SEVERITY;

use crate::pipeline::AnalysisOutcome;

/// Human-readable report of a completed run
pub struct AnalysisReport<'a> {
    outcome: &'a AnalysisOutcome,
}

impl<'a> AnalysisReport<'a> {
    pub fn new(outcome: &'a AnalysisOutcome) -> Self {
        Self { outcome }
    }
}

impl fmt::Display for AnalysisReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = self.outcome;
        let (rows, columns) = o.dataset.shape();

        writeln!(f, "Claim Severity Analysis")?;
        writeln!(f, "Run at: {}", o.started_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
        writeln!(f, "Input:  {}", o.input_path.display())?;
        writeln!(f)?;

        writeln!(f, "Modeling dataset: {rows} rows x {columns} columns")?;
        if o.load.dropped_rows > 0 {
            writeln!(f, "Rows dropped for missing {SEVERITY}: {}", o.load.dropped_rows)?;
        }
        writeln!(f, "Variables:")?;
        for column in o.dataset.columns() {
            writeln!(f, "  {:<30} {}", column.name(), column.kind())?;
        }
        if !o.load.absent_columns.is_empty() {
            writeln!(f, "Not in input: {}", o.load.absent_columns.join(", "))?;
        }
        writeln!(f)?;

        writeln!(f, "{SEVERITY} summary:")?;
        match &o.severity {
            Some(summary) => writeln!(f, "{summary}")?,
            None => writeln!(f, "no values")?,
        }
        writeln!(f)?;

        writeln!(f, "{}", o.model.summary())?;
        writeln!(f)?;

        let shown = o.top_effects.min(o.effects.len());
        writeln!(f, "Top {shown} effects on expected severity:")?;
        writeln!(f, "{}", o.effects.display_top(o.top_effects))?;
        writeln!(f)?;

        writeln!(f, "Outputs:")?;
        writeln!(f, "  {}", o.charts.histogram.display())?;
        writeln!(f, "  {}", o.charts.boxplot.display())?;
        writeln!(f, "  {}", o.model_data_path.display())?;
        write!(f, "  {}", o.effects_path.display())
    }
}
