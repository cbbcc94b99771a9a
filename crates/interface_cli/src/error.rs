//! Pipeline error handling

use std::fmt;

use thiserror::Error;

use domain_claims::ClaimDataError;
use domain_severity::FitError;
use infra_charts::ChartError;

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Load,
    Visualize,
    Fit,
    Report,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Stage::Load => "load",
            Stage::Visualize => "visualize",
            Stage::Fit => "fit",
            Stage::Report => "report",
        })
    }
}

/// A failed stage and its cause
///
/// No stage recovers from another's failure; the first error ends the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("load stage failed: {0}")]
    Load(#[source] ClaimDataError),

    #[error("visualize stage failed: {0}")]
    Visualize(#[source] ChartError),

    #[error("fit stage failed: {0}")]
    Fit(#[source] FitError),

    #[error("report stage failed: {0}")]
    Report(#[source] ClaimDataError),
}

impl PipelineError {
    /// The stage that failed
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Load(_) => Stage::Load,
            PipelineError::Visualize(_) => Stage::Visualize,
            PipelineError::Fit(_) => Stage::Fit,
            PipelineError::Report(_) => Stage::Report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_stage_and_cause() {
        let err = PipelineError::Fit(FitError::MissingResponse("total_claim_amount".into()));
        assert_eq!(err.stage(), Stage::Fit);
        let text = err.to_string();
        assert!(text.starts_with("fit stage failed"), "{text}");
        assert!(text.contains("total_claim_amount"), "{text}");
        assert!(std::error::Error::source(&err).is_some());
    }
}
