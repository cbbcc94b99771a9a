//! The analysis pipeline: load, visualize, fit, report
//!
//! Stages run strictly in sequence. The modeling dataset is owned here and lent
//! to each stage; the first failure ends the run.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::info;

use core_kernel::{Dataset, Summary};
use domain_claims::{load_claims, write_dataset, ClaimDataError, LoadReport, LoadedClaims, SEVERITY};
use domain_severity::{fit, EffectTable, FittedModel, ModelSpec};
use infra_charts::{render_charts, ChartPaths};

use crate::config::AnalysisConfig;
use crate::error::{PipelineError, Stage};
use crate::report::AnalysisReport;

/// Everything a completed run produced
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub started_at: DateTime<Utc>,
    pub input_path: PathBuf,
    pub load: LoadReport,
    pub dataset: Dataset,
    /// Summary statistics of the severity column
    pub severity: Option<Summary>,
    pub charts: ChartPaths,
    pub model: FittedModel,
    /// Every non-intercept term, ranked
    pub effects: EffectTable,
    pub model_data_path: PathBuf,
    pub effects_path: PathBuf,
    /// Rows of the effect table shown in the report
    pub top_effects: usize,
}

impl AnalysisOutcome {
    /// Console report of the run
    pub fn report(&self) -> AnalysisReport<'_> {
        AnalysisReport::new(self)
    }
}

/// Runs the whole analysis
///
/// # Errors
///
/// A `PipelineError` naming the stage that failed and its cause
pub fn run(config: &AnalysisConfig) -> Result<AnalysisOutcome, PipelineError> {
    let started_at = Utc::now();

    info!(stage = %Stage::Load, input = %config.input_path.display(), "Stage started");
    let LoadedClaims { dataset, report } =
        load_claims(&config.input_path).map_err(PipelineError::Load)?;
    let severity = dataset
        .numeric(SEVERITY)
        .map(Summary::of_column)
        .map_err(|e| PipelineError::Load(e.into()))?;

    info!(stage = %Stage::Visualize, output_dir = %config.output_dir.display(), "Stage started");
    let charts = render_charts(&dataset, &config.output_dir, &config.chart_settings())
        .map_err(PipelineError::Visualize)?;

    info!(stage = %Stage::Fit, rows = dataset.n_rows(), "Stage started");
    let model = fit(&dataset, &ModelSpec::claim_severity(), &config.fit_options())
        .map_err(PipelineError::Fit)?;
    info!(
        parameters = model.n_params(),
        iterations = model.diagnostics.iterations,
        dispersion = model.dispersion,
        "Model fitted"
    );

    info!(stage = %Stage::Report, "Stage started");
    let effects = EffectTable::from_model(&model);
    write_dataset(&dataset, &config.model_data_path).map_err(PipelineError::Report)?;
    let effects_path = config.effects_path();
    write_effects(&effects, &effects_path).map_err(PipelineError::Report)?;

    info!("Analysis complete");
    Ok(AnalysisOutcome {
        started_at,
        input_path: config.input_path.clone(),
        load: report,
        dataset,
        severity,
        charts,
        model,
        effects,
        model_data_path: config.model_data_path.clone(),
        effects_path,
        top_effects: config.top_effects,
    })
}

/// Writes the full effect table as pretty-printed JSON
fn write_effects(effects: &EffectTable, path: &Path) -> Result<(), ClaimDataError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ClaimDataError::io(parent, e))?;
    }
    let json = effects.to_json().map_err(|e| ClaimDataError::io(path, e))?;
    fs::write(path, json).map_err(|e| ClaimDataError::io(path, e))?;
    info!(path = %path.display(), terms = effects.len(), "Effect table written");
    Ok(())
}
