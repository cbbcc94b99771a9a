//! Analysis configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use domain_severity::FitOptions;
use infra_charts::ChartSettings;

/// Effect table written next to the charts
pub const EFFECTS_FILE: &str = "severity_effects.json";

/// Analysis configuration
///
/// Every field has a default, so an empty environment reproduces the standard
/// layout: `data/insurance_claims.csv` in, charts under `outputs/`, modeling
/// dataset at `data/df_model.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Claims extract to analyse
    pub input_path: PathBuf,
    /// Directory for charts and the effect table
    pub output_dir: PathBuf,
    /// Where the modeling dataset is written
    pub model_data_path: PathBuf,
    /// Histogram bins
    pub histogram_bins: usize,
    /// Rows of the effect table shown in the report
    pub top_effects: usize,
    /// Chart width in pixels
    pub chart_width: u32,
    /// Chart height in pixels
    pub chart_height: u32,
    /// TrueType font for chart text; the bundled DejaVu Sans is used when unset
    pub font_path: Option<PathBuf>,
    /// IRLS iteration bound
    pub max_iterations: usize,
    /// IRLS relative deviance tolerance
    pub tolerance: f64,
    /// Log level
    pub log_level: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("data/insurance_claims.csv"),
            output_dir: PathBuf::from("outputs"),
            model_data_path: PathBuf::from("data/df_model.csv"),
            histogram_bins: 50,
            top_effects: 15,
            chart_width: 800,
            chart_height: 500,
            font_path: None,
            max_iterations: 100,
            tolerance: 1e-8,
            log_level: "info".to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Loads configuration from `SEVERITY_`-prefixed environment variables
    ///
    /// `SEVERITY_OUTPUT_DIR=charts` sets `output_dir`; unset fields keep their
    /// defaults.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("SEVERITY").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Resolves the relative file locations against `root`
    pub fn rooted_at(mut self, root: &Path) -> Self {
        let resolve = |path: &Path| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                root.join(path)
            }
        };
        self.input_path = resolve(&self.input_path);
        self.output_dir = resolve(&self.output_dir);
        self.model_data_path = resolve(&self.model_data_path);
        self
    }

    /// IRLS controls
    pub fn fit_options(&self) -> FitOptions {
        FitOptions {
            max_iterations: self.max_iterations,
            tolerance: self.tolerance,
        }
    }

    /// Chart size, binning and font
    pub fn chart_settings(&self) -> ChartSettings {
        let settings = ChartSettings::new(self.chart_width, self.chart_height).bins(self.histogram_bins);
        match &self.font_path {
            Some(path) => settings.font_path(path),
            None => settings,
        }
    }

    /// Location of the JSON effect table
    pub fn effects_path(&self) -> PathBuf {
        self.output_dir.join(EFFECTS_FILE)
    }
}
