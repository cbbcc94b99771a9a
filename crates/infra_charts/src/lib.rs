//! Chart Infrastructure Layer
//!
//! This crate renders the exploratory charts of the severity analysis as PNG
//! files using plotters' bitmap backend.
//!
//! # Charts
//!
//! - `severity_histogram.png`: distribution of claim severity
//! - `severity_by_deductible.png`: severity box-plots per policy deductible
//!
//! The binning and box statistics are computed by pure functions
//! ([`Histogram::compute`], [`BoxStats::compute`]) so they can be tested
//! without drawing anything.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_charts::{render_charts, ChartSettings};
//!
//! let paths = render_charts(&dataset, Path::new("outputs"), &ChartSettings::default())?;
//! ```

pub mod histogram;
pub mod boxplot;
pub mod style;
pub mod error;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use core_kernel::Dataset;
use domain_claims::{DEDUCTIBLE, SEVERITY};

pub use boxplot::{group_by_key, BoxStats};
pub use error::ChartError;
pub use histogram::Histogram;
pub use style::{ChartSettings, FontSource};

/// File name of the severity histogram
pub const HISTOGRAM_FILE: &str = "severity_histogram.png";
/// File name of the severity-by-deductible box-plot
pub const BOXPLOT_FILE: &str = "severity_by_deductible.png";

/// Locations of the rendered charts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartPaths {
    pub histogram: PathBuf,
    pub boxplot: PathBuf,
}

/// Renders both exploratory charts into `output_dir`
///
/// The directory is created when absent.
///
/// # Errors
///
/// * `ChartError::Io` if the output directory cannot be created
/// * `ChartError::Data` if the severity or deductible column is absent or not numeric
/// * `ChartError::Render` if drawing or encoding a chart fails, or no font can be registered
pub fn render_charts(
    dataset: &Dataset,
    output_dir: &Path,
    settings: &ChartSettings,
) -> Result<ChartPaths, ChartError> {
    fs::create_dir_all(output_dir).map_err(|source| ChartError::Io {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let font = style::ensure_font(settings.font_path.as_deref())?;
    debug!(?font, "Chart font ready");
    let severity = dataset.numeric(SEVERITY)?;
    let deductible = dataset.numeric(DEDUCTIBLE)?;

    let values: Vec<f64> = severity.iter().flatten().copied().collect();
    let histogram = Histogram::compute(&values, settings.bins)
        .ok_or_else(|| ChartError::render(HISTOGRAM_FILE, "no severity values to plot"))?;
    let histogram_path = output_dir.join(HISTOGRAM_FILE);
    histogram::render(&histogram, &histogram_path, settings)?;
    info!(path = %histogram_path.display(), bins = histogram.counts.len(), "Histogram written");

    let groups: Vec<BoxStats> = group_by_key(deductible, severity)
        .into_iter()
        .filter_map(|(key, group)| BoxStats::compute(key, &group))
        .collect();
    if groups.is_empty() {
        return Err(ChartError::render(BOXPLOT_FILE, "no deductible groups to plot"));
    }
    let boxplot_path = output_dir.join(BOXPLOT_FILE);
    boxplot::render(&groups, &boxplot_path, settings)?;
    info!(path = %boxplot_path.display(), groups = groups.len(), "Box-plot written");

    Ok(ChartPaths {
        histogram: histogram_path,
        boxplot: boxplot_path,
    })
}
