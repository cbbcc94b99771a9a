//! Severity histogram

use std::path::Path;

use plotters::prelude::*;

use crate::error::ChartError;
use crate::style::{self, ChartSettings, BAR_FILL, FONT_FAMILY};
use crate::HISTOGRAM_FILE;

/// Equal-width bins over `[min, max]`; every bin is half-open except the last,
/// which is closed
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` ascending bin edges
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bins `values` into `bins` equal-width bins
    ///
    /// When every value is equal the range is widened by 0.5 on each side.
    /// Returns `None` for an empty input or zero bins.
    pub fn compute(values: &[f64], bins: usize) -> Option<Self> {
        if values.is_empty() || bins == 0 {
            return None;
        }
        let (mut lo, mut hi) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins)
            .map(|i| if i == bins { hi } else { lo + width * i as f64 })
            .collect();

        let mut counts = vec![0; bins];
        for &v in values {
            let index = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[index] += 1;
        }
        Some(Self { edges, counts })
    }

    /// Total number of binned values
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// `(lower edge, upper edge, count)` per bin
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(edge, &count)| (edge[0], edge[1], count))
    }
}

/// Draws the histogram to a PNG file
pub fn render(
    histogram: &Histogram,
    path: &Path,
    settings: &ChartSettings,
) -> Result<(), ChartError> {
    draw(histogram, path, settings)
        .map_err(|e| ChartError::render(HISTOGRAM_FILE, e))
}

fn draw(
    histogram: &Histogram,
    path: &Path,
    settings: &ChartSettings,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, (settings.width, settings.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let x_range = histogram.edges[0]..histogram.edges[histogram.edges.len() - 1];
    let y_max = (histogram.max_count() as f64 * 1.05).max(1.0);

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Distribution of Claim Severity", (FONT_FAMILY, 22))
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Total claim amount")
        .y_desc("Number of claims")
        .x_labels(8)
        .x_label_formatter(&style::thousands)
        .label_style((FONT_FAMILY, 13))
        .draw()?;

    chart.draw_series(histogram.bins().map(|(lo, hi, count)| {
        Rectangle::new([(lo, 0.0), (hi, count as f64)], BAR_FILL.filled())
    }))?;
    chart.draw_series(histogram.bins().map(|(lo, hi, count)| {
        Rectangle::new([(lo, 0.0), (hi, count as f64)], WHITE.stroke_width(1))
    }))?;

    root.present()?;
    Ok(())
}
