//! Severity box-plots grouped by deductible

use std::path::Path;

use plotters::prelude::*;

use core_kernel::{format_number, quantile};

use crate::error::ChartError;
use crate::style::{self, ChartSettings, BOX_FILL, FONT_FAMILY, OUTLINE};
use crate::BOXPLOT_FILE;

const WHISKER_IQR: f64 = 1.5;
const BOX_HALF_WIDTH: f64 = 0.3;

/// Box-plot statistics of one group
///
/// Quartiles interpolate linearly. Each whisker reaches the furthest value
/// within 1.5 IQR of the box and never falls inside it; values beyond the
/// whiskers are outliers.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    /// Group key, here the deductible amount
    pub key: f64,
    pub count: usize,
    pub whisker_low: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// Computes the statistics of `values`, `None` when empty
    pub fn compute(key: f64, values: &[f64]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile(&sorted, 0.25)?;
        let median = quantile(&sorted, 0.5)?;
        let q3 = quantile(&sorted, 0.75)?;
        let iqr = q3 - q1;
        let low_fence = q1 - WHISKER_IQR * iqr;
        let high_fence = q3 + WHISKER_IQR * iqr;

        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&v| v >= low_fence)
            .map_or(q1, |v| v.min(q1));
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= high_fence)
            .map_or(q3, |v| v.max(q3));
        let outliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < low_fence || v > high_fence)
            .collect();

        Some(Self {
            key,
            count: sorted.len(),
            whisker_low,
            q1,
            median,
            q3,
            whisker_high,
            outliers,
        })
    }

    /// Axis label of the group
    pub fn label(&self) -> String {
        format_number(self.key)
    }

    /// Lowest drawn value, including outliers
    pub fn lowest(&self) -> f64 {
        self.outliers.iter().copied().fold(self.whisker_low, f64::min)
    }

    /// Highest drawn value, including outliers
    pub fn highest(&self) -> f64 {
        self.outliers.iter().copied().fold(self.whisker_high, f64::max)
    }
}

/// Groups `values` by the distinct values of `keys`, keys ascending
///
/// Rows where either side is missing are skipped. Within a group values keep
/// their row order.
pub fn group_by_key(keys: &[Option<f64>], values: &[Option<f64>]) -> Vec<(f64, Vec<f64>)> {
    let mut pairs: Vec<(f64, f64)> = keys
        .iter()
        .zip(values)
        .filter_map(|(k, v)| Some(((*k)?, (*v)?)))
        .collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut groups: Vec<(f64, Vec<f64>)> = Vec::new();
    for (key, value) in pairs {
        match groups.last_mut() {
            Some((last, group)) if *last == key => group.push(value),
            _ => groups.push((key, vec![value])),
        }
    }
    groups
}

/// Draws one box per group to a PNG file
pub fn render(
    groups: &[BoxStats],
    path: &Path,
    settings: &ChartSettings,
) -> Result<(), ChartError> {
    draw(groups, path, settings).map_err(|e| ChartError::render(BOXPLOT_FILE, e))
}

fn draw(
    groups: &[BoxStats],
    path: &Path,
    settings: &ChartSettings,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, (settings.width, settings.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let lowest = groups.iter().map(BoxStats::lowest).fold(0.0, f64::min);
    let highest = groups.iter().map(BoxStats::highest).fold(f64::NEG_INFINITY, f64::max);
    let pad = ((highest - lowest) * 0.05).max(1.0);
    let x_range = -0.5..(groups.len() as f64 - 0.5);
    let y_range = (lowest - pad)..(highest + pad);

    let labels: Vec<String> = groups.iter().map(BoxStats::label).collect();
    let x_formatter = |x: &f64| {
        let index = x.round();
        if (x - index).abs() > 1e-6 || index < 0.0 {
            return String::new();
        }
        labels.get(index as usize).cloned().unwrap_or_default()
    };

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Claim Severity by Policy Deductible", (FONT_FAMILY, 22))
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Policy deductible")
        .y_desc("Total claim amount")
        .x_labels(groups.len() * 2 + 1)
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&style::thousands)
        .label_style((FONT_FAMILY, 13))
        .draw()?;

    for (i, stats) in groups.iter().enumerate() {
        let x = i as f64;
        let (left, right) = (x - BOX_HALF_WIDTH, x + BOX_HALF_WIDTH);
        let cap = BOX_HALF_WIDTH / 2.0;

        chart.draw_series([
            Rectangle::new([(left, stats.q1), (right, stats.q3)], BOX_FILL.filled()),
            Rectangle::new([(left, stats.q1), (right, stats.q3)], OUTLINE.stroke_width(1)),
        ])?;
        chart.draw_series([
            PathElement::new(vec![(left, stats.median), (right, stats.median)], OUTLINE.stroke_width(2)),
            PathElement::new(vec![(x, stats.q3), (x, stats.whisker_high)], OUTLINE.stroke_width(1)),
            PathElement::new(vec![(x, stats.q1), (x, stats.whisker_low)], OUTLINE.stroke_width(1)),
            PathElement::new(
                vec![(x - cap, stats.whisker_high), (x + cap, stats.whisker_high)],
                OUTLINE.stroke_width(1),
            ),
            PathElement::new(
                vec![(x - cap, stats.whisker_low), (x + cap, stats.whisker_low)],
                OUTLINE.stroke_width(1),
            ),
        ])?;
        chart.draw_series(
            stats
                .outliers
                .iter()
                .map(|&y| Circle::new((x, y), 3, OUTLINE.stroke_width(1))),
        )?;
    }

    root.present()?;
    Ok(())
}
