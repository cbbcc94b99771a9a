//! Claim Severity Analysis - Binary
//!
//! Runs the full analysis once and prints the report to stdout. Logs go to
//! stderr.
//!
//! # Usage
//!
//! ```bash
//! # Run with the standard layout (data/insurance_claims.csv -> outputs/)
//! cargo run --bin severity-analysis
//!
//! # Override locations through the environment
//! SEVERITY_INPUT_PATH=extract.csv SEVERITY_OUTPUT_DIR=charts cargo run --bin severity-analysis
//! ```
//!
//! # Environment Variables
//!
//! * `SEVERITY_INPUT_PATH` - Claims extract (default: data/insurance_claims.csv)
//! * `SEVERITY_OUTPUT_DIR` - Charts and effect table (default: outputs)
//! * `SEVERITY_MODEL_DATA_PATH` - Modeling dataset (default: data/df_model.csv)
//! * `SEVERITY_HISTOGRAM_BINS` - Histogram bins (default: 50)
//! * `SEVERITY_TOP_EFFECTS` - Effects shown in the report (default: 15)
//! * `SEVERITY_FONT_PATH` - TrueType font for chart text
//! * `SEVERITY_LOG_LEVEL` - trace, debug, info, warn, error (default: info); `RUST_LOG` wins when set

use anyhow::Context;
use interface_cli::{run, AnalysisConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = AnalysisConfig::from_env().context("invalid SEVERITY_* configuration")?;
    init_tracing(&config.log_level);

    tracing::info!(input = %config.input_path.display(), "Starting claim severity analysis");

    let outcome = run(&config)?;
    println!("{}", outcome.report());
    Ok(())
}

/// Initializes the tracing subscriber, writing to stderr
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}
