//! Benchmark complexity report generator.
//!
//! Reads the benchmark CSV and writes an SVG grid of time and memory charts,
//! each overlaid with its theoretical reference curve.
//!
//! Run: `cargo run --release [-- <input.csv> <output.svg>]`

use complexity_plot::ReportConfig;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let config = ReportConfig::from_args(std::env::args().skip(1));

    match complexity_plot::run(&config) {
        Ok(summary) => {
            if summary.issues > 0 {
                tracing::warn!(issues = summary.issues, "report rendered with issues");
            }
        }
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
}
