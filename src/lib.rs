#![doc = include_str!("../README.md")]
#![deny(clippy::mod_module_files)]

pub mod composer;
pub mod config;
pub mod errors;
pub mod layout;
pub mod records;
pub mod reference;
pub mod render;
#[cfg(feature = "testing")]
pub mod testing;

pub use composer::{PanelIssue, PanelPlot, RenderSummary, compose, compose_panel, render_report};
pub use config::{FigureStyle, ReportConfig};
pub use errors::{Error, Result};
pub use layout::{GridPosition, PanelSpec, default_layout};
pub use records::{BenchmarkRecord, Dataset, OperationSeries, ValueField};
pub use reference::{CurveKind, ReferenceCurve, ReferenceError};
pub use render::ReportBuilder;

/// Loads `config.input`, renders the default report and writes it to
/// `config.output`.
///
/// Nothing is written when the input fails to load.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, or if the figure
/// cannot be written.
pub fn run(config: &ReportConfig) -> Result<RenderSummary> {
    tracing::info!(input = %config.input.display(), "loading benchmark records");
    let dataset = Dataset::from_path(&config.input)?;

    if let Some(parent) = config
        .output
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent)?;
    }

    let layout = default_layout();
    let builder = ReportBuilder::for_file(&config.output, &config.style)?;
    let summary = render_report(&dataset, &layout, builder)?;
    tracing::info!(output = %config.output.display(), "saved report");
    Ok(summary)
}
