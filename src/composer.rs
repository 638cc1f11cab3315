//! Panel composition: binds operation series and reference curves to the
//! report grid and drives the renderer.
//!
//! Composition itself is pure. [`compose_panel`] turns a [`PanelSpec`] into a
//! [`PanelPlot`] holding everything that will be drawn, and records any soft
//! problem as a [`PanelIssue`]. [`render_report`] then hands each plot an
//! explicit panel handle from the [`ReportBuilder`] and flushes the figure once.

use core::ops::Range;

use crate::errors::Result;
use crate::layout::{GRID_COLS, GRID_ROWS, GridPosition, PanelSpec};
use crate::records::{Dataset, OperationSeries};
use crate::reference::{CurveKind, ReferenceCurve, ReferenceError};
use crate::render::{ReportBuilder, draw_panel};

/// Fraction of the data span added on each side of the x axis.
const X_MARGIN: f64 = 0.05;
/// Fraction of the data span added on each side of the y axis.
const Y_MARGIN: f64 = 0.1;
/// Axis ends are kept within `±AXIS_LIMIT`, so an axis width never overflows.
const AXIS_LIMIT: f64 = f64::MAX / 4.0;
/// Smallest padding relative to the largest magnitude on the axis. Keeps tick
/// steps well above the float resolution of large coordinates.
const MIN_RELATIVE_PAD: f64 = 1e-6;

/// A recoverable problem with one panel. The panel is still drawn.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PanelIssue {
    /// The panel names an operation absent from the dataset.
    #[error("operation `{operation}` is not in the dataset")]
    UnresolvedOperation {
        /// The missing operation.
        operation: String,
    },
    /// The panel wants a reference curve but none of its operations resolved.
    #[error("no operation of the panel is in the dataset, reference curve omitted")]
    NoPrimaryOperation,
    /// The primary operation's series cannot support the reference curve.
    #[error("reference curve for `{operation}` omitted: {source}")]
    EmptyReferenceInput {
        /// The primary operation.
        operation: String,
        /// Why the curve could not be built.
        source: ReferenceError,
    },
    /// The panel's grid position does not exist in the figure.
    #[error("position {position} lies outside the {rows}x{cols} grid, panel skipped")]
    OutsideGrid {
        /// The requested position.
        position: GridPosition,
        /// Grid height.
        rows: usize,
        /// Grid width.
        cols: usize,
    },
    /// The drawing backend failed while drawing this panel.
    #[error("drawing failed: {0}")]
    Drawing(String),
}

/// One measured curve of a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    /// Legend label, the operation name.
    pub label: String,
    /// `(input_size, value)` pairs in ascending input size order.
    pub points: Vec<(u64, f64)>,
}

impl PlotSeries {
    fn from_series(series: &OperationSeries, spec: &PanelSpec) -> Self {
        Self {
            label: series.name().to_string(),
            points: series.points(spec.field),
        }
    }

    /// Points as plotting coordinates.
    pub fn coordinates(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().map(|&(x, y)| (x as f64, y))
    }
}

/// Axis ranges of a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisBounds {
    /// Horizontal range.
    pub x: Range<f64>,
    /// Vertical range.
    pub y: Range<f64>,
}

/// Everything drawn in one panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelPlot<'a> {
    /// The descriptor the plot was built from.
    pub spec: &'a PanelSpec,
    /// Measured curves, in the spec's operation order.
    pub series: Vec<PlotSeries>,
    /// Overlay computed from the primary operation, if any.
    pub reference: Option<ReferenceCurve>,
    /// Soft problems met while composing or drawing.
    pub issues: Vec<PanelIssue>,
}

impl PanelPlot<'_> {
    /// Whether the panel has no curve at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty() && self.reference.is_none()
    }

    /// Legend entries, measured curves first.
    #[must_use]
    pub fn legend_labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.series.iter().map(|s| s.label.as_str()).collect();
        if self.reference.is_some() {
            labels.extend(self.spec.curve.label());
        }
        labels
    }

    /// Axis ranges covering every drawn point, padded so that no point sits
    /// on the frame. An empty panel spans `0..1` on both axes.
    ///
    /// Both ranges are finite and non-empty. Coordinates beyond `±f64::MAX / 4`
    /// are clipped.
    #[must_use]
    pub fn bounds(&self) -> AxisBounds {
        let reference = self.reference.iter().flat_map(ReferenceCurve::points);
        let points = self
            .series
            .iter()
            .flat_map(PlotSeries::coordinates)
            .chain(reference)
            .filter(|(x, y)| x.is_finite() && y.is_finite());

        let mut extent: Option<(f64, f64, f64, f64)> = None;
        for (x, y) in points {
            extent = Some(match extent {
                None => (x, x, y, y),
                Some((x0, x1, y0, y1)) => (x0.min(x), x1.max(x), y0.min(y), y1.max(y)),
            });
        }

        match extent {
            None => AxisBounds {
                x: 0.0..1.0,
                y: 0.0..1.0,
            },
            Some((x0, x1, y0, y1)) => AxisBounds {
                x: padded(x0, x1, X_MARGIN),
                y: padded(y0, y1, Y_MARGIN),
            },
        }
    }
}

fn padded(lo: f64, hi: f64, fraction: f64) -> Range<f64> {
    let lo = lo.clamp(-AXIS_LIMIT, AXIS_LIMIT);
    let hi = hi.clamp(-AXIS_LIMIT, AXIS_LIMIT);
    let span = hi - lo;
    let magnitude = lo.abs().max(hi.abs());
    let pad = if span > 0.0 {
        (span * fraction).max(magnitude * MIN_RELATIVE_PAD)
    } else {
        (magnitude * fraction).max(0.5)
    };
    (lo - pad)..(hi + pad)
}

/// Counters of a finished report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    /// Panels drawn.
    pub panels: usize,
    /// Measured curves drawn across all panels.
    pub empirical_curves: usize,
    /// Reference overlays drawn across all panels.
    pub reference_curves: usize,
    /// Soft issues met across all panels.
    pub issues: usize,
}

/// Builds the plot of one panel.
///
/// Operations missing from the dataset are skipped. The reference curve, if
/// the spec asks for one, is computed from the first operation that resolved.
#[must_use]
pub fn compose_panel<'a>(dataset: &Dataset, spec: &'a PanelSpec) -> PanelPlot<'a> {
    let mut issues = Vec::new();
    let mut series = Vec::with_capacity(spec.operations.len());
    let mut primary: Option<&OperationSeries> = None;

    for operation in &spec.operations {
        let Some(found) = dataset.get(operation) else {
            issues.push(PanelIssue::UnresolvedOperation {
                operation: operation.clone(),
            });
            continue;
        };
        if primary.is_none() {
            primary = Some(found);
        }
        series.push(PlotSeries::from_series(found, spec));
    }

    let reference = match (spec.curve, primary) {
        (CurveKind::None, _) => None,
        (_, None) => {
            issues.push(PanelIssue::NoPrimaryOperation);
            None
        }
        (kind, Some(primary)) => {
            let xs = primary.input_sizes();
            let ys = primary.values(spec.field);
            match ReferenceCurve::generate(kind, &xs, &ys) {
                Ok(curve) => curve,
                Err(source) => {
                    issues.push(PanelIssue::EmptyReferenceInput {
                        operation: primary.name().to_string(),
                        source,
                    });
                    None
                }
            }
        }
    };

    for issue in &issues {
        tracing::warn!(panel = %spec.position, title = %spec.title, "{issue}");
    }

    PanelPlot {
        spec,
        series,
        reference,
        issues,
    }
}

/// Builds the plot of every panel, in layout order.
#[must_use]
pub fn compose<'a>(dataset: &Dataset, layout: &'a [PanelSpec]) -> Vec<PanelPlot<'a>> {
    layout
        .iter()
        .map(|spec| compose_panel(dataset, spec))
        .collect()
}

/// Composes and draws every panel of `layout` into `builder`, then flushes
/// the figure.
///
/// Per-panel problems never abort the report: they are logged and counted in
/// the returned summary.
///
/// # Errors
///
/// Returns an error only when the finished figure cannot be written out.
pub fn render_report(
    dataset: &Dataset,
    layout: &[PanelSpec],
    builder: ReportBuilder<'_>,
) -> Result<RenderSummary> {
    let mut summary = RenderSummary::default();

    for mut plot in compose(dataset, layout) {
        let position = plot.spec.position;
        match builder.panel(position) {
            Some(area) => {
                if let Err(err) = draw_panel(area, &plot) {
                    let issue = PanelIssue::Drawing(err.to_string());
                    tracing::warn!(panel = %position, "{issue}");
                    plot.issues.push(issue);
                }
                summary.panels += 1;
                summary.empirical_curves += plot.series.len();
                summary.reference_curves += usize::from(plot.reference.is_some());
            }
            None => {
                let issue = PanelIssue::OutsideGrid {
                    position,
                    rows: GRID_ROWS,
                    cols: GRID_COLS,
                };
                tracing::warn!(panel = %position, "{issue}");
                plot.issues.push(issue);
            }
        }
        summary.issues += plot.issues.len();
    }

    builder.finish()?;
    tracing::info!(
        panels = summary.panels,
        empirical_curves = summary.empirical_curves,
        reference_curves = summary.reference_curves,
        issues = summary.issues,
        "report rendered"
    );
    Ok(summary)
}
