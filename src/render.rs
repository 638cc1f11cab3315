//! SVG rendering of the report with `plotters`.
//!
//! The figure is owned by a [`ReportBuilder`]: it draws the title, splits the
//! canvas into the report grid and hands out one drawing area per panel.
//! Nothing is written out until [`ReportBuilder::finish`].

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use crate::composer::PanelPlot;
use crate::config::FigureStyle;
use crate::errors::Result;
use crate::layout::{GRID_COLS, GRID_ROWS, GridPosition};

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

const PALETTE: [RGBColor; 4] = [
    RGBColor(52, 152, 219), //  blue
    RGBColor(230, 160, 0),  //  amber
    RGBColor(46, 204, 113), //  emerald
    RGBColor(231, 76, 60),  //  red
];

/// Reference overlays are drawn dashed in a neutral color.
const REFERENCE_COLOR: RGBColor = RGBColor(44, 62, 80);

const TITLE_FONT_SIZE: u32 = 22;
const CAPTION_FONT_SIZE: u32 = 15;
const AXIS_DESC_FONT_SIZE: u32 = 12;
const LABEL_FONT_SIZE: u32 = 11;
const LEGEND_FONT_SIZE: u32 = 11;

/// Drawing area of one panel.
pub type PanelArea<'a> = DrawingArea<SVGBackend<'a>, Shift>;

// ---------------------------------------------------------------------------
// Tick formatter (compact K / M suffixes)
// ---------------------------------------------------------------------------

fn compact(v: f64) -> String {
    let magnitude = v.abs();
    if magnitude >= 1_000_000.0 {
        format!("{:.1}M", v / 1_000_000.0)
    } else if magnitude >= 1_000.0 {
        format!("{:.1}K", v / 1_000.0)
    } else if magnitude >= 10.0 || magnitude < f64::EPSILON {
        format!("{v:.0}")
    } else {
        format!("{v:.1}")
    }
}

// ---------------------------------------------------------------------------
// Figure
// ---------------------------------------------------------------------------

/// Owns the figure for the duration of a report run.
pub struct ReportBuilder<'a> {
    root: PanelArea<'a>,
    panels: Vec<PanelArea<'a>>,
}

impl<'a> ReportBuilder<'a> {
    /// Starts a figure that will be written to `path` as SVG.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the initial drawing.
    pub fn for_file(path: &'a Path, style: &FigureStyle) -> Result<Self> {
        Self::with_root(
            SVGBackend::new(path, (style.width, style.height)).into_drawing_area(),
            style,
        )
    }

    /// Starts a figure whose SVG document is written into `buffer`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the initial drawing.
    pub fn for_string(buffer: &'a mut String, style: &FigureStyle) -> Result<Self> {
        Self::with_root(
            SVGBackend::with_string(buffer, (style.width, style.height)).into_drawing_area(),
            style,
        )
    }

    fn with_root(root: PanelArea<'a>, style: &FigureStyle) -> Result<Self> {
        root.fill(&WHITE)?;
        let body = root.titled(&style.title, ("sans-serif", TITLE_FONT_SIZE))?;
        let panels = body.split_evenly((GRID_ROWS, GRID_COLS));
        Ok(Self { root, panels })
    }

    /// Drawing area of the panel at `position`, or `None` outside the grid.
    #[must_use]
    pub fn panel(&self, position: GridPosition) -> Option<&PanelArea<'a>> {
        position
            .index_in(GRID_ROWS, GRID_COLS)
            .and_then(|index| self.panels.get(index))
    }

    /// Flushes the figure to its destination.
    ///
    /// # Errors
    ///
    /// Returns an error if the SVG document cannot be written.
    pub fn finish(self) -> Result<()> {
        self.root.present()?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Panel
// ---------------------------------------------------------------------------

/// Draws one composed panel into `area`.
///
/// Measured curves are solid lines with point markers, the reference curve is
/// dashed. A legend is drawn when the panel has at least one curve.
///
/// # Errors
///
/// Returns an error if the backend rejects a drawing operation.
pub fn draw_panel(area: &PanelArea<'_>, plot: &PanelPlot<'_>) -> Result<()> {
    let spec = plot.spec;
    let bounds = plot.bounds();

    let mut chart = ChartBuilder::on(area)
        .caption(&spec.title, ("sans-serif", CAPTION_FONT_SIZE))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(56)
        .build_cartesian_2d(bounds.x, bounds.y)?;

    chart
        .configure_mesh()
        .x_desc(spec.x_label.as_str())
        .y_desc(spec.y_label.as_str())
        .x_labels(6)
        .label_style(("sans-serif", LABEL_FONT_SIZE))
        .axis_desc_style(("sans-serif", AXIS_DESC_FONT_SIZE))
        .x_label_formatter(&|x| compact(*x))
        .y_label_formatter(&|y| compact(*y))
        .draw()?;

    for (i, series) in plot.series.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let points: Vec<(f64, f64)> = series.coordinates().collect();

        chart
            .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))?
            .label(series.label.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
        chart.draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
        )?;
    }

    if let (Some(reference), Some(label)) = (&plot.reference, spec.curve.label()) {
        let points: Vec<(f64, f64)> = reference.points().collect();
        chart
            .draw_series(DashedLineSeries::new(
                points,
                8,
                5,
                REFERENCE_COLOR.stroke_width(2),
            ))?
            .label(label)
            .legend(|(x, y)| {
                PathElement::new(vec![(x, y), (x + 8, y)], REFERENCE_COLOR.stroke_width(2))
            });
    }

    if !plot.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .margin(8)
            .background_style(WHITE.mix(0.9))
            .border_style(BLACK.mix(0.3))
            .label_font(("sans-serif", LEGEND_FONT_SIZE))
            .draw()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_ticks() {
        assert_eq!(compact(0.0), "0");
        assert_eq!(compact(2.5), "2.5");
        assert_eq!(compact(-4.0), "-4.0");
        assert_eq!(compact(512.0), "512");
        assert_eq!(compact(2_500.0), "2.5K");
        assert_eq!(compact(-1_500.0), "-1.5K");
        assert_eq!(compact(3_200_000.0), "3.2M");
    }

    #[test]
    fn test_panels_cover_grid() {
        let mut svg = String::new();
        let builder = ReportBuilder::for_string(&mut svg, &FigureStyle::default()).unwrap();
        assert!(builder.panel(GridPosition::new(0, 0)).is_some());
        assert!(builder.panel(GridPosition::new(1, 3)).is_some());
        assert!(builder.panel(GridPosition::new(2, 0)).is_none());
        builder.finish().unwrap();
        assert!(svg.contains("<svg"));
    }
}
