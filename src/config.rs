//! Run configuration.
//!
//! The binary takes up to two positional arguments, the benchmark CSV and the
//! SVG to produce. Both have defaults, so a bare invocation in the directory
//! where the benchmarks ran is enough.

use std::path::PathBuf;

/// Input read when no path is given.
pub const DEFAULT_INPUT: &str = "benchmarks.csv";
/// Output written when no path is given.
pub const DEFAULT_OUTPUT: &str = "benchmarks.svg";

/// Figure-wide appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FigureStyle {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Title drawn above the grid.
    pub title: String,
}

impl Default for FigureStyle {
    fn default() -> Self {
        Self {
            width: 1800,
            height: 800,
            title: "Benchmark Results — Time & Memory (with Theoretical References)".to_string(),
        }
    }
}

/// Everything a report run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Benchmark CSV to read.
    pub input: PathBuf,
    /// SVG file to write.
    pub output: PathBuf,
    /// Figure appearance.
    pub style: FigureStyle,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            style: FigureStyle::default(),
        }
    }
}

impl ReportConfig {
    /// Builds a configuration from command-line arguments, program name
    /// excluded: `[<input.csv> [<output.svg>]]`.
    ///
    /// Arguments past the second are ignored with a warning.
    #[must_use]
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter().map(Into::into);

        if let Some(input) = args.next() {
            config.input = PathBuf::from(input);
        }
        if let Some(output) = args.next() {
            config.output = PathBuf::from(output);
        }

        let extra: Vec<String> = args.collect();
        if !extra.is_empty() {
            tracing::warn!(ignored = ?extra, "unexpected extra arguments");
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReportConfig::from_args(Vec::<String>::new());
        assert_eq!(config, ReportConfig::default());
        assert_eq!(config.input, PathBuf::from("benchmarks.csv"));
        assert_eq!(config.output, PathBuf::from("benchmarks.svg"));
        assert_eq!((config.style.width, config.style.height), (1800, 800));
    }

    #[test]
    fn test_input_only() {
        let config = ReportConfig::from_args(["runs/latest.csv"]);
        assert_eq!(config.input, PathBuf::from("runs/latest.csv"));
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT));
    }

    #[test]
    fn test_input_and_output() {
        let config = ReportConfig::from_args(["in.csv", "out/chart.svg", "stray"]);
        assert_eq!(config.input, PathBuf::from("in.csv"));
        assert_eq!(config.output, PathBuf::from("out/chart.svg"));
    }

    #[test]
    fn test_title_mentions_references() {
        assert!(FigureStyle::default().title.contains("Theoretical References"));
    }
}
