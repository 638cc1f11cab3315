//! Submodule defining the errors used across the crate.

use plotters::drawing::DrawingAreaErrorKind;

/// Errors that abort a report run.
///
/// Only loading and output problems end up here. Issues confined to a single
/// panel are reported as [`PanelIssue`](crate::composer::PanelIssue) instead
/// and never stop the figure from being produced.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input was empty, so not even a header line was present.
    #[error("Benchmark input is empty: the header row is missing")]
    MissingHeader,

    /// A data line failed schema or numeric validation.
    #[error("Malformed record at line {line}: {reason} (`{content}`)")]
    MalformedRecord {
        /// 1-based line number of the offending row, header included.
        line: u64,
        /// The offending line as it appears in the input.
        content: String,
        /// What was wrong with the row.
        reason: String,
    },

    /// The CSV reader rejected the input.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Filesystem error outside of the CSV reader.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The drawing backend rejected an operation.
    #[error("Rendering failed: {0}")]
    Render(String),
}

impl<E> From<DrawingAreaErrorKind<E>> for Error
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        Error::Render(err.to_string())
    }
}

/// Type alias for results using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
