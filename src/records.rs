//! Benchmark records and the loader that groups them per operation.
//!
//! The input is a comma-separated file with a mandatory header row followed
//! by rows of the form:
//!
//! ```text
//! Operation,InputSize,TimeNanoseconds,MemoryKB
//! <name>,<integer>,<float>,<float>
//! ```
//!
//! Rows are grouped by operation name and every group is stable-sorted by
//! input size once the whole input has been read.

use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::errors::{Error, Result};

/// Field delimiter of the benchmark file.
pub const DELIMITER: u8 = b',';

/// Number of fields every data row must have.
pub const FIELD_COUNT: usize = 4;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A single measurement row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BenchmarkRecord {
    /// Name of the benchmarked operation, e.g. `"MergeSort"`.
    pub operation: String,
    /// Input size the operation ran against.
    pub input_size: u64,
    /// Mean elapsed time in nanoseconds.
    pub time_ns: f64,
    /// Memory delta in kilobytes. May be negative when a collection ran
    /// during the measurement.
    pub memory_kb: f64,
}

/// Which measured quantity a chart plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueField {
    /// Elapsed time in nanoseconds.
    Time,
    /// Memory delta in kilobytes.
    Memory,
}

impl BenchmarkRecord {
    /// Returns the measured quantity selected by `field`.
    #[must_use]
    pub fn value(&self, field: ValueField) -> f64 {
        match field {
            ValueField::Time => self.time_ns,
            ValueField::Memory => self.memory_kb,
        }
    }
}

// ---------------------------------------------------------------------------
// Series
// ---------------------------------------------------------------------------

/// All records of one operation, ordered by ascending input size.
///
/// Repeated input sizes are kept, in their original relative order.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationSeries {
    name: String,
    records: Vec<BenchmarkRecord>,
}

impl OperationSeries {
    fn new(name: String) -> Self {
        Self {
            name,
            records: Vec::new(),
        }
    }

    /// Operation name shared by every record of the series.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Records in stored (sorted) order.
    #[must_use]
    pub fn records(&self) -> &[BenchmarkRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the series holds no record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Input sizes in stored order.
    #[must_use]
    pub fn input_sizes(&self) -> Vec<u64> {
        self.records.iter().map(|r| r.input_size).collect()
    }

    /// Values of `field` in stored order.
    #[must_use]
    pub fn values(&self, field: ValueField) -> Vec<f64> {
        self.records.iter().map(|r| r.value(field)).collect()
    }

    /// `(input_size, value)` pairs in stored order.
    #[must_use]
    pub fn points(&self, field: ValueField) -> Vec<(u64, f64)> {
        self.records
            .iter()
            .map(|r| (r.input_size, r.value(field)))
            .collect()
    }

    fn sort(&mut self) {
        // `sort_by_key` is stable: equal sizes keep their input order.
        self.records.sort_by_key(|r| r.input_size);
    }
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// Every operation series of one benchmark run, keyed by operation name.
///
/// Built once by the loader and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    series: IndexMap<String, OperationSeries>,
}

impl Dataset {
    /// Reads a benchmark file from `reader`.
    ///
    /// The first line is the header and is discarded, whatever it holds.
    /// Every following line must hold exactly four fields; a blank line is a
    /// malformed record.
    ///
    /// # Errors
    ///
    /// * [`Error::MissingHeader`] if the input is empty.
    /// * [`Error::MalformedRecord`] on the first line with the wrong field
    ///   count, an unparseable number, or a time that is negative or not
    ///   finite.
    /// * [`Error::Io`] if the reader fails or the input is not UTF-8.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        if text.is_empty() {
            return Err(Error::MissingHeader);
        }

        // The csv reader skips blank lines, so they are located up front.
        let first_blank = (1u64..)
            .zip(text.lines())
            .skip(1)
            .find(|(_, raw)| raw.trim().is_empty())
            .map(|(line, _)| line);

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let mut dataset = Self::default();
        let mut row = csv::StringRecord::new();
        let mut fallback_line = 0u64;

        while reader.read_record(&mut row)? {
            fallback_line += 1;
            let line = row.position().map_or(fallback_line, csv::Position::line);
            if line == 1 {
                continue;
            }
            if let Some(blank) = first_blank.filter(|&blank| blank < line) {
                return Err(blank_line(&text, blank));
            }
            let record = parse_row(&row, line, raw_line(&text, line))?;
            dataset.push(record);
        }
        if let Some(blank) = first_blank {
            return Err(blank_line(&text, blank));
        }

        for series in dataset.series.values_mut() {
            series.sort();
        }

        tracing::debug!(
            operations = dataset.len(),
            records = dataset.record_count(),
            "loaded benchmark dataset"
        );
        Ok(dataset)
    }

    /// Reads a benchmark file from disk.
    ///
    /// # Errors
    ///
    /// Same as [`Dataset::from_reader`], plus [`Error::Io`] when the file
    /// cannot be opened.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    fn push(&mut self, record: BenchmarkRecord) {
        self.series
            .entry(record.operation.clone())
            .or_insert_with_key(|name| OperationSeries::new(name.clone()))
            .records
            .push(record);
    }

    /// Looks up an operation by name.
    #[must_use]
    pub fn get(&self, operation: &str) -> Option<&OperationSeries> {
        self.series.get(operation)
    }

    /// Number of distinct operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether no data row was loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Total number of records across every operation.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.series.values().map(OperationSeries::len).sum()
    }

    /// Operation names, in order of first appearance.
    pub fn operations(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// All series, in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = &OperationSeries> {
        self.series.values()
    }
}

impl FromStr for Dataset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_reader(s.as_bytes())
    }
}

/// Physical line `line` of `text`, 1-based, without its terminator.
fn raw_line(text: &str, line: u64) -> &str {
    (1u64..)
        .zip(text.lines())
        .find(|&(n, _)| n == line)
        .map_or("", |(_, raw)| raw)
}

fn blank_line(text: &str, line: u64) -> Error {
    Error::MalformedRecord {
        line,
        content: raw_line(text, line).to_string(),
        reason: format!("expected {FIELD_COUNT} fields, found 1"),
    }
}

fn parse_row(row: &csv::StringRecord, line: u64, raw: &str) -> Result<BenchmarkRecord> {
    let malformed = |reason: String| Error::MalformedRecord {
        line,
        content: raw.to_string(),
        reason,
    };

    if row.len() != FIELD_COUNT {
        return Err(malformed(format!(
            "expected {FIELD_COUNT} fields, found {}",
            row.len()
        )));
    }

    let record: BenchmarkRecord = row
        .deserialize(None)
        .map_err(|err| malformed(deserialize_reason(&err)))?;

    if !record.time_ns.is_finite() || record.time_ns < 0.0 {
        return Err(malformed(format!(
            "time must be a finite, non-negative number, found {}",
            record.time_ns
        )));
    }

    Ok(record)
}

fn deserialize_reason(err: &csv::Error) -> String {
    match err.kind() {
        csv::ErrorKind::Deserialize { err, .. } => match err.field() {
            Some(index) => format!("invalid field {}: {}", index + 1, err.kind()),
            None => err.kind().to_string(),
        },
        _ => err.to_string(),
    }
}
