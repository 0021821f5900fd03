//! Ordered collection of student records.
//!
//! Records keep input order until [`RecordCollection::sort_by_order`] is
//! called. Duplicate ids are allowed; [`RecordCollection::duplicate_ids`]
//! reports them without removing anything.

use crate::error::RecordError;
use crate::io::{LineSink, LineSource, UndecodableLine};
use crate::record::{MAX_AVERAGE, MIN_AVERAGE, Record};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Header written in front of rendered rows when saving with a header.
pub const HEADER: &str = "id;firstName;lastName;average";

/// A data line that was not loaded, and why.
#[derive(Debug)]
pub struct SkippedRow {
    /// 1-based line number in the input, header included.
    pub line: usize,
    pub text: String,
    pub error: RecordError,
}

impl fmt::Display for SkippedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.error)
    }
}

/// Outcome of [`RecordCollection::populate`].
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedRow>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// An ordered sequence of validated records.
#[derive(Debug, Clone, Default)]
pub struct RecordCollection {
    records: Vec<Record>,
}

impl RecordCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with the records parsed from `lines`.
    ///
    /// The first line is a header and is skipped without inspection. Every
    /// other line must be a data row; one that does not parse into a valid
    /// record (blank lines included) is skipped and listed in the returned
    /// report, and loading carries on with the next line.
    pub fn populate<I, S>(&mut self, lines: I) -> LoadReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.populate_lines(lines.into_iter().map(Ok::<S, UndecodableLine>))
    }

    /// Like [`populate`](Self::populate), for lines that may have failed to
    /// decode. An undecodable line is skipped as a malformed row.
    pub fn populate_lines<I, S>(&mut self, lines: I) -> LoadReport
    where
        I: IntoIterator<Item = Result<S, UndecodableLine>>,
        S: AsRef<str>,
    {
        self.records.clear();
        let mut report = LoadReport::default();

        for (idx, line) in lines.into_iter().enumerate().skip(1) {
            let parsed = match &line {
                Ok(text) => Record::from_line(text.as_ref()),
                Err(bad) => Err(RecordError::malformed(format!(
                    "not valid UTF-8 after byte {}",
                    bad.valid_up_to
                ))),
            };
            match parsed {
                Ok(record) => self.records.push(record),
                Err(error) => {
                    let text = match line {
                        Ok(text) => text.as_ref().to_string(),
                        Err(bad) => bad.lossy,
                    };
                    let skipped = SkippedRow {
                        line: idx + 1,
                        text,
                        error,
                    };
                    tracing::warn!(line = skipped.line, error = %skipped.error, "skipping row");
                    report.skipped.push(skipped);
                }
            }
        }

        report.loaded = self.records.len();
        tracing::debug!(
            loaded = report.loaded,
            skipped = report.skipped.len(),
            "populated records"
        );
        report
    }

    /// Read all lines from `source` and [`populate`](Self::populate) from them.
    ///
    /// An I/O failure is returned as is and leaves the collection untouched.
    pub fn load_from<S: LineSource + ?Sized>(
        &mut self,
        source: &S,
    ) -> Result<LoadReport, RecordError> {
        let lines = source.read_lines()?;
        Ok(self.populate_lines(lines))
    }

    /// Add `delta` to every average, clamping the result to `[0, 100]`.
    ///
    /// A NaN or infinite delta is rejected before any record changes.
    pub fn bulk_adjust_average(&mut self, delta: f64) -> Result<(), RecordError> {
        if !delta.is_finite() {
            return Err(RecordError::InvalidDelta(delta));
        }
        for record in &mut self.records {
            let adjusted = (record.average() + delta).clamp(MIN_AVERAGE, MAX_AVERAGE);
            record.set_average(adjusted)?;
        }
        tracing::debug!(delta, records = self.records.len(), "adjusted averages");
        Ok(())
    }

    /// Stable sort by [`Record::compare_order`]: first name, then last name.
    pub fn sort_by_order(&mut self) {
        self.records.sort_by(Record::compare_order);
    }

    /// One data line per record, in collection order. No header.
    pub fn render(&self) -> Vec<String> {
        self.records.iter().map(Record::to_line).collect()
    }

    /// Write the rendered rows to `sink`, preceded by `header` when given.
    pub fn save_to<S: LineSink + ?Sized>(
        &self,
        sink: &S,
        header: Option<&str>,
    ) -> Result<(), RecordError> {
        let lines: Vec<String> = header
            .map(str::to_string)
            .into_iter()
            .chain(self.render())
            .collect();
        sink.write_lines(&lines)
    }

    /// Ids shared by more than one record, in order of first appearance.
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for record in &self.records {
            *counts.entry(record.identity_key()).or_default() += 1;
        }
        let mut seen = HashSet::new();
        let mut dups = Vec::new();
        for record in &self.records {
            let key = record.identity_key();
            if counts.get(key).is_some_and(|&n| n > 1) && seen.insert(key) {
                dups.push(key);
            }
        }
        dups
    }

    /// The first record with the given id.
    pub fn find(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.identity_key() == id)
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a RecordCollection {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<Record> for RecordCollection {
    fn from_iter<T: IntoIterator<Item = Record>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

/// Each record's diagnostic form on its own line.
impl fmt::Display for RecordCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in &self.records {
            writeln!(f, "{record}")?;
        }
        Ok(())
    }
}
