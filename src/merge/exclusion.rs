//! Labeled locus-range exclusions.
//!
//! The exclusion file is CSV, one inclusive range per line:
//!
//! ```text
//! label,start_loci,end_loci
//! ```
//!
//! Labels must be unique; ranges under different labels may overlap, in which
//! case the first matching label in file order claims the record.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use crate::merge::MergeError;
use crate::parsing::open_text;

/// One inclusive locus range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionRange {
    pub label: String,
    pub start: u64,
    pub end: u64,
}

/// All exclusion ranges for a run, in file order. Static once loaded.
#[derive(Debug, Default)]
pub struct ExclusionIndex {
    ranges: Vec<ExclusionRange>,
}

impl ExclusionIndex {
    /// An index that excludes nothing (no `--exclude` file given).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load ranges from a CSV file. Duplicate labels and malformed lines are
    /// fatal here, at load time, not at query time.
    pub fn load(path: &Path) -> Result<Self, MergeError> {
        use std::io::BufRead;

        let mut ranges = Vec::new();
        let mut labels: HashSet<String> = HashSet::new();

        let reader = open_text(path).map_err(|e| match e {
            crate::parsing::ParseError::Io(io) => MergeError::Io(io),
            other => MergeError::Io(std::io::Error::other(other.to_string())),
        })?;

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line_number = i + 1;

            let range = parse_line(&line).ok_or_else(|| MergeError::MalformedExclusionLine {
                line_number,
                text: line.clone(),
            })?;

            if !labels.insert(range.label.clone()) {
                return Err(MergeError::DuplicateExclusionLabel {
                    label: range.label,
                    line_number,
                });
            }

            debug!(label = %range.label, start = range.start, end = range.end, "loaded exclusion");
            ranges.push(range);
        }

        Ok(Self { ranges })
    }

    /// The label of the first range containing `locus`, in file order.
    #[must_use]
    pub fn lookup(&self, locus: u64) -> Option<&str> {
        self.ranges
            .iter()
            .find(|r| r.start <= locus && locus <= r.end)
            .map(|r| r.label.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }
}

fn parse_line(line: &str) -> Option<ExclusionRange> {
    let mut fields = line.split(',');
    let label = fields.next()?;
    let start = fields.next()?.parse().ok()?;
    let end = fields.next()?.parse().ok()?;
    if label.is_empty() || fields.next().is_some() {
        return None;
    }
    Some(ExclusionRange {
        label: label.to_string(),
        start,
        end,
    })
}
