//! Reader for k-mer assembly variant-caller output (k28.out).
//!
//! Files carry a `#<strain>/<ref_genome>` header comment, then body lines:
//!
//! ```text
//! 0 <locus> left=<seq> sample=<seq> ref=<seq> right=<seq>
//! ```
//!
//! The locus column uses a convention one position below everything else, so
//! each parsed locus is incremented by exactly one. `#` and `>` lines may
//! appear anywhere in the body and are skipped as comments.

use std::io::{BufRead, Lines};
use std::path::Path;

use tracing::debug;

use crate::core::record::{SnpRecord, StrainContext};
use crate::core::types::{IndelKind, InputFormat, Locus};
use crate::parsing::sniffer::is_strain_header;
use crate::parsing::{file_name_of, is_base_run, open_text, ParseError};

pub struct AssemblyReader {
    context: StrainContext,
    lines: Lines<Box<dyn BufRead>>,
    line_number: usize,
}

impl AssemblyReader {
    /// Open a k28 file: extract the strain ID from the header comments, then
    /// position a fresh handle for record iteration.
    pub fn open(path: &Path) -> Result<Self, ParseError> {
        let file_name = file_name_of(path);
        let strain_id = read_strain_id(path)?;
        if strain_id.is_none() {
            debug!(file = %file_name, "no strain header before data; strain ID unset");
        }

        Ok(Self {
            context: StrainContext {
                strain_id,
                file_name,
                format: InputFormat::AssemblyCaller,
            },
            lines: open_text(path)?.lines(),
            line_number: 0,
        })
    }

    #[must_use]
    pub fn context(&self) -> &StrainContext {
        &self.context
    }

    fn parse_body_line(&self, line: &str) -> Result<SnpRecord, ParseError> {
        let unrecognized = || ParseError::UnrecognizedLine {
            file: self.context.file_name.clone(),
            line_number: self.line_number,
            text: line.to_string(),
        };

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(unrecognized());
        }

        if !fields[0].bytes().all(|b| b.is_ascii_digit()) {
            return Err(unrecognized());
        }
        let locus: u64 = fields[1].parse().map_err(|_| unrecognized())?;

        let left = fields[2].strip_prefix("left=").ok_or_else(unrecognized)?;
        let snp_base = fields[3].strip_prefix("sample=").ok_or_else(unrecognized)?;
        let ref_base = fields[4].strip_prefix("ref=").ok_or_else(unrecognized)?;
        let right = fields[5].strip_prefix("right=").ok_or_else(unrecognized)?;

        if ![left, snp_base, ref_base, right].iter().all(|s| is_base_run(s)) {
            return Err(unrecognized());
        }

        Ok(SnpRecord {
            raw_line: line.to_string(),
            line_number: self.line_number,
            // k28 loci are offset one below the shared coordinate convention
            locus: Locus::Point(locus + 1),
            snp_base: snp_base.to_string(),
            ref_base: ref_base.to_string(),
            indel: classify_by_length(snp_base, ref_base),
        })
    }
}

impl Iterator for AssemblyReader {
    type Item = Result<SnpRecord, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_number += 1;

            // Comments (header included) and `>` genbank lines are not data
            if line.starts_with('#') || line.starts_with('>') {
                continue;
            }

            return Some(self.parse_body_line(&line));
        }
    }
}

/// Strain ID from the first `#<strain>/<anything>` comment before data begins.
fn read_strain_id(path: &Path) -> Result<Option<String>, ParseError> {
    let reader = open_text(path)?;
    for line in reader.lines() {
        let line = line?;
        if is_strain_header(&line) {
            let rest = &line[1..];
            let id = &rest[..rest.find('/').unwrap_or(rest.len())];
            return Ok(Some(id.to_string()));
        }
        if !(line.starts_with('#') || line.starts_with('>')) {
            // Data has begun; no strain header was seen
            break;
        }
    }
    Ok(None)
}

/// Length-based indel classification shared by the k28 and NUCMER readers.
///
/// A sample run of length other than one is an indel outright (empty means
/// deletion, longer means insertion). A single sample base against a
/// non-single reference is also an indel: empty reference means insertion,
/// longer reference means deletion.
pub(crate) fn classify_by_length(snp_base: &str, ref_base: &str) -> Option<IndelKind> {
    if snp_base.len() != 1 {
        if snp_base.is_empty() {
            Some(IndelKind::Deletion)
        } else {
            Some(IndelKind::Insertion)
        }
    } else if ref_base.len() != 1 {
        if ref_base.is_empty() {
            Some(IndelKind::Insertion)
        } else {
            Some(IndelKind::Deletion)
        }
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_reads_strain_and_records() {
        let file = write_temp(
            "#ST42/ref_genome.fasta\n\
             >gi|12345|ref\n\
             0 100 left=ACGT sample=G ref=A right=TTTT\n\
             0 205 left=ACGT sample=T ref=C right=GGGG\n",
        );

        let reader = AssemblyReader::open(file.path()).unwrap();
        assert_eq!(reader.context().strain_id.as_deref(), Some("ST42"));
        assert_eq!(reader.context().format, InputFormat::AssemblyCaller);

        let records: Vec<_> = reader.map(Result::unwrap).collect();
        assert_eq!(records.len(), 2);
        // +1 locus offset correction
        assert_eq!(records[0].locus, Locus::Point(101));
        assert_eq!(records[0].snp_base, "G");
        assert_eq!(records[0].ref_base, "A");
        assert!(!records[0].is_indel());
        assert_eq!(records[1].locus, Locus::Point(206));
        assert_eq!(records[1].line_number, 4);
    }

    #[test]
    fn test_no_strain_header() {
        let file = write_temp("0 5 left=A sample=G ref=A right=T\n");
        let reader = AssemblyReader::open(file.path()).unwrap();
        assert!(reader.context().strain_id.is_none());
    }

    #[test]
    fn test_comments_in_body_skipped() {
        let file = write_temp(
            "#ST1/ref\n\
             0 10 left=A sample=G ref=A right=T\n\
             # a stray comment\n\
             0 20 left=A sample=T ref=C right=T\n",
        );
        let records: Vec<_> = AssemblyReader::open(file.path())
            .unwrap()
            .map(Result::unwrap)
            .collect();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_empty_sample_is_deletion() {
        let file = write_temp("#S/r\n0 10 left=A sample= ref=A right=T\n");
        let records: Vec<_> = AssemblyReader::open(file.path())
            .unwrap()
            .map(Result::unwrap)
            .collect();
        assert_eq!(records[0].indel, Some(IndelKind::Deletion));
        assert_eq!(records[0].snp_base, "");
    }

    #[test]
    fn test_multi_base_sample_is_insertion() {
        let file = write_temp("#S/r\n0 10 left=A sample=GG ref=A right=T\n");
        let records: Vec<_> = AssemblyReader::open(file.path())
            .unwrap()
            .map(Result::unwrap)
            .collect();
        assert_eq!(records[0].indel, Some(IndelKind::Insertion));
    }

    #[test]
    fn test_empty_ref_is_insertion_longer_ref_is_deletion() {
        assert_eq!(classify_by_length("A", ""), Some(IndelKind::Insertion));
        assert_eq!(classify_by_length("A", "ACG"), Some(IndelKind::Deletion));
        assert_eq!(classify_by_length("A", "G"), None);
    }

    #[test]
    fn test_malformed_line_is_error() {
        let file = write_temp("#S/r\n0 10 sample=G ref=A\n");
        let result: Result<Vec<_>, _> =
            AssemblyReader::open(file.path()).unwrap().collect();
        let err = result.unwrap_err();
        match err {
            ParseError::UnrecognizedLine { line_number, .. } => assert_eq!(line_number, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_header_only_file_yields_nothing() {
        let file = write_temp("#S/r\n");
        let records: Vec<_> = AssemblyReader::open(file.path()).unwrap().collect();
        assert!(records.is_empty());
    }
}
