//! Reader for VCF variant calls.
//!
//! Data begins after the `#CHROM POS ID ...` column header. Body lines are
//! tab-delimited with at least seven fields:
//!
//! ```text
//! <chrom>\t<pos>\t<id>\t<ref>\t<alt>\t<qual>\t<filter>\t...
//! ```
//!
//! Only chrom, pos, ref, alt, and filter are used. With quality filtering on
//! (the default), any record whose filter field is not exactly `PASS` is
//! dropped before it is ever yielded, so it reaches neither the SNP nor the
//! indel output.
//!
//! VCF headers do not reliably carry a usable strain identifier, so the
//! strain ID is the input file's base name.
//!
//! Indel classification compares raw allele-string lengths only. Equal-length
//! multi-base substitutions therefore pass through as substitutions even when
//! a caller might consider them complex indels; downstream files depend on
//! this behavior.

use std::io::{BufRead, Lines};
use std::path::Path;

use tracing::debug;

use crate::core::record::{SnpRecord, StrainContext};
use crate::core::types::{IndelKind, InputFormat, Locus};
use crate::parsing::{file_name_of, is_allele, open_text, ParseError, ReaderConfig};

pub struct VcfReader {
    context: StrainContext,
    lines: Lines<Box<dyn BufRead>>,
    line_number: usize,
    in_data: bool,
    filter_quality: bool,
    multi_chrom: bool,
}

impl VcfReader {
    pub fn open(path: &Path, config: &ReaderConfig) -> Result<Self, ParseError> {
        let file_name = file_name_of(path);

        Ok(Self {
            context: StrainContext {
                strain_id: Some(file_name.clone()),
                file_name,
                format: InputFormat::Vcf,
            },
            lines: open_text(path)?.lines(),
            line_number: 0,
            in_data: false,
            filter_quality: config.filter_quality,
            multi_chrom: config.multi_chrom,
        })
    }

    #[must_use]
    pub fn context(&self) -> &StrainContext {
        &self.context
    }

    /// Parse one data line. `Ok(None)` means the record was dropped by the
    /// quality filter.
    fn parse_body_line(&self, line: &str) -> Result<Option<SnpRecord>, ParseError> {
        let unrecognized = || ParseError::UnrecognizedLine {
            file: self.context.file_name.clone(),
            line_number: self.line_number,
            text: line.to_string(),
        };

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 7 {
            return Err(unrecognized());
        }

        let chrom = fields[0];
        let pos: u64 = fields[1].parse().map_err(|_| unrecognized())?;
        let ref_base = fields[3];
        let snp_base = fields[4];
        let filter = fields[6];

        if chrom.is_empty() || !is_allele(ref_base) || !is_allele(snp_base) {
            return Err(unrecognized());
        }

        if self.filter_quality && filter != "PASS" {
            debug!(line = self.line_number, filter, "dropping non-PASS record");
            return Ok(None);
        }

        let locus = if self.multi_chrom {
            Locus::Placed {
                chrom: chrom.to_string(),
                pos,
            }
        } else {
            Locus::Point(pos)
        };

        Ok(Some(SnpRecord {
            raw_line: line.to_string(),
            line_number: self.line_number,
            locus,
            snp_base: snp_base.to_string(),
            ref_base: ref_base.to_string(),
            indel: classify_alleles(snp_base, ref_base),
        }))
    }
}

impl Iterator for VcfReader {
    type Item = Result<SnpRecord, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_number += 1;

            if !self.in_data {
                if is_column_header(&line) {
                    self.in_data = true;
                }
                continue;
            }

            match self.parse_body_line(&line) {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => {} // filtered out
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// The `#CHROM POS ID ...` line that separates headers from data.
fn is_column_header(line: &str) -> bool {
    let mut tokens = line.split_whitespace();
    tokens.next() == Some("#CHROM") && tokens.next() == Some("POS") && tokens.next() == Some("ID")
}

/// Raw allele-length comparison: shorter sample allele is a deletion, longer
/// an insertion, equal lengths a substitution regardless of content.
fn classify_alleles(snp_base: &str, ref_base: &str) -> Option<IndelKind> {
    match snp_base.len().cmp(&ref_base.len()) {
        std::cmp::Ordering::Less => Some(IndelKind::Deletion),
        std::cmp::Ordering::Greater => Some(IndelKind::Insertion),
        std::cmp::Ordering::Equal => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "##fileformat=VCFv4.2\n\
                          ##source=caller\n\
                          #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n";

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn open(content: &str, config: &ReaderConfig) -> (tempfile::NamedTempFile, VcfReader) {
        let file = write_temp(content);
        let reader = VcfReader::open(file.path(), config).unwrap();
        (file, reader)
    }

    #[test]
    fn test_strain_is_file_name() {
        let (file, reader) = open(HEADER, &ReaderConfig::default());
        let expected = file.path().file_name().unwrap().to_str().unwrap();
        assert_eq!(reader.context().strain_id.as_deref(), Some(expected));
    }

    #[test]
    fn test_reads_pass_records() {
        let body = "chr1\t150\t.\tA\tG\t50\tPASS\tDP=30\n\
                    chr1\t200\t.\tC\tT\t99\tPASS\tDP=44\n";
        let (_file, reader) = open(&format!("{HEADER}{body}"), &ReaderConfig::default());

        let records: Vec<_> = reader.map(Result::unwrap).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].locus, Locus::Point(150));
        assert_eq!(records[0].snp_base, "G");
        assert_eq!(records[0].ref_base, "A");
        assert_eq!(records[0].line_number, 4);
    }

    #[test]
    fn test_quality_filter_drops_non_pass() {
        let body = "chr1\t150\t.\tA\tG\t50\tLowQual\tDP=3\n\
                    chr1\t200\t.\tC\tT\t99\tPASS\tDP=44\n";
        let (_file, reader) = open(&format!("{HEADER}{body}"), &ReaderConfig::default());

        let records: Vec<_> = reader.map(Result::unwrap).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].locus, Locus::Point(200));
    }

    #[test]
    fn test_quality_filter_disabled_keeps_all() {
        let body = "chr1\t150\t.\tA\tG\t50\tLowQual\tDP=3\n";
        let config = ReaderConfig {
            filter_quality: false,
            multi_chrom: false,
        };
        let (_file, reader) = open(&format!("{HEADER}{body}"), &config);

        let records: Vec<_> = reader.map(Result::unwrap).collect();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_multi_chrom_composes_locus() {
        let body = "chr2\t150\t.\tA\tG\t50\tPASS\tDP=30\n";
        let config = ReaderConfig {
            filter_quality: true,
            multi_chrom: true,
        };
        let (_file, reader) = open(&format!("{HEADER}{body}"), &config);

        let records: Vec<_> = reader.map(Result::unwrap).collect();
        assert_eq!(
            records[0].locus,
            Locus::Placed {
                chrom: "chr2".to_string(),
                pos: 150
            }
        );
        assert_eq!(records[0].locus.to_string(), "chr2-150");
    }

    #[test]
    fn test_allele_length_classification() {
        assert_eq!(classify_alleles("A", "AG"), Some(IndelKind::Deletion));
        assert_eq!(classify_alleles("AGG", "A"), Some(IndelKind::Insertion));
        assert_eq!(classify_alleles("A", "G"), None);
        // Equal-length multi-base substitutions stay substitutions
        assert_eq!(classify_alleles("AC", "GT"), None);
    }

    #[test]
    fn test_indels_classified_after_filtering() {
        let body = "chr1\t10\t.\tAG\tA\t50\tPASS\tDP=9\n\
                    chr1\t20\t.\tA\tAGG\t50\tLowQual\tDP=9\n";
        let (_file, reader) = open(&format!("{HEADER}{body}"), &ReaderConfig::default());

        let records: Vec<_> = reader.map(Result::unwrap).collect();
        // The non-PASS insertion never surfaces, not even as an indel
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].indel, Some(IndelKind::Deletion));
    }

    #[test]
    fn test_short_line_is_error() {
        let body = "chr1\t150\t.\tA\tG\n";
        let (_file, reader) = open(&format!("{HEADER}{body}"), &ReaderConfig::default());
        let result: Result<Vec<_>, _> = reader.collect();
        assert!(matches!(
            result.unwrap_err(),
            ParseError::UnrecognizedLine { line_number: 4, .. }
        ));
    }

    #[test]
    fn test_header_only_file_yields_nothing() {
        let (_file, reader) = open(HEADER, &ReaderConfig::default());
        assert_eq!(reader.count(), 0);
    }
}
