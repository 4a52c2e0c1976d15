//! Readers for the three supported variant-call text formats.
//!
//! Every reader follows the same contract: constructing one derives the
//! [`StrainContext`](crate::core::record::StrainContext) from header content,
//! and iterating yields normalized [`SnpRecord`](crate::core::record::SnpRecord)s
//! lazily, one per data line, in file order. A reader is single-pass;
//! re-iterating means reopening the file.
//!
//! Parsing is structural (field splitting and prefix matching) rather than
//! schema-driven: these files are looser than their nominal formats, and the
//! record semantics carry legacy conventions (such as the k28 +1 locus
//! offset) that a strict format library would not preserve.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use thiserror::Error;

pub mod aligner;
pub mod assembly;
pub mod reader;
pub mod sniffer;
pub mod vcf;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unrecognized input format: {path} matches none of k28, NUCMER, or VCF")]
    UnrecognizedFormat { path: String },

    #[error("unrecognized line at {file}:{line_number}: {text}")]
    UnrecognizedLine {
        file: String,
        line_number: usize,
        text: String,
    },
}

/// Options shared by all readers.
#[derive(Debug, Clone, Copy)]
pub struct ReaderConfig {
    /// Drop VCF records whose filter field is not exactly `PASS`
    pub filter_quality: bool,
    /// Compose `chrom-pos` locus keys instead of bare positions (VCF)
    pub multi_chrom: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            filter_quality: true,
            multi_chrom: false,
        }
    }
}

/// Open a text input for line-by-line reading, decompressing `.gz` files
/// transparently.
pub fn open_text(path: &Path) -> Result<Box<dyn BufRead>, ParseError> {
    let file = File::open(path)?;
    let is_gz = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gz"));

    if is_gz {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Base name of a path for diagnostics and output rows.
#[must_use]
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// True when `s` is a (possibly empty) run of unambiguous bases.
pub(crate) fn is_base_run(s: &str) -> bool {
    s.bytes().all(|b| matches!(b, b'A' | b'C' | b'G' | b'T'))
}

/// True when `s` is a non-empty VCF allele string: bases, `N`, or a
/// comma-separated list of alternates.
pub(crate) fn is_allele(s: &str) -> bool {
    !s.is_empty()
        && s.bytes()
            .all(|b| matches!(b, b'A' | b'C' | b'G' | b'T' | b'N' | b','))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_base_run() {
        assert!(is_base_run(""));
        assert!(is_base_run("ACGT"));
        assert!(!is_base_run("ACGN"));
        assert!(!is_base_run("acgt"));
    }

    #[test]
    fn test_is_allele() {
        assert!(is_allele("A"));
        assert!(is_allele("ACGTN"));
        assert!(is_allele("A,G"));
        assert!(!is_allele(""));
        assert!(!is_allele("A.G"));
    }

    #[test]
    fn test_file_name_of() {
        assert_eq!(file_name_of(Path::new("/data/run1/s1.vcf")), "s1.vcf");
        assert_eq!(file_name_of(Path::new("s1.vcf")), "s1.vcf");
    }
}
