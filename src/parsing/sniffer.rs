//! Content-based format detection.
//!
//! The sniffer scans lines until one matches a format-identifying marker:
//!
//! - `#<token>/...` — assembly-caller (k28) strain header
//! - a line exactly equal to `NUCMER` — aligner output
//! - a `##fileformat=VCF` prefix — VCF
//!
//! First match wins and scanning stops there. This is a read-only pass; the
//! caller reopens the file before handing it to a reader.

use std::io::BufRead;
use std::path::Path;

use tracing::debug;

use crate::core::types::InputFormat;
use crate::parsing::{open_text, ParseError};

/// Classify the file at `path`, or `None` when no marker line is found
/// before end-of-file.
pub fn sniff_file(path: &Path) -> Result<Option<InputFormat>, ParseError> {
    let reader = open_text(path)?;
    for line in reader.lines() {
        let line = line?;
        if let Some(format) = classify_line(&line) {
            debug!(path = %path.display(), %format, "detected input format");
            return Ok(Some(format));
        }
    }
    Ok(None)
}

/// Match one line against the three format markers, in priority order.
#[must_use]
pub fn classify_line(line: &str) -> Option<InputFormat> {
    if is_strain_header(line) {
        return Some(InputFormat::AssemblyCaller);
    }
    if line == "NUCMER" {
        return Some(InputFormat::Aligner);
    }
    if line.starts_with("##fileformat=VCF") {
        return Some(InputFormat::Vcf);
    }
    None
}

/// `#<token>/...`: a `#` followed by at least one character and then a slash.
pub(crate) fn is_strain_header(line: &str) -> bool {
    line.strip_prefix('#')
        .and_then(|rest| rest.find('/'))
        .is_some_and(|idx| idx >= 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_assembly_header() {
        assert_eq!(
            classify_line("#ST42/ref_genome.fasta"),
            Some(InputFormat::AssemblyCaller)
        );
    }

    #[test]
    fn test_classify_nucmer() {
        assert_eq!(classify_line("NUCMER"), Some(InputFormat::Aligner));
        // Must be the whole line, not a prefix
        assert_eq!(classify_line("NUCMER v3"), None);
    }

    #[test]
    fn test_classify_vcf() {
        assert_eq!(
            classify_line("##fileformat=VCFv4.2"),
            Some(InputFormat::Vcf)
        );
    }

    #[test]
    fn test_vcf_header_is_not_strain_header() {
        // No slash after the leading token, so not a k28 marker
        assert_eq!(classify_line("##fileformat=VCFv4.2"), Some(InputFormat::Vcf));
        assert!(!is_strain_header("##fileformat=VCFv4.2"));
    }

    #[test]
    fn test_strain_header_needs_token_before_slash() {
        assert!(is_strain_header("#s/x"));
        assert!(!is_strain_header("#/x"));
        assert!(!is_strain_header("#no-slash-here"));
        assert!(!is_strain_header("plain line"));
    }

    #[test]
    fn test_classify_unrelated_lines() {
        assert_eq!(classify_line(""), None);
        assert_eq!(classify_line("0 12 left=A sample=G ref=A right=T"), None);
    }
}
