//! Row types for the consolidator's shared tables.

use crate::core::types::{IndelKind, InputFormat, Locus};

/// The reference base recorded for one locus, with the source that first
/// asserted it. Created on first sighting and never overwritten; later
/// sightings are only validated against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceEntry {
    pub base: String,
    pub file: String,
    pub line_number: usize,
}

/// One row of the per-strain SNP table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnpRow {
    /// A qualifying substitution call
    Call {
        strain_id: String,
        locus: Locus,
        base: String,
    },
    /// Placeholder for a strain that contributed zero qualifying calls,
    /// serialized as locus `-1` and base `-` so the strain does not silently
    /// disappear from the output
    NoCalls { strain_id: String },
}

impl std::fmt::Display for SnpRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call {
                strain_id,
                locus,
                base,
            } => write!(f, "{strain_id}\t{locus}\t{base}"),
            Self::NoCalls { strain_id } => write!(f, "{strain_id}\t-1\t-"),
        }
    }
}

/// One excluded indel line, kept verbatim for downstream tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndelLogEntry {
    pub strain_id: String,
    pub format: InputFormat,
    pub raw_line: String,
    pub kind: IndelKind,
}

impl std::fmt::Display for IndelLogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.strain_id,
            self.format.tag(),
            self.raw_line,
            self.kind.tag()
        )
    }
}
