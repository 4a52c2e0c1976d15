//! Format dispatch over the three concrete readers.

use std::path::Path;

use crate::core::record::{SnpRecord, StrainContext};
use crate::core::types::InputFormat;
use crate::parsing::aligner::AlignerReader;
use crate::parsing::assembly::AssemblyReader;
use crate::parsing::sniffer::sniff_file;
use crate::parsing::vcf::VcfReader;
use crate::parsing::{ParseError, ReaderConfig};

/// A reader for one input file, behind a closed set of format variants.
///
/// Exactly three formats are supported; a new one would have to revisit the
/// whole record contract, so this is an enum rather than an open trait.
pub enum SnpReader {
    Assembly(AssemblyReader),
    Aligner(AlignerReader),
    Vcf(VcfReader),
}

impl std::fmt::Debug for SnpReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Assembly(_) => f.write_str("SnpReader::Assembly"),
            Self::Aligner(_) => f.write_str("SnpReader::Aligner"),
            Self::Vcf(_) => f.write_str("SnpReader::Vcf"),
        }
    }
}

impl SnpReader {
    /// Sniff the format of `path` and construct the matching reader.
    ///
    /// The sniff is a separate read-only pass; the reader reopens the file
    /// for record iteration.
    pub fn open(path: &Path, config: &ReaderConfig) -> Result<Self, ParseError> {
        let format = sniff_file(path)?.ok_or_else(|| ParseError::UnrecognizedFormat {
            path: path.display().to_string(),
        })?;

        match format {
            InputFormat::AssemblyCaller => Ok(Self::Assembly(AssemblyReader::open(path)?)),
            InputFormat::Aligner => Ok(Self::Aligner(AlignerReader::open(path)?)),
            InputFormat::Vcf => Ok(Self::Vcf(VcfReader::open(path, config)?)),
        }
    }

    #[must_use]
    pub fn context(&self) -> &StrainContext {
        match self {
            Self::Assembly(r) => r.context(),
            Self::Aligner(r) => r.context(),
            Self::Vcf(r) => r.context(),
        }
    }
}

impl Iterator for SnpReader {
    type Item = Result<SnpRecord, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Assembly(r) => r.next(),
            Self::Aligner(r) => r.next(),
            Self::Vcf(r) => r.next(),
        }
    }
}
