//! The merge engine: exclusion ranges, shared tables, per-strain stats, and
//! the consolidator that drives one pass over every input file's records.

use thiserror::Error;

use crate::core::types::Locus;

pub mod consolidator;
pub mod exclusion;
pub mod stats;
pub mod tables;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] crate::parsing::ParseError),

    #[error(
        "reference base mismatch at locus {locus}: {file}:{line_number} has ref={base}, \
         but this locus was already recorded as ref={existing_base} while processing \
         {existing_file}:{existing_line}. Are all input files from the same reference?"
    )]
    ReferenceConflict {
        locus: Locus,
        base: String,
        file: String,
        line_number: usize,
        existing_base: String,
        existing_file: String,
        existing_line: usize,
    },

    #[error(
        "conflicting SNP call for strain {strain_id} at locus {locus}: \
         {file}:{line_number} has base {base}, but {existing_base} was already recorded"
    )]
    SnpConflict {
        strain_id: String,
        locus: Locus,
        base: String,
        existing_base: String,
        file: String,
        line_number: usize,
    },

    #[error("duplicate exclusion label {label:?} at line {line_number}")]
    DuplicateExclusionLabel { label: String, line_number: usize },

    #[error("malformed exclusion line {line_number}: {text:?} (expected label,start,end)")]
    MalformedExclusionLine { line_number: usize, text: String },
}
