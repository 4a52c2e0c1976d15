//! One-shot converters over a finished merge run's `.ref`/`.snp` pair.
//!
//! These read the exact textual layouts the merge writes (see
//! [`crate::output`]) and reformat them for other tools. They never touch the
//! merge tables directly; the files are the contract.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

use crate::parsing::open_text;

pub mod effect;
pub mod matrix;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed reference line {line_number}: {text:?}")]
    MalformedRefLine { line_number: usize, text: String },

    #[error("malformed SNP line {line_number}: {text:?}")]
    MalformedSnpLine { line_number: usize, text: String },

    #[error("SNP locus {locus} has no entry in the reference file")]
    UnknownLocus { locus: String },
}

/// One qualifying call read back from a `.snp` file. Placeholder rows are
/// dropped during reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnpCall {
    pub strain_id: String,
    pub locus: String,
    pub base: String,
}

/// Read a `.ref` file into a locus → base map.
pub fn read_ref_table(path: &Path) -> Result<HashMap<String, String>, ExportError> {
    use std::io::BufRead;

    let mut table = HashMap::new();
    let reader = open_text(path).map_err(io_only)?;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let Some((locus, base)) = split_two(&line) else {
            return Err(ExportError::MalformedRefLine {
                line_number: i + 1,
                text: line,
            });
        };
        table.insert(locus.to_string(), base.to_string());
    }
    Ok(table)
}

/// Read a `.snp` file into call rows, skipping `-1`/`-` placeholder rows.
pub fn read_snp_calls(path: &Path) -> Result<Vec<SnpCall>, ExportError> {
    use std::io::BufRead;

    let mut calls = Vec::new();
    let reader = open_text(path).map_err(io_only)?;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let fields: Vec<&str> = line.split('\t').collect();
        let [strain_id, locus, base] = fields.as_slice() else {
            return Err(ExportError::MalformedSnpLine {
                line_number: i + 1,
                text: line,
            });
        };
        if *locus == "-1" && *base == "-" {
            continue;
        }
        calls.push(SnpCall {
            strain_id: (*strain_id).to_string(),
            locus: (*locus).to_string(),
            base: (*base).to_string(),
        });
    }
    Ok(calls)
}

fn split_two(line: &str) -> Option<(&str, &str)> {
    let (a, b) = line.split_once('\t')?;
    if a.is_empty() || b.is_empty() || b.contains('\t') {
        return None;
    }
    Some((a, b))
}

fn io_only(e: crate::parsing::ParseError) -> ExportError {
    match e {
        crate::parsing::ParseError::Io(io) => ExportError::Io(io),
        other => ExportError::Io(std::io::Error::other(other.to_string())),
    }
}
