//! Reader for whole-genome aligner SNP output (NUCMER show-snps).
//!
//! Files open with the literal `NUCMER` token and a header block naming the
//! reference and query paths, then a `[P1] ...` column-header line, then
//! tab-delimited data rows:
//!
//! ```text
//! <locus>\t<ref>\t<sample>\t<count>\t...
//! ```
//!
//! Only the first three columns matter; trailing columns are ignored.

use std::io::{BufRead, Lines};
use std::path::Path;

use tracing::debug;

use crate::core::record::{SnpRecord, StrainContext};
use crate::core::types::{InputFormat, Locus};
use crate::parsing::assembly::classify_by_length;
use crate::parsing::{file_name_of, is_base_run, open_text, ParseError};

pub struct AlignerReader {
    context: StrainContext,
    lines: Lines<Box<dyn BufRead>>,
    line_number: usize,
    in_data: bool,
}

impl AlignerReader {
    pub fn open(path: &Path) -> Result<Self, ParseError> {
        let file_name = file_name_of(path);
        let strain_id = read_strain_id(path)?;
        if strain_id.is_none() {
            debug!(file = %file_name, "no query path in NUCMER header; strain ID unset");
        }

        Ok(Self {
            context: StrainContext {
                strain_id,
                file_name,
                format: InputFormat::Aligner,
            },
            lines: open_text(path)?.lines(),
            line_number: 0,
            in_data: false,
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

        let mut fields = line.split('\t');
        let locus: u64 = fields
            .next()
            .and_then(|f| f.parse().ok())
            .ok_or_else(unrecognized)?;
        let ref_base = fields.next().ok_or_else(unrecognized)?;
        let snp_base = fields.next().ok_or_else(unrecognized)?;
        let count = fields.next().ok_or_else(unrecognized)?;

        if !is_base_run(ref_base) || !is_base_run(snp_base) {
            return Err(unrecognized());
        }
        if count.is_empty() || !count.bytes().all(|b| b.is_ascii_digit()) {
            return Err(unrecognized());
        }

        Ok(SnpRecord {
            raw_line: line.to_string(),
            line_number: self.line_number,
            locus: Locus::Point(locus),
            snp_base: snp_base.to_string(),
            ref_base: ref_base.to_string(),
            indel: classify_by_length(snp_base, ref_base),
        })
    }
}

impl Iterator for AlignerReader {
    type Item = Result<SnpRecord, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_number += 1;

            if !self.in_data {
                // Everything up to and including the `[P1] ...` column
                // header is preamble.
                if line.starts_with("[P1]") {
                    self.in_data = true;
                }
                continue;
            }

            return Some(self.parse_body_line(&line));
        }
    }
}

/// Strain ID from the header block: the last `/`-delimited segment of the
/// second whitespace token on the first header line carrying two tokens.
/// NUCMER writes `<ref_path> <query_path>` there, so this is the query file
/// name.
fn read_strain_id(path: &Path) -> Result<Option<String>, ParseError> {
    let reader = open_text(path)?;
    for line in reader.lines() {
        let line = line?;
        if line.starts_with("[P1]") {
            break;
        }
        let mut tokens = line.split_whitespace();
        let (Some(_), Some(query)) = (tokens.next(), tokens.next()) else {
            continue;
        };
        let strain = query.rsplit('/').next().unwrap_or(query);
        if !strain.is_empty() {
            return Ok(Some(strain.to_string()));
        }
    }
    Ok(None)
}
