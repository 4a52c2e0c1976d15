//! Presence/absence matrix export.
//!
//! Each distinct call becomes a column named `<refBase>_<locus>_<sampleBase>`;
//! each strain becomes a row of `0`/`1` cells. Column and row order follow
//! first appearance in the `.snp` file, so the export is deterministic for a
//! given input pair.

use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::path::Path;

use crate::export::{read_ref_table, read_snp_calls, ExportError};

pub fn export_matrix(
    ref_path: &Path,
    snp_path: &Path,
    out: &mut impl Write,
) -> Result<(), ExportError> {
    let ref_table = read_ref_table(ref_path)?;
    let calls = read_snp_calls(snp_path)?;

    let mut columns: Vec<String> = Vec::new();
    let mut seen_columns: HashSet<String> = HashSet::new();
    let mut strains: Vec<String> = Vec::new();
    let mut strain_keys: HashMap<String, HashSet<String>> = HashMap::new();

    for call in &calls {
        let ref_base = ref_table
            .get(&call.locus)
            .ok_or_else(|| ExportError::UnknownLocus {
                locus: call.locus.clone(),
            })?;
        let key = format!("{ref_base}_{}_{}", call.locus, call.base);

        if !strain_keys.contains_key(&call.strain_id) {
            strains.push(call.strain_id.clone());
        }
        strain_keys
            .entry(call.strain_id.clone())
            .or_default()
            .insert(key.clone());

        if seen_columns.insert(key.clone()) {
            columns.push(key);
        }
    }

    write!(out, "StrainID")?;
    for column in &columns {
        write!(out, "\t{column}")?;
    }
    writeln!(out)?;

    for strain in &strains {
        write!(out, "{strain}")?;
        let keys = &strain_keys[strain];
        for column in &columns {
            let cell = u8::from(keys.contains(column));
            write!(out, "\t{cell}")?;
        }
        writeln!(out)?;
    }

    Ok(())
}
