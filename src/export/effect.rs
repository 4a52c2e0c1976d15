//! Effect-annotation export.
//!
//! Emits one `sample=`/`ref=` tagged line per qualifying call, with the locus
//! shifted by −1 to undo the merge's one-up coordinate convention:
//!
//! ```text
//! <strain>\t<locus-1>\tsample=<base>\tref=<refBase>
//! ```
//!
//! Composite `chrom-pos` loci have no single coordinate to shift and are
//! skipped with a warning.

use std::io::Write;
use std::path::Path;

use tracing::warn;

use crate::export::{read_ref_table, read_snp_calls, ExportError};

pub fn export_effect(
    ref_path: &Path,
    snp_path: &Path,
    out: &mut impl Write,
) -> Result<(), ExportError> {
    let ref_table = read_ref_table(ref_path)?;
    let calls = read_snp_calls(snp_path)?;

    for call in &calls {
        let Ok(locus) = call.locus.parse::<u64>() else {
            warn!(locus = %call.locus, strain = %call.strain_id, "skipping composite locus");
            continue;
        };
        let ref_base = ref_table
            .get(&call.locus)
            .ok_or_else(|| ExportError::UnknownLocus {
                locus: call.locus.clone(),
            })?;

        writeln!(
            out,
            "{}\t{}\tsample={}\tref={ref_base}",
            call.strain_id,
            locus.saturating_sub(1),
            call.base
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_effect_export_shifts_locus() {
        let ref_file = write_temp("100\tA\n200\tC\n");
        let snp_file = write_temp("ST1\t100\tG\nST1\t200\tT\n");

        let mut out = Vec::new();
        export_effect(ref_file.path(), snp_file.path(), &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "ST1\t99\tsample=G\tref=A\nST1\t199\tsample=T\tref=C\n"
        );
    }

    #[test]
    fn test_effect_export_skips_placeholder_and_composite() {
        let ref_file = write_temp("100\tA\nchr2-50\tC\n");
        let snp_file = write_temp("ST1\t100\tG\nST1\tchr2-50\tT\nST2\t-1\t-\n");

        let mut out = Vec::new();
        export_effect(ref_file.path(), snp_file.path(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "ST1\t99\tsample=G\tref=A\n");
    }

    #[test]
    fn test_effect_unknown_locus_is_fatal() {
        let ref_file = write_temp("100\tA\n");
        let snp_file = write_temp("ST1\t999\tG\n");

        let mut out = Vec::new();
        assert!(matches!(
            export_effect(ref_file.path(), snp_file.path(), &mut out).unwrap_err(),
            ExportError::UnknownLocus { .. }
        ));
    }
}
