//! Writers that drain the consolidator's tables into the run's output files.
//!
//! All three files are tab-delimited and newline-terminated; their exact
//! layout is a contract with downstream converters and must not drift:
//!
//! - reference: `<locus>\t<base>`, ascending locus
//! - SNP: `<strain>\t<locus>\t<base>` (placeholder rows `<strain>\t-1\t-`)
//! - indel: `<strain>\t<format-tag>\t<rawline>\t<INS|DEL>`

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::merge::consolidator::Consolidator;

pub fn write_reference(merger: &Consolidator, path: &Path) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for (locus, entry) in merger.reference() {
        writeln!(out, "{locus}\t{}", entry.base)?;
    }
    out.flush()
}

pub fn write_snps(merger: &Consolidator, path: &Path) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for row in merger.snp_rows() {
        writeln!(out, "{row}")?;
    }
    out.flush()
}

pub fn write_indels(merger: &Consolidator, path: &Path) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for entry in merger.indel_log() {
        writeln!(out, "{entry}")?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::exclusion::ExclusionIndex;
    use crate::parsing::reader::SnpReader;
    use crate::parsing::ReaderConfig;
    use std::io::Write as _;

    #[test]
    fn test_reference_file_sorted_ascending() {
        let mut input = tempfile::NamedTempFile::new().unwrap();
        input
            .write_all(
                b"#ST1/ref\n\
                  0 300 left=A sample=G ref=C right=T\n\
                  0 100 left=A sample=T ref=A right=T\n",
            )
            .unwrap();

        let mut merger = Consolidator::new(ExclusionIndex::empty());
        merger
            .merge_file(SnpReader::open(input.path(), &ReaderConfig::default()).unwrap())
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let ref_path = dir.path().join("run.ref");
        write_reference(&merger, &ref_path).unwrap();

        let content = std::fs::read_to_string(&ref_path).unwrap();
        // +1 offset applied, rows sorted by locus
        assert_eq!(content, "101\tA\n301\tC\n");
    }

    #[test]
    fn test_snp_and_indel_files() {
        let mut input = tempfile::NamedTempFile::new().unwrap();
        input
            .write_all(
                b"#ST1/ref\n\
                  0 99 left=A sample=G ref=A right=T\n\
                  0 199 left=A sample= ref=A right=T\n",
            )
            .unwrap();

        let mut merger = Consolidator::new(ExclusionIndex::empty());
        merger
            .merge_file(SnpReader::open(input.path(), &ReaderConfig::default()).unwrap())
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let snp_path = dir.path().join("run.snp");
        let indel_path = dir.path().join("run.indel");
        write_snps(&merger, &snp_path).unwrap();
        write_indels(&merger, &indel_path).unwrap();

        assert_eq!(
            std::fs::read_to_string(&snp_path).unwrap(),
            "ST1\t100\tG\n"
        );
        assert_eq!(
            std::fs::read_to_string(&indel_path).unwrap(),
            "ST1\tk28\t0 199 left=A sample= ref=A right=T\tDEL\n"
        );
    }
}
