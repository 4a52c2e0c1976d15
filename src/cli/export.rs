use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Args;

use crate::export::{effect, matrix};

#[derive(Args)]
pub struct MatrixArgs {
    /// Reference base file from a merge run (<batch>.ref)
    pub ref_file: PathBuf,

    /// SNP file from the same run (<batch>.snp)
    pub snp_file: PathBuf,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
pub struct EffectArgs {
    /// Reference base file from a merge run (<batch>.ref)
    pub ref_file: PathBuf,

    /// SNP file from the same run (<batch>.snp)
    pub snp_file: PathBuf,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

/// Execute the matrix subcommand.
///
/// # Errors
///
/// Returns an error when either input is missing or malformed, or a SNP
/// locus has no reference entry.
pub fn run_matrix(args: &MatrixArgs) -> anyhow::Result<()> {
    check_inputs(&args.ref_file, &args.snp_file)?;
    let mut out = open_output(args.out.as_deref())?;
    matrix::export_matrix(&args.ref_file, &args.snp_file, &mut out)
        .context("matrix export failed")?;
    out.flush()?;
    Ok(())
}

/// Execute the effect subcommand.
///
/// # Errors
///
/// Returns an error when either input is missing or malformed, or a SNP
/// locus has no reference entry.
pub fn run_effect(args: &EffectArgs) -> anyhow::Result<()> {
    check_inputs(&args.ref_file, &args.snp_file)?;
    let mut out = open_output(args.out.as_deref())?;
    effect::export_effect(&args.ref_file, &args.snp_file, &mut out)
        .context("effect export failed")?;
    out.flush()?;
    Ok(())
}

fn check_inputs(ref_file: &Path, snp_file: &Path) -> anyhow::Result<()> {
    for path in [ref_file, snp_file] {
        if !path.is_file() {
            bail!("input file does not exist: {}", path.display());
        }
    }
    Ok(())
}

fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}
