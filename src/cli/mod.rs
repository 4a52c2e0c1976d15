//! Command-line interface for varmerge.
//!
//! Available commands:
//!
//! - **merge**: consolidate per-strain variant-call files into `.ref`,
//!   `.snp`, and `.indel` outputs
//! - **matrix**: reformat a finished run as a presence/absence matrix
//! - **effect**: reformat a finished run as effect-annotation input
//!
//! ## Usage
//!
//! ```text
//! # Merge three strains, excluding phage regions
//! varmerge merge s1.k28.out s2.snps s3.vcf --batch-id run1 --exclude phage.csv
//!
//! # Summary report as JSON for scripting
//! varmerge merge s1.vcf --batch-id run1 --format json
//!
//! # Downstream exports from the run's outputs
//! varmerge matrix run1.ref run1.snp --out run1.matrix.txt
//! varmerge effect run1.ref run1.snp --out run1.effect.txt
//! ```

use clap::{Parser, Subcommand};

pub mod export;
pub mod merge;

#[derive(Parser)]
#[command(name = "varmerge")]
#[command(version)]
#[command(about = "Normalize and consolidate per-strain SNP/indel calls")]
#[command(
    long_about = "varmerge ingests per-strain variant-call files from three upstream tools (k28 assembly caller, NUCMER show-snps, VCF), normalizes them into a common locus/base representation, and merges all strains into:\n- a consolidated reference-base table\n- a per-strain SNP table\n- an indel log\n\nConflicting reference bases across input files abort the run: all inputs must come from the same reference sequence."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Summary report format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Merge variant-call files into consolidated SNP/reference/indel tables
    Merge(merge::MergeArgs),

    /// Export a presence/absence matrix from a finished run
    Matrix(export::MatrixArgs),

    /// Export effect-annotation input from a finished run
    Effect(export::EffectArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Tsv,
    Json,
}
