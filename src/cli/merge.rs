use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Args;
use tracing::{info, warn};

use crate::cli::OutputFormat;
use crate::merge::consolidator::Consolidator;
use crate::merge::exclusion::ExclusionIndex;
use crate::merge::stats::StatsAggregator;
use crate::output;
use crate::parsing::reader::SnpReader;
use crate::parsing::ReaderConfig;

#[derive(Args)]
pub struct MergeArgs {
    /// Input variant-call files: k28.out, NUCMER show-snps, or VCF
    /// (gzipped inputs accepted). Formats may be mixed within one run.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Batch ID naming the output files (<batch>.ref, <batch>.snp, <batch>.indel)
    #[arg(short, long)]
    pub batch_id: String,

    /// CSV file of labeled exclusion ranges: label,start_loci,end_loci (inclusive)
    #[arg(long)]
    pub exclude: Option<PathBuf>,

    /// Keep VCF records whose filter field is not PASS
    #[arg(long)]
    pub no_filter_quality: bool,

    /// Compose chrom-pos locus keys for multi-chromosome VCF inputs
    #[arg(long)]
    pub multi_chrom: bool,
}

/// Execute the merge subcommand.
///
/// # Errors
///
/// Returns an error when an input file is missing or unrecognized, a data
/// line is malformed, reference bases conflict across inputs, or the
/// exclusion file fails to load.
pub fn run(args: &MergeArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    // All inputs must exist before any processing begins.
    for input in &args.inputs {
        if !input.is_file() {
            bail!("input file does not exist: {}", input.display());
        }
    }

    let exclusions = match &args.exclude {
        Some(path) => ExclusionIndex::load(path)
            .with_context(|| format!("failed to load exclusion file {}", path.display()))?,
        None => ExclusionIndex::empty(),
    };
    if verbose && !exclusions.is_empty() {
        eprintln!("Loaded {} exclusion ranges", exclusions.len());
    }
    if args.multi_chrom && !exclusions.is_empty() {
        // Range exclusion matches bare positions only; chrom-pos keys from
        // multi-chromosome inputs fall outside it.
        warn!("exclusion ranges do not apply to composite chrom-pos loci");
    }

    let config = ReaderConfig {
        filter_quality: !args.no_filter_quality,
        multi_chrom: args.multi_chrom,
    };

    let mut merger = Consolidator::new(exclusions);
    for input in &args.inputs {
        let reader = SnpReader::open(input, &config)
            .with_context(|| format!("failed to open {}", input.display()))?;
        let context = reader.context();
        info!(
            format = %context.format,
            strain = context.strain_label(),
            file = %context.file_name,
            "processing input file"
        );
        if verbose {
            eprintln!(
                "Processing {} file {} (strain {})",
                context.format,
                context.file_name,
                context.strain_label()
            );
        }
        merger
            .merge_file(reader)
            .with_context(|| format!("failed while merging {}", input.display()))?;
    }

    let ref_path = PathBuf::from(format!("{}.ref", args.batch_id));
    let snp_path = PathBuf::from(format!("{}.snp", args.batch_id));
    let indel_path = PathBuf::from(format!("{}.indel", args.batch_id));

    output::write_reference(&merger, &ref_path)
        .with_context(|| format!("failed to write {}", ref_path.display()))?;
    output::write_snps(&merger, &snp_path)
        .with_context(|| format!("failed to write {}", snp_path.display()))?;
    output::write_indels(&merger, &indel_path)
        .with_context(|| format!("failed to write {}", indel_path.display()))?;

    if verbose {
        eprintln!("Merged reference file is {}", ref_path.display());
        eprintln!("Merged SNP file is {}", snp_path.display());
        eprintln!("Merged indel file is {}", indel_path.display());
    }

    match format {
        OutputFormat::Text => print_text_report(merger.stats()),
        OutputFormat::Tsv => print_tsv_report(merger.stats()),
        OutputFormat::Json => print_json_report(merger.stats())?,
    }

    Ok(())
}

fn print_text_report(stats: &StatsAggregator) {
    println!("=== Final Report ===");
    for (strain, entry) in stats.strains() {
        println!();
        println!("Strain: {strain}");
        println!("SNPs: {}", entry.snps);
        println!("Insertions: {}", entry.insertions);
        println!("Deletions: {}", entry.deletions);
        println!("Total indels: {}", entry.total_indels());
        println!("Loci excluded: {}", entry.excluded);
        if let Some(report) = stats.exclusions_for(strain) {
            for (label, count) in report {
                println!("* Loci excluded from {label}: {count}");
            }
        }
    }
}

fn print_tsv_report(stats: &StatsAggregator) {
    println!("strain_id\tsnps\tinsertions\tdeletions\ttotal_indels\tloci_excluded");
    for (strain, entry) in stats.strains() {
        println!(
            "{strain}\t{}\t{}\t{}\t{}\t{}",
            entry.snps,
            entry.insertions,
            entry.deletions,
            entry.total_indels(),
            entry.excluded
        );
    }
    for (strain, _) in stats.strains() {
        if let Some(report) = stats.exclusions_for(strain) {
            for (label, count) in report {
                println!("# {strain} excluded from {label}: {count}");
            }
        }
    }
}

fn print_json_report(stats: &StatsAggregator) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(stats)?);
    Ok(())
}
