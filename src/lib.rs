//! # varmerge
//!
//! A library for normalizing and consolidating per-strain genomic variant
//! calls from heterogeneous upstream tools.
//!
//! Sequenced strains arrive as one file per strain, in whichever format the
//! upstream pipeline produced: k-mer assembly caller output (k28.out),
//! whole-genome aligner SNP output (NUCMER show-snps), or VCF. varmerge
//! detects each file's format, normalizes every call into a common
//! locus/base record, and merges all strains into a single reference-base
//! table plus a per-strain SNP table, with insertions and deletions diverted
//! to their own log and user-supplied locus ranges excluded and counted.
//!
//! The merge is deliberately strict: every input file must describe the same
//! reference sequence, and two files asserting different reference bases at
//! the same locus abort the run rather than silently encoding a
//! contradictory reference.
//!
//! ## Example
//!
//! ```rust,no_run
//! use varmerge::{Consolidator, ExclusionIndex, SnpReader};
//! use varmerge::parsing::ReaderConfig;
//! use std::path::Path;
//!
//! let config = ReaderConfig::default();
//! let mut merger = Consolidator::new(ExclusionIndex::empty());
//!
//! for path in ["strain_a.vcf", "strain_b.snps"] {
//!     let reader = SnpReader::open(Path::new(path), &config).unwrap();
//!     merger.merge_file(reader).unwrap();
//! }
//!
//! for (locus, entry) in merger.reference() {
//!     println!("{locus}\t{}", entry.base);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: shared record and locus types
//! - [`parsing`]: format sniffing and the three line readers
//! - [`merge`]: the consolidation engine, exclusion index, and stats
//! - [`output`]: writers for the `.ref`/`.snp`/`.indel` files
//! - [`export`]: one-shot converters over a finished run's outputs
//! - [`cli`]: command-line interface implementation

pub mod cli;
pub mod core;
pub mod export;
pub mod merge;
pub mod output;
pub mod parsing;

// Re-export commonly used types for convenience
pub use crate::core::record::{SnpRecord, StrainContext};
pub use crate::core::types::{IndelKind, InputFormat, Locus};
pub use crate::merge::consolidator::Consolidator;
pub use crate::merge::exclusion::ExclusionIndex;
pub use crate::merge::stats::{StatsAggregator, StrainStats};
pub use crate::merge::MergeError;
pub use crate::parsing::reader::SnpReader;
pub use crate::parsing::ParseError;
