use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// One of the three supported upstream variant-caller formats.
///
/// This set is closed on purpose: the whole record contract (locus offsets,
/// base tagging, indel rules) is format-specific, so a new format means
/// revisiting every reader, not just adding a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputFormat {
    /// k-mer assembly variant caller output (k28.out)
    AssemblyCaller,
    /// Whole-genome aligner SNP output (NUCMER show-snps)
    Aligner,
    /// Variant Call Format
    Vcf,
}

impl InputFormat {
    /// Short tag used in the indel log output.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::AssemblyCaller => "k28",
            Self::Aligner => "nucmer",
            Self::Vcf => "vcf",
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Kind of indel call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndelKind {
    Insertion,
    Deletion,
}

impl IndelKind {
    /// Tag written to the indel log (`INS` or `DEL`).
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Insertion => "INS",
            Self::Deletion => "DEL",
        }
    }
}

impl std::fmt::Display for IndelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// A genomic coordinate.
///
/// Plain integer positions cover the single-reference case. Multi-chromosome
/// mode composes a `chrom-pos` key instead, because bare positions are not
/// globally unique across chromosomes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locus {
    /// Bare position on the (single) reference sequence
    Point(u64),
    /// Chromosome-qualified position for multi-chromosome inputs
    Placed { chrom: String, pos: u64 },
}

impl Locus {
    /// The bare position, if this locus is not chromosome-qualified.
    ///
    /// Exclusion ranges only apply to bare positions; composite loci fall
    /// outside the range mechanism.
    #[must_use]
    pub fn point(&self) -> Option<u64> {
        match self {
            Self::Point(pos) => Some(*pos),
            Self::Placed { .. } => None,
        }
    }
}

impl Ord for Locus {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Point(a), Self::Point(b)) => a.cmp(b),
            // Integer loci sort ahead of composite loci so single-reference
            // output stays a strictly ascending position column.
            (Self::Point(_), Self::Placed { .. }) => Ordering::Less,
            (Self::Placed { .. }, Self::Point(_)) => Ordering::Greater,
            (Self::Placed { chrom: ca, pos: pa }, Self::Placed { chrom: cb, pos: pb }) => {
                ca.cmp(cb).then_with(|| pa.cmp(pb))
            }
        }
    }
}

impl PartialOrd for Locus {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Locus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Point(pos) => write!(f, "{pos}"),
            Self::Placed { chrom, pos } => write!(f, "{chrom}-{pos}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tags() {
        assert_eq!(InputFormat::AssemblyCaller.tag(), "k28");
        assert_eq!(InputFormat::Aligner.tag(), "nucmer");
        assert_eq!(InputFormat::Vcf.tag(), "vcf");
    }

    #[test]
    fn test_locus_display() {
        assert_eq!(Locus::Point(42).to_string(), "42");
        let placed = Locus::Placed {
            chrom: "chr2".to_string(),
            pos: 100,
        };
        assert_eq!(placed.to_string(), "chr2-100");
    }

    #[test]
    fn test_locus_order() {
        let a = Locus::Point(5);
        let b = Locus::Point(10);
        let c = Locus::Placed {
            chrom: "chr1".to_string(),
            pos: 1,
        };
        let d = Locus::Placed {
            chrom: "chr2".to_string(),
            pos: 1,
        };

        assert!(a < b);
        assert!(b < c);
        assert!(c < d);
    }

    #[test]
    fn test_locus_point() {
        assert_eq!(Locus::Point(7).point(), Some(7));
        let placed = Locus::Placed {
            chrom: "chr1".to_string(),
            pos: 7,
        };
        assert_eq!(placed.point(), None);
    }
}
