use crate::core::types::{IndelKind, InputFormat, Locus};

/// One normalized variant call, produced fresh per data line by a reader.
///
/// Immutable once yielded; the consolidator does not retain it beyond one
/// iteration unless it lands in the indel log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnpRecord {
    /// The source line exactly as read (trailing newline stripped)
    pub raw_line: String,
    /// 1-based line number in the source file
    pub line_number: usize,
    pub locus: Locus,
    /// Observed base(s) in the strain; may be empty for deletions
    pub snp_base: String,
    /// Reference base(s) at the locus; may be empty for insertions
    pub ref_base: String,
    /// `Some` when the call is an insertion or deletion rather than a
    /// single-base substitution
    pub indel: Option<IndelKind>,
}

impl SnpRecord {
    #[must_use]
    pub fn is_indel(&self) -> bool {
        self.indel.is_some()
    }
}

/// Per-file context derived once from header content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrainContext {
    /// Strain identifier; `None` when the format carries no usable ID
    /// (an assembly-caller file with no `#strain/...` header comment)
    pub strain_id: Option<String>,
    /// Base name of the source file, used in diagnostics and conflict reports
    pub file_name: String,
    pub format: InputFormat,
}

impl StrainContext {
    /// Label used to key the SNP table, stats, and output rows.
    ///
    /// Falls back to `unknown` so a file without a strain header still shows
    /// up in stats and placeholder handling instead of vanishing.
    #[must_use]
    pub fn strain_label(&self) -> &str {
        self.strain_id.as_deref().unwrap_or("unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Locus;

    #[test]
    fn test_is_indel() {
        let record = SnpRecord {
            raw_line: "x".to_string(),
            line_number: 1,
            locus: Locus::Point(10),
            snp_base: "A".to_string(),
            ref_base: "G".to_string(),
            indel: None,
        };
        assert!(!record.is_indel());

        let record = SnpRecord {
            indel: Some(IndelKind::Deletion),
            ..record
        };
        assert!(record.is_indel());
    }

    #[test]
    fn test_strain_label_fallback() {
        let ctx = StrainContext {
            strain_id: None,
            file_name: "sample.k28.out".to_string(),
            format: InputFormat::AssemblyCaller,
        };
        assert_eq!(ctx.strain_label(), "unknown");

        let ctx = StrainContext {
            strain_id: Some("ST42".to_string()),
            ..ctx
        };
        assert_eq!(ctx.strain_label(), "ST42");
    }
}
