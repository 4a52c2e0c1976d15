//! Per-strain counters accumulated while records flow through the merge.

use std::collections::BTreeMap;

use serde::Serialize;

/// Counts for one strain. An entry is created at first sight of the strain,
/// so a strain with zero qualifying SNPs still appears in the report.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StrainStats {
    pub snps: u64,
    pub insertions: u64,
    pub deletions: u64,
    pub excluded: u64,
}

impl StrainStats {
    #[must_use]
    pub fn total_indels(&self) -> u64 {
        self.insertions + self.deletions
    }
}

/// Aggregated run statistics, keyed by strain.
///
/// `BTreeMap` keys keep report order deterministic so reruns over the same
/// inputs produce byte-identical output.
#[derive(Debug, Default, Serialize)]
pub struct StatsAggregator {
    strains: BTreeMap<String, StrainStats>,
    exclusions: BTreeMap<String, BTreeMap<String, u64>>,
}

impl StatsAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a strain, creating its zeroed entry if unseen.
    pub fn touch(&mut self, strain_id: &str) {
        self.strains.entry(strain_id.to_string()).or_default();
    }

    pub fn record_snp(&mut self, strain_id: &str) {
        self.strains.entry(strain_id.to_string()).or_default().snps += 1;
    }

    pub fn record_insertion(&mut self, strain_id: &str) {
        self.strains
            .entry(strain_id.to_string())
            .or_default()
            .insertions += 1;
    }

    pub fn record_deletion(&mut self, strain_id: &str) {
        self.strains
            .entry(strain_id.to_string())
            .or_default()
            .deletions += 1;
    }

    /// Count one excluded record against the strain and the range label.
    pub fn record_exclusion(&mut self, strain_id: &str, label: &str) {
        self.strains
            .entry(strain_id.to_string())
            .or_default()
            .excluded += 1;
        *self
            .exclusions
            .entry(strain_id.to_string())
            .or_default()
            .entry(label.to_string())
            .or_default() += 1;
    }

    #[must_use]
    pub fn strain(&self, strain_id: &str) -> Option<&StrainStats> {
        self.strains.get(strain_id)
    }

    pub fn strains(&self) -> impl Iterator<Item = (&str, &StrainStats)> {
        self.strains.iter().map(|(id, stats)| (id.as_str(), stats))
    }

    /// Per-label exclusion counts for one strain, if any records of that
    /// strain were excluded.
    #[must_use]
    pub fn exclusions_for(&self, strain_id: &str) -> Option<&BTreeMap<String, u64>> {
        self.exclusions.get(strain_id)
    }
}
