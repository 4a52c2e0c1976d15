//! The merge engine.
//!
//! One `Consolidator` owns all shared state for a run: the reference-base
//! table, the per-strain SNP table, the indel log, and the stats. Input files
//! are merged strictly one at a time; the tables are plain mutable state with
//! no synchronization, and the conflict diagnostics ("first two writers")
//! only make sense under that sequential order.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::debug;

use crate::core::record::{SnpRecord, StrainContext};
use crate::core::types::Locus;
use crate::merge::exclusion::ExclusionIndex;
use crate::merge::stats::StatsAggregator;
use crate::merge::tables::{IndelLogEntry, ReferenceEntry, SnpRow};
use crate::merge::MergeError;
use crate::parsing::reader::SnpReader;

pub struct Consolidator {
    exclusions: ExclusionIndex,
    /// Reference bases keyed by locus; the key order is the serialization
    /// order, so ascending output falls out of the map itself
    reference: BTreeMap<Locus, ReferenceEntry>,
    snp_rows: Vec<SnpRow>,
    /// Base already recorded per (strain, locus), for duplicate detection
    snp_index: HashMap<(String, Locus), String>,
    indel_log: Vec<IndelLogEntry>,
    stats: StatsAggregator,
    placeholder_emitted: HashSet<String>,
}

impl Consolidator {
    #[must_use]
    pub fn new(exclusions: ExclusionIndex) -> Self {
        Self {
            exclusions,
            reference: BTreeMap::new(),
            snp_rows: Vec::new(),
            snp_index: HashMap::new(),
            indel_log: Vec::new(),
            stats: StatsAggregator::new(),
            placeholder_emitted: HashSet::new(),
        }
    }

    /// Merge every record of one input file into the shared tables.
    ///
    /// The strain gets a stats entry up front, so it appears in the report
    /// even when the file yields no records at all. A strain that ends the
    /// file with zero qualifying SNP rows gets one placeholder row.
    pub fn merge_file(&mut self, reader: SnpReader) -> Result<(), MergeError> {
        let context = reader.context().clone();
        let strain = context.strain_label().to_string();
        debug!(strain = %strain, file = %context.file_name, format = %context.format, "merging file");

        self.stats.touch(&strain);

        for record in reader {
            let record = record?;
            self.consolidate(&context, &record)?;
        }

        let snps = self.stats.strain(&strain).map_or(0, |s| s.snps);
        if snps == 0 && self.placeholder_emitted.insert(strain.clone()) {
            debug!(strain = %strain, "no qualifying SNPs; emitting placeholder row");
            self.snp_rows.push(SnpRow::NoCalls { strain_id: strain });
        }

        Ok(())
    }

    /// Apply one record to the shared tables.
    fn consolidate(
        &mut self,
        context: &StrainContext,
        record: &SnpRecord,
    ) -> Result<(), MergeError> {
        let strain = context.strain_label();

        // Indels go to the log and never touch the reference or SNP tables.
        if let Some(kind) = record.indel {
            debug!(strain, line = record.line_number, %kind, "indel record");
            self.indel_log.push(IndelLogEntry {
                strain_id: strain.to_string(),
                format: context.format,
                raw_line: record.raw_line.clone(),
                kind,
            });
            match kind {
                crate::core::types::IndelKind::Insertion => self.stats.record_insertion(strain),
                crate::core::types::IndelKind::Deletion => self.stats.record_deletion(strain),
            }
        }

        // Exclusion ranges are tested for every record, indels included, so
        // the exclusion report reflects everything that fell in a range.
        // Composite loci carry no bare position and bypass the check.
        let excluded = record
            .locus
            .point()
            .and_then(|pos| self.exclusions.lookup(pos));
        if let Some(label) = excluded {
            debug!(strain, locus = %record.locus, label, "excluded locus");
            self.stats.record_exclusion(strain, label);
        }

        if record.is_indel() || excluded.is_some() {
            return Ok(());
        }

        self.append_snp(context, record)?;
        self.update_reference(context, record)
    }

    fn append_snp(&mut self, context: &StrainContext, record: &SnpRecord) -> Result<(), MergeError> {
        let strain = context.strain_label();
        let key = (strain.to_string(), record.locus.clone());

        if let Some(existing_base) = self.snp_index.get(&key) {
            if *existing_base == record.snp_base {
                // Same call observed twice; downstream requires uniqueness
                // on (strain, locus), so drop the duplicate silently.
                debug!(strain, locus = %record.locus, "duplicate identical SNP row ignored");
                return Ok(());
            }
            return Err(MergeError::SnpConflict {
                strain_id: strain.to_string(),
                locus: record.locus.clone(),
                base: record.snp_base.clone(),
                existing_base: existing_base.clone(),
                file: context.file_name.clone(),
                line_number: record.line_number,
            });
        }

        self.snp_index.insert(key, record.snp_base.clone());
        self.snp_rows.push(SnpRow::Call {
            strain_id: strain.to_string(),
            locus: record.locus.clone(),
            base: record.snp_base.clone(),
        });
        self.stats.record_snp(strain);
        Ok(())
    }

    fn update_reference(
        &mut self,
        context: &StrainContext,
        record: &SnpRecord,
    ) -> Result<(), MergeError> {
        if let Some(existing) = self.reference.get(&record.locus) {
            if existing.base != record.ref_base {
                return Err(MergeError::ReferenceConflict {
                    locus: record.locus.clone(),
                    base: record.ref_base.clone(),
                    file: context.file_name.clone(),
                    line_number: record.line_number,
                    existing_base: existing.base.clone(),
                    existing_file: existing.file.clone(),
                    existing_line: existing.line_number,
                });
            }
            debug!(locus = %record.locus, "duplicate identical reference base");
            return Ok(());
        }

        self.reference.insert(
            record.locus.clone(),
            ReferenceEntry {
                base: record.ref_base.clone(),
                file: context.file_name.clone(),
                line_number: record.line_number,
            },
        );
        Ok(())
    }

    /// Reference entries in ascending locus order.
    pub fn reference(&self) -> impl Iterator<Item = (&Locus, &ReferenceEntry)> {
        self.reference.iter()
    }

    #[must_use]
    pub fn snp_rows(&self) -> &[SnpRow] {
        &self.snp_rows
    }

    #[must_use]
    pub fn indel_log(&self) -> &[IndelLogEntry] {
        &self.indel_log
    }

    #[must_use]
    pub fn stats(&self) -> &StatsAggregator {
        &self.stats
    }
}
