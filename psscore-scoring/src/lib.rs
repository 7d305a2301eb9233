//! # Rule-based priority scoring of splice-disrupting variants
//!
//! Three independent classifiers label each enriched variant:
//!
//! - splice impact (SpliceAI delta, gene model, CCR constraint)
//! - clinical concordance (ClinVar calls at the same position / motif)
//! - canonical recalibration (SpliceAI delta at canonical sites)
//!
//! and the fixed weights of the three labels add up to the priority score.
//! Batches are scored in parallel on an explicit rayon pool.
pub mod categories;
pub mod classifiers;
pub mod config;
pub mod consts;
pub mod enrichment;
pub mod errors;
pub mod report;
pub mod scoring;

#[cfg(test)]
mod testing;

// re-exports
pub use categories::Category;
pub use config::ScoringConfig;
pub use enrichment::{
    ElofGenes, EnrichmentSource, EnrichmentTable, filter_symbol_source, merge_enrichment,
};
pub use errors::{Result, ScoringError};
pub use report::{raw_tsv_path, write_scored_records};
pub use scoring::{ScoredRecord, priority_score, score_record, score_records, to_score_table};
