//! Aggregation of the three classifier labels into a priority score, and
//! the parallel batch driver.

use log::{debug, info};
use rayon::prelude::*;

use psscore_core::models::{EnrichedRecord, ScoreTable, ScoredVariant};

use crate::categories::Category;
use crate::classifiers::{canonical_recalibration, clinical_concordance, splice_impact};
use crate::errors::{Result, ScoringError};

///
/// An enriched record together with its three labels and final score.
///
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecord {
    pub enriched: EnrichedRecord,
    pub splice_impact: Option<Category>,
    pub clinical: Category,
    pub recalibration: Category,
    pub priority_score: Option<i32>,
}

impl ScoredRecord {
    pub fn to_scored_variant(&self) -> ScoredVariant {
        ScoredVariant {
            key: self.enriched.record.key.clone(),
            priority_score: self.priority_score,
        }
    }
}

///
/// Sum the weights of the three labels.
///
/// Returns `Ok(None)` when splice impact is not available. A label with no
/// weight is an error rather than being counted as zero.
///
/// # Arguments
/// - variant: identity used in error messages
/// - splice: splice-impact label, if any
/// - clinical: clinical-concordance label
/// - recalibration: canonical-recalibration label
///
pub fn priority_score(
    variant: &str,
    splice: Option<Category>,
    clinical: Category,
    recalibration: Category,
) -> Result<Option<i32>> {
    let Some(splice) = splice else {
        return Ok(None);
    };

    let mut total = 0;
    for category in [splice, clinical, recalibration] {
        total += category
            .weight()
            .ok_or_else(|| ScoringError::UnweightedCategory {
                category: category.to_string(),
                variant: variant.to_string(),
            })?;
    }

    Ok(Some(total))
}

/// Classify and score one record.
pub fn score_record(enriched: EnrichedRecord) -> Result<ScoredRecord> {
    let splice = splice_impact(&enriched);
    let clinical = clinical_concordance(&enriched.enrichment);
    let recalibration = canonical_recalibration(&enriched);

    let score = priority_score(
        &enriched.record.key.to_string(),
        splice,
        clinical,
        recalibration,
    )?;

    Ok(ScoredRecord {
        enriched,
        splice_impact: splice,
        clinical,
        recalibration,
        priority_score: score,
    })
}

///
/// Score a batch of records on a dedicated rayon pool.
///
/// Output order matches input order and does not depend on the number of
/// workers. The first failing record aborts the batch.
///
/// # Arguments
/// - records: enriched records to score
/// - n_workers: size of the thread pool, at least 1
///
pub fn score_records(records: Vec<EnrichedRecord>, n_workers: usize) -> Result<Vec<ScoredRecord>> {
    if n_workers == 0 {
        return Err(ScoringError::Config(
            "n_workers must be at least 1".to_string(),
        ));
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(n_workers)
        .build()
        .map_err(|e| ScoringError::ThreadPool(e.to_string()))?;

    info!(
        "Scoring {} variants on {} workers",
        records.len(),
        pool.current_num_threads()
    );

    let scored = pool.install(|| {
        records
            .into_par_iter()
            .map(score_record)
            .collect::<Result<Vec<ScoredRecord>>>()
    })?;

    let unscored = scored.iter().filter(|r| r.priority_score.is_none()).count();
    debug!("{} variants left unscored", unscored);

    Ok(scored)
}

/// The (identity, score) table handed to the VCF writer.
pub fn to_score_table(scored: &[ScoredRecord]) -> ScoreTable {
    scored.iter().map(ScoredRecord::to_scored_variant).collect()
}
