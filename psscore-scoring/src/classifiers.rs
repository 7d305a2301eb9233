//! The three independent classifiers. Each is a pure function of one
//! enriched record.

use psscore_core::models::{EnrichedRecord, Enrichment, NmdPrediction};

use crate::categories::Category;
use crate::consts::*;

///
/// Splice-impact category from SpliceAI, gene-model and CCR evidence.
///
/// Returns `None` when the record has no usable maximum delta score, in
/// which case the variant cannot be scored at all.
///
pub fn splice_impact(rec: &EnrichedRecord) -> Option<Category> {
    let max_delta = rec.record.max_delta?;
    let enrichment = &rec.enrichment;

    if enrichment.is_canonical {
        let confident_lof = enrichment.nmd == NmdPrediction::PossiblyNmd
            || rec.record.lof.is_confident_lof();

        if enrichment.is_frameshift && confident_lof {
            return Some(if rec.is_elof {
                Category::S10
            } else {
                Category::S11
            });
        }
        // in-frame, or frameshift without a confident LoF call
        return Some(truncation_category(enrichment));
    }

    if max_delta >= HIGH_DELTA {
        return Some(Category::S7);
    }
    if max_delta <= LOW_DELTA {
        return Some(outside_motif_category(rec));
    }
    Some(Category::S6)
}

/// s8 for constrained or substantially truncating events, s9 otherwise.
fn truncation_category(enrichment: &Enrichment) -> Category {
    let constrained = |percentile: Option<f64>| {
        percentile.is_some_and(|p| p >= CCR_CONSTRAINED_PERCENTILE)
    };

    if constrained(enrichment.skipped_ccr) || constrained(enrichment.deleted_ccr) {
        Category::S8
    } else if enrichment.truncates_tenth {
        Category::S8
    } else {
        Category::S9
    }
}

/// s4 when a low-delta variant sits outside the splice motif, s5 otherwise.
fn outside_motif_category(rec: &EnrichedRecord) -> Category {
    let enrichment = &rec.enrichment;

    if enrichment.splice_type.is_intronic() {
        let outside = enrichment
            .intron_distance
            .is_some_and(|d| d <= INTRON_MOTIF_UPSTREAM || d >= INTRON_MOTIF_DOWNSTREAM);
        return if outside { Category::S4 } else { Category::S5 };
    }

    if enrichment.splice_type.is_exonic() {
        let neutral = rec
            .record
            .consequences()
            .any(|c| SPLICE_NEUTRAL_CONSEQUENCES.contains(&c));
        let outside = matches!(
            (enrichment.exon_upstream_distance, enrichment.exon_downstream_distance),
            (Some(up), Some(down)) if up > EXON_MOTIF_UPSTREAM && down > EXON_MOTIF_DOWNSTREAM
        );
        return if neutral && outside {
            Category::S4
        } else {
            Category::S5
        };
    }

    Category::S5
}

///
/// Clinical-concordance category from ClinVar calls at the same position
/// and at the same splice motif.
///
pub fn clinical_concordance(enrichment: &Enrichment) -> Category {
    let same_pos = enrichment.clinvar_same_pos.replace('\'', "");

    if BENIGN_CALLS.contains(&same_pos.as_str()) {
        return Category::S15;
    }
    if PATHOGENIC_CALLS.contains(&same_pos.as_str()) {
        return Category::S1;
    }

    let motif = &enrichment.clinvar_same_motif;
    if motif.iter().any(|call| call.contains("Pathogenic")) {
        Category::S2
    } else if motif.iter().any(|call| call.contains("pathogenic")) {
        Category::UpperS2
    } else {
        Category::S3
    }
}

///
/// Recalibrates SpliceAI for canonical-site variants, where raw delta
/// scores tend to overstate (or understate) the effect.
///
/// Non-canonical variants, and canonical ones without a delta score, get s0.
///
pub fn canonical_recalibration(rec: &EnrichedRecord) -> Category {
    if !rec.enrichment.is_canonical {
        return Category::S0;
    }
    match rec.record.max_delta {
        Some(d) if d <= LOW_DELTA => Category::S12,
        Some(d) if d < HIGH_DELTA => Category::S13,
        Some(_) => Category::S14,
        None => Category::S0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use psscore_core::models::{LofTier, SpliceType};

    use crate::testing::{enriched, enrichment, with_clinvar};

    #[rstest]
    #[case(0.2)]
    #[case(0.25)]
    #[case(0.99)]
    fn test_non_canonical_high_delta_is_s7(#[case] max_delta: f64) {
        let mut rec = enriched(Some(max_delta), false);
        // none of these matter once the delta is high
        rec.enrichment.is_frameshift = true;
        rec.enrichment.truncates_tenth = true;
        rec.enrichment.splice_type = SpliceType::AcceptorExonic;
        rec.enrichment.exon_upstream_distance = Some(50);
        rec.enrichment.exon_downstream_distance = Some(50);
        rec.is_elof = true;

        assert_eq!(splice_impact(&rec), Some(Category::S7));
    }

    #[rstest]
    #[case(LofTier::HighConfidence, true, Category::S10)]
    #[case(LofTier::HighConfidence, false, Category::S11)]
    #[case(LofTier::OtherSplice, true, Category::S10)]
    #[case(LofTier::OtherSplice, false, Category::S11)]
    fn test_canonical_frameshift_confident_lof(
        #[case] lof: LofTier,
        #[case] is_elof: bool,
        #[case] expected: Category,
    ) {
        let mut rec = enriched(Some(0.5), true);
        rec.enrichment.is_frameshift = true;
        rec.record.lof = lof;
        rec.is_elof = is_elof;

        assert_eq!(splice_impact(&rec), Some(expected));
    }

    #[rstest]
    fn test_canonical_frameshift_possible_nmd() {
        let mut rec = enriched(Some(0.5), true);
        rec.enrichment.is_frameshift = true;
        rec.enrichment.nmd = NmdPrediction::PossiblyNmd;
        rec.record.lof = LofTier::LowConfidence;

        assert_eq!(splice_impact(&rec), Some(Category::S11));
    }

    #[rstest]
    #[case(true, Some(95.0), None, false, Category::S8)]
    #[case(true, None, Some(99.1), false, Category::S8)]
    #[case(true, Some(94.9), None, true, Category::S8)]
    #[case(true, Some(10.0), Some(20.0), false, Category::S9)]
    #[case(false, Some(96.0), None, false, Category::S8)]
    #[case(false, None, None, true, Category::S8)]
    #[case(false, None, None, false, Category::S9)]
    fn test_canonical_truncation(
        #[case] is_frameshift: bool,
        #[case] skipped: Option<f64>,
        #[case] deleted: Option<f64>,
        #[case] truncates_tenth: bool,
        #[case] expected: Category,
    ) {
        let mut rec = enriched(Some(0.5), true);
        rec.enrichment.is_frameshift = is_frameshift;
        rec.enrichment.skipped_ccr = skipped;
        rec.enrichment.deleted_ccr = deleted;
        rec.enrichment.truncates_tenth = truncates_tenth;

        assert_eq!(splice_impact(&rec), Some(expected));
    }

    #[rstest]
    #[case(-21, Category::S4)]
    #[case(-30, Category::S4)]
    #[case(7, Category::S4)]
    #[case(-20, Category::S5)]
    #[case(6, Category::S5)]
    fn test_low_delta_intronic(#[case] distance: i64, #[case] expected: Category) {
        let mut rec = enriched(Some(0.10), false);
        rec.enrichment.splice_type = SpliceType::AcceptorIntronic;
        rec.enrichment.intron_distance = Some(distance);

        assert_eq!(splice_impact(&rec), Some(expected));
    }

    #[rstest]
    #[case("synonymous_variant", 2, 4, Category::S4)]
    #[case("splice_region_variant&intron_variant", 5, 10, Category::S4)]
    #[case("synonymous_variant", 1, 4, Category::S5)]
    #[case("synonymous_variant", 2, 3, Category::S5)]
    #[case("missense_variant", 20, 20, Category::S5)]
    fn test_low_delta_exonic(
        #[case] consequence: &str,
        #[case] upstream: i64,
        #[case] downstream: i64,
        #[case] expected: Category,
    ) {
        let mut rec = enriched(Some(0.0), false);
        rec.record.consequence = consequence.to_string();
        rec.enrichment.splice_type = SpliceType::DonorExonic;
        rec.enrichment.intron_distance = None;
        rec.enrichment.exon_upstream_distance = Some(upstream);
        rec.enrichment.exon_downstream_distance = Some(downstream);

        assert_eq!(splice_impact(&rec), Some(expected));
    }

    #[rstest]
    fn test_low_delta_other_splice_type_is_s5() {
        let mut rec = enriched(Some(0.05), false);
        rec.enrichment.splice_type = SpliceType::Other("Intronic".to_string());
        rec.enrichment.intron_distance = Some(-300);

        assert_eq!(splice_impact(&rec), Some(Category::S5));
    }

    #[rstest]
    #[case(0.10, Category::S5)]
    #[case(0.15, Category::S6)]
    #[case(0.20, Category::S7)]
    fn test_non_canonical_thresholds(#[case] max_delta: f64, #[case] expected: Category) {
        // default fixture sits inside the donor motif
        let rec = enriched(Some(max_delta), false);
        assert_eq!(splice_impact(&rec), Some(expected));
    }

    #[rstest]
    fn test_unavailable_delta_has_no_splice_impact() {
        assert_eq!(splice_impact(&enriched(None, true)), None);
        assert_eq!(splice_impact(&enriched(None, false)), None);
    }

    #[rstest]
    #[case("Benign", &[], Category::S15)]
    #[case("'Likely_benign'", &["Pathogenic"], Category::S15)]
    #[case("Benign/Likely_benign", &[], Category::S15)]
    #[case("Pathogenic", &[], Category::S1)]
    #[case("'Likely_pathogenic'", &[], Category::S1)]
    #[case("Pathogenic/Likely_pathogenic", &["Benign"], Category::S1)]
    #[case("Uncertain_significance", &["Benign", "Pathogenic"], Category::S2)]
    #[case("NA", &["Pathogenic/Likely_pathogenic"], Category::S2)]
    #[case("NA", &["Uncertain_significance", "Benign"], Category::S3)]
    #[case("NA", &["Conflicting_classifications_of_pathogenicity"], Category::UpperS2)]
    #[case("NA", &["likely pathogenic"], Category::UpperS2)]
    #[case("NA", &[], Category::S3)]
    fn test_clinical_concordance(
        #[case] same_pos: &str,
        #[case] same_motif: &[&str],
        #[case] expected: Category,
    ) {
        let rec = with_clinvar(enriched(Some(0.5), false), same_pos, same_motif);
        assert_eq!(clinical_concordance(&rec.enrichment), expected);
    }

    #[rstest]
    #[case(Some(0.0), Category::S12)]
    #[case(Some(0.10), Category::S12)]
    #[case(Some(0.15), Category::S13)]
    #[case(Some(0.20), Category::S14)]
    #[case(Some(0.95), Category::S14)]
    #[case(None, Category::S0)]
    fn test_canonical_recalibration(#[case] max_delta: Option<f64>, #[case] expected: Category) {
        assert_eq!(canonical_recalibration(&enriched(max_delta, true)), expected);
    }

    #[rstest]
    fn test_non_canonical_is_not_recalibrated() {
        assert_eq!(canonical_recalibration(&enriched(Some(0.9), false)), Category::S0);
        assert!(!enrichment(false).is_canonical);
    }
}
