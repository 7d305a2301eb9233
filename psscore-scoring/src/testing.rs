//! Record builders shared by the unit tests.

use psscore_core::models::{
    EnrichedRecord, Enrichment, LofTier, NmdPrediction, SpliceDeltas, SpliceType, Strand,
    VariantKey, VariantRecord,
};

pub fn record(max_delta: Option<f64>) -> VariantRecord {
    let mut delta_scores = SpliceDeltas::unavailable();
    delta_scores.acceptor_gain = max_delta;

    VariantRecord {
        key: VariantKey::new("1", 1000, "A", "G"),
        symbol: "GENE1".to_string(),
        symbol_source: "HGNC".to_string(),
        hgnc_id: "HGNC:1100".to_string(),
        transcript_id: "ENST00000000001".to_string(),
        hgvsc: "c.100+5A>G".to_string(),
        consequence: "splice_region_variant&intron_variant".to_string(),
        exon: String::new(),
        intron: "2/10".to_string(),
        strand: Strand::Forward,
        delta_scores,
        delta_positions: SpliceDeltas::unavailable(),
        max_delta,
        lof: LofTier::Unavailable,
    }
}

pub fn enrichment(is_canonical: bool) -> Enrichment {
    Enrichment {
        transcript_full: Some("ENST00000000001.4".to_string()),
        is_canonical,
        intron_distance: Some(5),
        splice_type: SpliceType::DonorIntronic,
        exon_upstream_distance: None,
        exon_downstream_distance: None,
        cds_length: Some(1200),
        truncates_tenth: false,
        is_frameshift: false,
        nmd: NmdPrediction::Other("NA".to_string()),
        skipped_ccr: None,
        deleted_ccr: None,
        clinvar_same_pos: "NA".to_string(),
        clinvar_same_motif: vec![],
    }
}

pub fn enriched(max_delta: Option<f64>, is_canonical: bool) -> EnrichedRecord {
    EnrichedRecord {
        record: record(max_delta),
        enrichment: enrichment(is_canonical),
        is_elof: false,
    }
}

pub fn with_clinvar(mut rec: EnrichedRecord, same_pos: &str, same_motif: &[&str]) -> EnrichedRecord {
    rec.enrichment.clinvar_same_pos = same_pos.to_string();
    rec.enrichment.clinvar_same_motif = same_motif.iter().map(|s| s.to_string()).collect();
    rec
}
