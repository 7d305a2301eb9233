/// Non-canonical variants at or above this delta score are scored s7 outright.
pub const HIGH_DELTA: f64 = 0.2;
/// At or below this delta score a variant is considered splice-neutral.
pub const LOW_DELTA: f64 = 0.1;

/// CCR percentile at which a skipped/deleted region counts as constrained.
pub const CCR_CONSTRAINED_PERCENTILE: f64 = 95.0;

/// Intronic distances at or beyond these bounds are outside the splice motif.
pub const INTRON_MOTIF_UPSTREAM: i64 = -21;
pub const INTRON_MOTIF_DOWNSTREAM: i64 = 7;

/// Exonic distances beyond these bounds are outside the splice motif.
pub const EXON_MOTIF_UPSTREAM: i64 = 1;
pub const EXON_MOTIF_DOWNSTREAM: i64 = 3;

/// Consequences that make an exonic splice-region variant eligible for s4.
pub const SPLICE_NEUTRAL_CONSEQUENCES: [&str; 2] = ["intron_variant", "synonymous_variant"];

pub const BENIGN_CALLS: [&str; 3] = ["Benign", "Likely_benign", "Benign/Likely_benign"];
pub const PATHOGENIC_CALLS: [&str; 3] = [
    "Pathogenic",
    "Likely_pathogenic",
    "Pathogenic/Likely_pathogenic",
];

pub const DEFAULT_N_WORKERS: usize = 2;
pub const DEFAULT_SYMBOL_SOURCE: &str = "HGNC";

/// Column of the eLoF gene list holding HGNC ids.
pub const ELOF_ID_COLUMN: &str = "HGNC_ID";
