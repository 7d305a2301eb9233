/// INFO key of the VEP transcript-consequence annotation.
pub const CSQ_ID: &str = "CSQ";
/// INFO key of the SpliceAI delta-score annotation.
pub const SPLICEAI_ID: &str = "SpliceAI";

/// LOFTEE field; optional, rows fall back to an unavailable tier.
pub const CSQ_LOF_FIELD: &str = "LoF";

pub const SPLICEAI_REQUIRED_FIELDS: [&str; 8] = [
    "DS_AG", "DS_AL", "DS_DG", "DS_DL", "DP_AG", "DP_AL", "DP_DG", "DP_DL",
];

/// Placeholder for a coding change VEP did not report.
pub const HGVSC_UNAVAILABLE: &str = "NA";

pub const PRIORITY_SCORE_ID: &str = "PriorityScore";
pub const PRIORITY_SCORE_HEADER: &str = "##INFO=<ID=PriorityScore,Number=1,Type=Integer,Description=\"Priority score for pathogenic splicing SNVs (range -10 to 14; values ≥1 are screening-positive)\">";

pub const DEFAULT_EXTRACT_OUT: &str = "variants.tsv";
