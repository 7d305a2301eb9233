use std::fmt::{self, Display};

///
/// Identity of a variant for scoring: chromosome, position, reference
/// allele and the first alternate allele.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, PartialOrd, Ord)]
pub struct VariantKey {
    pub chrom: String,
    pub pos: u64,
    pub ref_allele: String,
    pub alt_allele: String,
}

impl VariantKey {
    pub fn new(chrom: &str, pos: u64, ref_allele: &str, alt_allele: &str) -> Self {
        VariantKey {
            chrom: chrom.to_string(),
            pos,
            ref_allele: ref_allele.to_string(),
            alt_allele: alt_allele.to_string(),
        }
    }

    ///
    /// Build a key from a VCF `ALT` column, keeping only the first allele.
    ///
    pub fn from_vcf_fields(chrom: &str, pos: u64, ref_allele: &str, alt_field: &str) -> Self {
        let first_alt = alt_field.split(',').next().unwrap_or(alt_field);
        VariantKey::new(chrom, pos, ref_allele, first_alt)
    }
}

impl Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}",
            self.chrom, self.pos, self.ref_allele, self.alt_allele
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    /// VEP encodes strand as `1` / `-1`; anything but `1` is reverse.
    pub fn from_vep(value: &str) -> Self {
        if value == "1" {
            Strand::Forward
        } else {
            Strand::Reverse
        }
    }
}

impl Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Forward => write!(f, "+"),
            Strand::Reverse => write!(f, "-"),
        }
    }
}

///
/// LOFTEE loss-of-function confidence tier.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LofTier {
    HighConfidence,
    LowConfidence,
    /// `OS`: other splice, flagged by LOFTEE's splice predictions.
    OtherSplice,
    Other(String),
    /// No prediction was made upstream.
    Unavailable,
}

impl LofTier {
    pub const UNAVAILABLE: &'static str = "NA";

    pub fn from_vep(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => LofTier::Unavailable,
            Some("HC") => LofTier::HighConfidence,
            Some("LC") => LofTier::LowConfidence,
            Some("OS") => LofTier::OtherSplice,
            Some(other) => LofTier::Other(other.to_string()),
        }
    }

    /// `HC` and `OS` both count as a confident loss-of-function call.
    pub fn is_confident_lof(&self) -> bool {
        matches!(self, LofTier::HighConfidence | LofTier::OtherSplice)
    }
}

impl Display for LofTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LofTier::HighConfidence => write!(f, "HC"),
            LofTier::LowConfidence => write!(f, "LC"),
            LofTier::OtherSplice => write!(f, "OS"),
            LofTier::Other(s) => write!(f, "{}", s),
            LofTier::Unavailable => write!(f, "{}", LofTier::UNAVAILABLE),
        }
    }
}

///
/// One value per SpliceAI direction: acceptor gain/loss, donor gain/loss.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpliceDeltas<T> {
    pub acceptor_gain: Option<T>,
    pub acceptor_loss: Option<T>,
    pub donor_gain: Option<T>,
    pub donor_loss: Option<T>,
}

impl<T: Copy> SpliceDeltas<T> {
    pub fn unavailable() -> Self {
        SpliceDeltas {
            acceptor_gain: None,
            acceptor_loss: None,
            donor_gain: None,
            donor_loss: None,
        }
    }

    pub fn values(&self) -> [Option<T>; 4] {
        [
            self.acceptor_gain,
            self.acceptor_loss,
            self.donor_gain,
            self.donor_loss,
        ]
    }
}

impl SpliceDeltas<f64> {
    /// Largest of the four scores; `None` unless all four are present.
    pub fn max_score(&self) -> Option<f64> {
        self.values()
            .into_iter()
            .try_fold(f64::NEG_INFINITY, |acc, v| v.map(|v| acc.max(v)))
    }
}

/// Render an optional field for tabular output.
pub fn display_optional<T: Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "NA".to_string(),
    }
}

///
/// Flat row extracted from one annotated VCF record.
///
#[derive(Debug, Clone, PartialEq)]
pub struct VariantRecord {
    pub key: VariantKey,
    pub symbol: String,
    pub symbol_source: String,
    pub hgnc_id: String,
    pub transcript_id: String,
    /// Coding change with the transcript prefix removed, e.g. `c.123+1G>A`.
    pub hgvsc: String,
    /// `&`-joined consequence terms.
    pub consequence: String,
    pub exon: String,
    pub intron: String,
    pub strand: Strand,
    pub delta_scores: SpliceDeltas<f64>,
    pub delta_positions: SpliceDeltas<i64>,
    pub max_delta: Option<f64>,
    pub lof: LofTier,
}

impl VariantRecord {
    pub const TSV_COLUMNS: [&'static str; 23] = [
        "CHROM",
        "POS",
        "REF",
        "ALT",
        "GeneSymbol",
        "SymbolSource",
        "HGNC_ID",
        "ENST",
        "HGVSc",
        "Consequence",
        "EXON",
        "INTRON",
        "Strand",
        "DS_AG",
        "DS_AL",
        "DS_DG",
        "DS_DL",
        "DP_AG",
        "DP_AL",
        "DP_DG",
        "DP_DL",
        "maxsplai",
        "loftee",
    ];

    pub fn consequences(&self) -> impl Iterator<Item = &str> {
        self.consequence.split('&')
    }

    /// HGNC id without the `HGNC:` prefix some VEP versions emit.
    pub fn hgnc_number(&self) -> &str {
        strip_hgnc_prefix(&self.hgnc_id)
    }

    ///
    /// Tab-separated rendering in [VariantRecord::TSV_COLUMNS] order.
    ///
    pub fn as_tsv_row(&self) -> String {
        let ds = self.delta_scores.values();
        let dp = self.delta_positions.values();
        [
            self.key.chrom.clone(),
            self.key.pos.to_string(),
            self.key.ref_allele.clone(),
            self.key.alt_allele.clone(),
            self.symbol.clone(),
            self.symbol_source.clone(),
            self.hgnc_id.clone(),
            self.transcript_id.clone(),
            self.hgvsc.clone(),
            self.consequence.clone(),
            self.exon.clone(),
            self.intron.clone(),
            self.strand.to_string(),
            display_optional(&ds[0]),
            display_optional(&ds[1]),
            display_optional(&ds[2]),
            display_optional(&ds[3]),
            display_optional(&dp[0]),
            display_optional(&dp[1]),
            display_optional(&dp[2]),
            display_optional(&dp[3]),
            display_optional(&self.max_delta),
            self.lof.to_string(),
        ]
        .join("\t")
    }
}

pub fn strip_hgnc_prefix(id: &str) -> &str {
    let id = id.trim();
    id.strip_prefix("HGNC:").unwrap_or(id)
}
