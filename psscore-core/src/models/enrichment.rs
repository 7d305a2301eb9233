use std::fmt::{self, Display};
use std::str::FromStr;

use crate::errors::{ModelError, Result};
use crate::models::variant::{VariantRecord, display_optional};

///
/// Where a variant sits relative to the nearest splice site.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpliceType {
    AcceptorIntronic,
    DonorIntronic,
    AcceptorExonic,
    DonorExonic,
    /// Anything else the upstream classifier emits (deep intronic, UTR, ...).
    Other(String),
}

impl SpliceType {
    pub fn is_intronic(&self) -> bool {
        matches!(self, SpliceType::AcceptorIntronic | SpliceType::DonorIntronic)
    }

    pub fn is_exonic(&self) -> bool {
        matches!(self, SpliceType::AcceptorExonic | SpliceType::DonorExonic)
    }
}

impl FromStr for SpliceType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim() {
            "Acceptor_int" => SpliceType::AcceptorIntronic,
            "Donor_int" => SpliceType::DonorIntronic,
            "Acceptor_ex" => SpliceType::AcceptorExonic,
            "Donor_ex" => SpliceType::DonorExonic,
            other => SpliceType::Other(other.to_string()),
        })
    }
}

impl Display for SpliceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpliceType::AcceptorIntronic => write!(f, "Acceptor_int"),
            SpliceType::DonorIntronic => write!(f, "Donor_int"),
            SpliceType::AcceptorExonic => write!(f, "Acceptor_ex"),
            SpliceType::DonorExonic => write!(f, "Donor_ex"),
            SpliceType::Other(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NmdPrediction {
    PossiblyNmd,
    Other(String),
}

impl FromStr for NmdPrediction {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim() {
            "Possibly_NMD" => NmdPrediction::PossiblyNmd,
            other => NmdPrediction::Other(other.to_string()),
        })
    }
}

impl Display for NmdPrediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NmdPrediction::PossiblyNmd => write!(f, "Possibly_NMD"),
            NmdPrediction::Other(s) => write!(f, "{}", s),
        }
    }
}

///
/// Fields derived by external collaborators (gene model, ClinVar, CCRs)
/// for one variant. The scoring engine consumes these but never computes them.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Enrichment {
    /// Versioned transcript id resolved from the gene model.
    pub transcript_full: Option<String>,
    pub is_canonical: bool,
    /// Signed distance to the nearest exon boundary for intronic variants.
    pub intron_distance: Option<i64>,
    pub splice_type: SpliceType,
    pub exon_upstream_distance: Option<i64>,
    pub exon_downstream_distance: Option<i64>,
    pub cds_length: Option<i64>,
    /// Predicted truncation removes at least 10% of the coding sequence.
    pub truncates_tenth: bool,
    pub is_frameshift: bool,
    pub nmd: NmdPrediction,
    /// CCR percentile over skipped exons.
    pub skipped_ccr: Option<f64>,
    /// CCR percentile over deleted exonic sequence.
    pub deleted_ccr: Option<f64>,
    /// ClinVar significance at the same position, possibly quoted.
    pub clinvar_same_pos: String,
    /// ClinVar significances of variants hitting the same splice motif.
    pub clinvar_same_motif: Vec<String>,
}

impl Enrichment {
    pub const TSV_COLUMNS: [&'static str; 14] = [
        "ENST_Full",
        "is_Canonical",
        "IntronDist",
        "SpliceType",
        "ex_up_dist",
        "ex_down_dist",
        "CDS_Length",
        "is_10%_truncation",
        "is_Frameshift",
        "is_NMD_at_Canon",
        "skipped_ccrs",
        "deleted_ccrs",
        "clinvar_same_pos",
        "same_motif_clinsigs",
    ];

    ///
    /// Check the distances each splice type needs are present, so the
    /// classifiers never see a half-filled row.
    ///
    pub fn validate(&self, variant: &str) -> Result<()> {
        let incomplete = |field: &str| ModelError::IncompleteEnrichment {
            variant: variant.to_string(),
            splice_type: self.splice_type.to_string(),
            field: field.to_string(),
        };

        if self.splice_type.is_intronic() && self.intron_distance.is_none() {
            return Err(incomplete("IntronDist"));
        }
        if self.splice_type.is_exonic() {
            if self.exon_upstream_distance.is_none() {
                return Err(incomplete("ex_up_dist"));
            }
            if self.exon_downstream_distance.is_none() {
                return Err(incomplete("ex_down_dist"));
            }
        }
        Ok(())
    }

    pub fn as_tsv_row(&self) -> String {
        [
            self.transcript_full.clone().unwrap_or_else(|| "NA".to_string()),
            yes_no(self.is_canonical).to_string(),
            display_optional(&self.intron_distance),
            self.splice_type.to_string(),
            display_optional(&self.exon_upstream_distance),
            display_optional(&self.exon_downstream_distance),
            display_optional(&self.cds_length),
            self.truncates_tenth.to_string(),
            self.is_frameshift.to_string(),
            self.nmd.to_string(),
            display_optional(&self.skipped_ccr),
            display_optional(&self.deleted_ccr),
            self.clinvar_same_pos.clone(),
            self.clinvar_same_motif.join(","),
        ]
        .join("\t")
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

///
/// An extracted row joined with its collaborator-supplied fields.
///
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub record: VariantRecord,
    pub enrichment: Enrichment,
    /// Gene is on the eLoF (loss-of-function tolerant) list.
    pub is_elof: bool,
}

impl EnrichedRecord {
    pub fn new(record: VariantRecord, enrichment: Enrichment, is_elof: bool) -> Result<Self> {
        enrichment.validate(&record.key.to_string())?;
        Ok(EnrichedRecord {
            record,
            enrichment,
            is_elof,
        })
    }
}
