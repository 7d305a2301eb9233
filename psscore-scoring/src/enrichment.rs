//! Joining extracted rows with the fields computed by external
//! collaborators (gene model, ClinVar, CCRs, eLoF list).

use std::io::BufRead;
use std::path::{Path, PathBuf};

use fxhash::{FxHashMap, FxHashSet};
use log::{debug, info};

use psscore_core::ModelError;
use psscore_core::models::{
    EnrichedRecord, Enrichment, NmdPrediction, SpliceType, VariantKey, VariantRecord,
};
use psscore_core::models::variant::strip_hgnc_prefix;
use psscore_core::utils::{
    TableHeader, get_dynamic_reader, is_missing, parse_flag, parse_optional, parse_optional_int,
};

use crate::consts::ELOF_ID_COLUMN;
use crate::errors::{Result, ScoringError};

const KEY_COLUMNS: [&str; 4] = ["CHROM", "POS", "REF", "ALT"];

///
/// Anything that can hand back pre-computed enrichment for a variant.
///
pub trait EnrichmentSource: Sync {
    fn enrichment_for(&self, key: &VariantKey) -> Option<&Enrichment>;
}

///
/// Enrichment rows read from a tab-delimited file, keyed by variant.
///
#[derive(Clone, Debug, Default)]
pub struct EnrichmentTable {
    pub rows: FxHashMap<VariantKey, Enrichment>,
    pub path: Option<PathBuf>,
}

impl EnrichmentSource for EnrichmentTable {
    fn enrichment_for(&self, key: &VariantKey) -> Option<&Enrichment> {
        self.rows.get(key)
    }
}

impl EnrichmentSource for FxHashMap<VariantKey, Enrichment> {
    fn enrichment_for(&self, key: &VariantKey) -> Option<&Enrichment> {
        self.get(key)
    }
}

impl TryFrom<&Path> for EnrichmentTable {
    type Error = ScoringError;

    ///
    /// Read an [EnrichmentTable] from a tab-delimited file.
    ///
    /// The header must name `CHROM`, `POS`, `REF`, `ALT` and every enrichment
    /// column. When a variant appears twice the later row wins.
    fn try_from(value: &Path) -> Result<Self> {
        let reader = get_dynamic_reader(value)
            .map_err(|e| ModelError::FileReadError(format!("{:#}", e)))?;
        let mut lines = reader.lines();

        let header = match lines.next() {
            Some(line) => TableHeader::parse("enrichment", &line?),
            None => TableHeader::parse("enrichment", ""),
        };
        header.require(&KEY_COLUMNS)?;
        header.require(&Enrichment::TSV_COLUMNS)?;

        let mut rows = FxHashMap::default();
        for (index, line) in lines.enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let fields = header.split_row(index + 2, &line)?;
            let (key, enrichment) = parse_enrichment_row(&header, &fields)?;
            rows.insert(key, enrichment);
        }

        debug!("Read {} enrichment rows from {}", rows.len(), value.display());

        Ok(EnrichmentTable {
            rows,
            path: Some(value.to_path_buf()),
        })
    }
}

impl EnrichmentTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn parse_enrichment_row(header: &TableHeader, fields: &[&str]) -> Result<(VariantKey, Enrichment)> {
    let get = |column: &str| header.get(fields, column);

    let pos = get("POS")
        .trim()
        .parse::<u64>()
        .map_err(|_| ModelError::InvalidValue {
            field: "POS".to_string(),
            value: get("POS").to_string(),
        })?;
    let key = VariantKey::new(get("CHROM"), pos, get("REF"), get("ALT"));

    let transcript_full = match get("ENST_Full") {
        raw if is_missing(raw) => None,
        raw => Some(raw.trim().to_string()),
    };
    let Ok(splice_type) = get("SpliceType").parse::<SpliceType>();
    let Ok(nmd) = get("is_NMD_at_Canon").parse::<NmdPrediction>();

    let clinvar_same_motif = match get("same_motif_clinsigs") {
        raw if is_missing(raw) => vec![],
        raw => raw
            .split([',', '|'])
            .map(str::trim)
            .filter(|call| !call.is_empty())
            .map(String::from)
            .collect(),
    };

    let enrichment = Enrichment {
        transcript_full,
        is_canonical: parse_flag("is_Canonical", get("is_Canonical"))?,
        intron_distance: parse_optional_int("IntronDist", get("IntronDist"))?,
        splice_type,
        exon_upstream_distance: parse_optional_int("ex_up_dist", get("ex_up_dist"))?,
        exon_downstream_distance: parse_optional_int("ex_down_dist", get("ex_down_dist"))?,
        cds_length: parse_optional_int("CDS_Length", get("CDS_Length"))?,
        truncates_tenth: parse_flag("is_10%_truncation", get("is_10%_truncation"))?,
        is_frameshift: parse_flag("is_Frameshift", get("is_Frameshift"))?,
        nmd,
        skipped_ccr: parse_optional::<f64>("skipped_ccrs", get("skipped_ccrs"))?,
        deleted_ccr: parse_optional::<f64>("deleted_ccrs", get("deleted_ccrs"))?,
        clinvar_same_pos: get("clinvar_same_pos").trim().to_string(),
        clinvar_same_motif,
    };

    Ok((key, enrichment))
}

///
/// HGNC ids of genes on the eLoF list, without the `HGNC:` prefix.
///
#[derive(Clone, Debug, Default)]
pub struct ElofGenes {
    ids: FxHashSet<String>,
}

impl ElofGenes {
    ///
    /// Load the gene list from a tab-delimited file with an `HGNC_ID` column.
    ///
    /// # Arguments
    /// - path: path to the eLoF list
    pub fn from_file(path: &Path) -> Result<Self> {
        let reader = get_dynamic_reader(path)
            .map_err(|e| ModelError::FileReadError(format!("{:#}", e)))?;
        let mut lines = reader.lines();

        let header = match lines.next() {
            Some(line) => TableHeader::parse("eLoF", &line?),
            None => TableHeader::parse("eLoF", ""),
        };
        header.require(&[ELOF_ID_COLUMN])?;

        let mut ids = FxHashSet::default();
        for (index, line) in lines.enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let fields = header.split_row(index + 2, &line)?;
            let id = header.get(&fields, ELOF_ID_COLUMN);
            if !is_missing(id) {
                ids.insert(strip_hgnc_prefix(id).to_string());
            }
        }

        debug!("Read {} eLoF genes from {}", ids.len(), path.display());

        Ok(ElofGenes { ids })
    }

    pub fn contains(&self, hgnc_id: &str) -> bool {
        self.ids.contains(strip_hgnc_prefix(hgnc_id))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for ElofGenes {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        ElofGenes {
            ids: iter
                .into_iter()
                .map(|id| strip_hgnc_prefix(id.as_ref()).to_string())
                .collect(),
        }
    }
}

///
/// Keep only rows whose gene symbol comes from `source` (normally `HGNC`).
///
pub fn filter_symbol_source(records: Vec<VariantRecord>, source: &str) -> Vec<VariantRecord> {
    let total = records.len();
    let kept: Vec<VariantRecord> = records
        .into_iter()
        .filter(|r| r.symbol_source == source)
        .collect();

    info!(
        "Kept {} of {} variants with {} gene symbols",
        kept.len(),
        total,
        source
    );

    kept
}

///
/// Attach enrichment and eLoF membership to each record, validating the
/// enrichment once so the classifiers can rely on it.
///
/// Fails on the first record the source knows nothing about.
///
/// # Arguments
/// - records: extracted rows, already filtered
/// - source: per-variant enrichment
/// - elof: eLoF gene list
///
pub fn merge_enrichment<S: EnrichmentSource + ?Sized>(
    records: Vec<VariantRecord>,
    source: &S,
    elof: &ElofGenes,
) -> Result<Vec<EnrichedRecord>> {
    records
        .into_iter()
        .map(|record| -> Result<EnrichedRecord> {
            let enrichment = source
                .enrichment_for(&record.key)
                .ok_or_else(|| ScoringError::MissingEnrichment(record.key.to_string()))?
                .clone();
            let is_elof = elof.contains(record.hgnc_number());
            Ok(EnrichedRecord::new(record, enrichment, is_elof)?)
        })
        .collect()
}
