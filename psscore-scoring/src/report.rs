//! Tab-delimited dump of the enriched, scored table.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;

use psscore_core::models::variant::display_optional;
use psscore_core::models::{Enrichment, VariantRecord};
use psscore_core::utils::remove_all_extensions;

use crate::errors::Result;
use crate::scoring::ScoredRecord;

pub const LABEL_COLUMNS: [&str; 5] = [
    "is_eLoF",
    "splice_impact",
    "clinical_concordance",
    "canonical_recalibration",
    "PriorityScore",
];

///
/// Where the raw table for `input` goes: `<output dir>/<input stem>.raw.tsv`.
///
pub fn raw_tsv_path(input: &Path, output: &Path) -> PathBuf {
    let dir = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    dir.join(format!("{}.raw.tsv", remove_all_extensions(input)))
}

///
/// Write every scored record, with all extracted, enrichment and label
/// columns, to a tab-delimited file.
///
/// # Arguments
/// - path: the path to the file to dump to
/// - scored: records in output order
///
pub fn write_scored_records(path: &Path, scored: &[ScoredRecord]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);

    let header: Vec<&str> = VariantRecord::TSV_COLUMNS
        .iter()
        .chain(Enrichment::TSV_COLUMNS.iter())
        .chain(LABEL_COLUMNS.iter())
        .copied()
        .collect();
    writeln!(writer, "{}", header.join("\t"))?;

    for row in scored {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            row.enriched.record.as_tsv_row(),
            row.enriched.enrichment.as_tsv_row(),
            row.enriched.is_elof,
            display_optional(&row.splice_impact),
            row.clinical,
            row.recalibration,
            display_optional(&row.priority_score),
        )?;
    }
    writer.flush()?;

    info!("Wrote {} scored rows to {}", scored.len(), path.display());

    Ok(())
}
