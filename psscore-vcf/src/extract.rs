//! Flattening of CSQ/SpliceAI annotated VCF records into [VariantRecord] rows.
//!
//! Reads a VCF file (plain text or gzipped/bgzf), resolves the annotation
//! layouts from its header and produces one typed row per record.

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use fxhash::FxHashSet;
use log::{debug, info, warn};

use psscore_core::models::{LofTier, SpliceDeltas, Strand, VariantKey, VariantRecord};
use psscore_core::utils::{get_dynamic_reader, parse_optional};

use crate::consts::*;
use crate::errors::{Result, VcfError};
use crate::header::{AnnotationHeader, AnnotationLayout};

/// Resolved CSQ subfield positions.
#[derive(Debug, Clone)]
pub struct CsqLayout {
    symbol: usize,
    symbol_source: usize,
    hgnc_id: usize,
    feature: usize,
    hgvsc: usize,
    consequence: usize,
    exon: usize,
    intron: usize,
    strand: usize,
    lof: Option<usize>,
}

impl TryFrom<&AnnotationLayout> for CsqLayout {
    type Error = VcfError;

    fn try_from(layout: &AnnotationLayout) -> Result<Self> {
        Ok(CsqLayout {
            symbol: layout.require("SYMBOL")?,
            symbol_source: layout.require("SYMBOL_SOURCE")?,
            hgnc_id: layout.require("HGNC_ID")?,
            feature: layout.require("Feature")?,
            hgvsc: layout.require("HGVSc")?,
            consequence: layout.require("Consequence")?,
            exon: layout.require("EXON")?,
            intron: layout.require("INTRON")?,
            strand: layout.require("STRAND")?,
            lof: layout.index(CSQ_LOF_FIELD),
        })
    }
}

/// Resolved SpliceAI subfield positions: `DS_*` scores, then `DP_*` offsets.
#[derive(Debug, Clone)]
pub struct SpliceAiLayout {
    scores: [usize; 4],
    positions: [usize; 4],
}

impl TryFrom<&AnnotationLayout> for SpliceAiLayout {
    type Error = VcfError;

    fn try_from(layout: &AnnotationLayout) -> Result<Self> {
        let mut idx = [0usize; 8];
        for (slot, field) in idx.iter_mut().zip(SPLICEAI_REQUIRED_FIELDS) {
            *slot = layout.require(field)?;
        }
        Ok(SpliceAiLayout {
            scores: [idx[0], idx[1], idx[2], idx[3]],
            positions: [idx[4], idx[5], idx[6], idx[7]],
        })
    }
}

///
/// Extract one flat row per record of an annotated VCF file.
///
/// # Arguments
/// - vcf_path: path to a `.vcf`, `.vcf.gz` or `.vcf.bgz` file
///
pub fn extract_variant_records(vcf_path: &Path) -> Result<Vec<VariantRecord>> {
    let reader =
        get_dynamic_reader(vcf_path).map_err(|e| VcfError::Open(format!("{:#}", e)))?;
    let records = extract_from_reader(reader)?;
    info!(
        "Extracted {} variant rows from {}",
        records.len(),
        vcf_path.display()
    );
    Ok(records)
}

///
/// Extract rows from any buffered VCF stream.
///
/// The header is consumed first; a missing CSQ or SpliceAI definition
/// aborts before any record is parsed. Identical rows are kept once, in
/// first-seen order.
///
pub fn extract_from_reader<R: BufRead>(mut reader: R) -> Result<Vec<VariantRecord>> {
    let mut meta_lines: Vec<String> = Vec::new();
    let mut line_buf = String::new();
    let mut line_no = 0usize;
    let mut saw_column_header = false;

    loop {
        line_buf.clear();
        if reader.read_line(&mut line_buf)? == 0 {
            break;
        }
        line_no += 1;
        let line = line_buf.trim_end_matches(['\n', '\r']);
        if line.starts_with("#CHROM") {
            saw_column_header = true;
            break;
        }
        if line.starts_with("##") {
            meta_lines.push(line.to_string());
        }
    }

    let header = AnnotationHeader::from_meta_lines(meta_lines.iter().map(String::as_str))?;
    if !saw_column_header {
        return Err(VcfError::MissingColumnHeader);
    }
    let csq = CsqLayout::try_from(&header.csq)?;
    let spliceai = SpliceAiLayout::try_from(&header.spliceai)?;
    debug!(
        "CSQ declares {} fields, SpliceAI declares {} fields",
        header.csq.width(),
        header.spliceai.width()
    );

    let mut records = Vec::new();
    let mut seen: FxHashSet<String> = FxHashSet::default();

    loop {
        line_buf.clear();
        if reader.read_line(&mut line_buf)? == 0 {
            break;
        }
        line_no += 1;
        let line = line_buf.trim_end_matches(['\n', '\r']);
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(record) = parse_record(line_no, line, &csq, &spliceai)? {
            if seen.insert(record.as_tsv_row()) {
                records.push(record);
            }
        }
    }

    Ok(records)
}

/// Value of `key` in a VCF INFO column, if present.
pub fn info_value<'a>(info: &'a str, key: &str) -> Option<&'a str> {
    info.split(';')
        .find_map(|entry| entry.strip_prefix(key)?.strip_prefix('='))
}

/// Coding change with everything up to the first `:` removed.
pub fn coding_change(hgvsc: &str) -> &str {
    match hgvsc.split_once(':') {
        Some((_, change)) => change,
        None => HGVSC_UNAVAILABLE,
    }
}

fn parse_record(
    line_no: usize,
    line: &str,
    csq: &CsqLayout,
    spliceai: &SpliceAiLayout,
) -> Result<Option<VariantRecord>> {
    let fields: Vec<&str> = line.splitn(9, '\t').collect();
    if fields.len() < 8 {
        return Err(VcfError::MalformedRecord {
            line: line_no,
            reason: format!("expected at least 8 columns, found {}", fields.len()),
        });
    }

    let pos = fields[1]
        .parse::<u64>()
        .map_err(|_| VcfError::MalformedRecord {
            line: line_no,
            reason: format!("invalid POS {}", fields[1]),
        })?;
    let key = VariantKey::from_vcf_fields(fields[0], pos, fields[3], fields[4]);
    let info = fields[7];

    // one representative transcript per record is expected upstream
    let Some(csq_value) = info_value(info, CSQ_ID) else {
        warn!("No {} annotation for {}, skipping", CSQ_ID, key);
        return Ok(None);
    };
    let vep: Vec<&str> = csq_value
        .split(',')
        .next()
        .unwrap_or_default()
        .split('|')
        .collect();
    let vep_field = |i: usize| vep.get(i).copied().unwrap_or("");

    // first allele/transcript group only
    let splai: Vec<&str> = info_value(info, SPLICEAI_ID)
        .and_then(|v| v.split(',').next())
        .map(|group| group.split('|').collect())
        .unwrap_or_default();
    let splai_score = |i: usize| {
        splai
            .get(i)
            .and_then(|v| parse_optional::<f64>("DS", v).ok().flatten())
    };
    let splai_position = |i: usize| {
        splai
            .get(i)
            .and_then(|v| parse_optional::<i64>("DP", v).ok().flatten())
    };

    let delta_scores = SpliceDeltas {
        acceptor_gain: splai_score(spliceai.scores[0]),
        acceptor_loss: splai_score(spliceai.scores[1]),
        donor_gain: splai_score(spliceai.scores[2]),
        donor_loss: splai_score(spliceai.scores[3]),
    };
    let delta_positions = SpliceDeltas {
        acceptor_gain: splai_position(spliceai.positions[0]),
        acceptor_loss: splai_position(spliceai.positions[1]),
        donor_gain: splai_position(spliceai.positions[2]),
        donor_loss: splai_position(spliceai.positions[3]),
    };

    // an unavailable AG offset marks the whole prediction as unavailable
    let max_delta = match delta_positions.acceptor_gain {
        Some(_) => delta_scores.max_score(),
        None => None,
    };

    Ok(Some(VariantRecord {
        key,
        symbol: vep_field(csq.symbol).to_string(),
        symbol_source: vep_field(csq.symbol_source).to_string(),
        hgnc_id: vep_field(csq.hgnc_id).to_string(),
        transcript_id: vep_field(csq.feature).to_string(),
        hgvsc: coding_change(vep_field(csq.hgvsc)).to_string(),
        consequence: vep_field(csq.consequence).to_string(),
        exon: vep_field(csq.exon).to_string(),
        intron: vep_field(csq.intron).to_string(),
        strand: Strand::from_vep(vep_field(csq.strand)),
        delta_scores,
        delta_positions,
        max_delta,
        lof: LofTier::from_vep(csq.lof.map(vep_field)),
    }))
}

///
/// Save extracted rows as a tab-delimited file with a header row.
///
pub fn write_variant_records(path: &Path, records: &[VariantRecord]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);

    writeln!(writer, "{}", VariantRecord::TSV_COLUMNS.join("\t"))?;
    for record in records {
        writeln!(writer, "{}", record.as_tsv_row())?;
    }
    writer.flush()?;

    Ok(())
}
