//! Re-emission of a VCF with `PriorityScore` injected into INFO.

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use fxhash::FxHashMap;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use noodles_bgzf as bgzf;

use psscore_core::models::{ScoreTable, VariantKey};
use psscore_core::utils::{get_dynamic_reader, is_gzipped};

use crate::consts::{PRIORITY_SCORE_HEADER, PRIORITY_SCORE_ID};
use crate::errors::{Result, VcfError};

/// Counts reported after a rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteSummary {
    pub records: usize,
    pub scored: usize,
}

///
/// Write `input` to `output` with each record's priority score attached.
///
/// Every input record is written exactly once and in order; records with
/// no score in `scores` are copied through untouched. The output is staged
/// in a temporary file in the destination directory and only moved into
/// place once fully written, with the permissions a freshly created file
/// would get. Output paths ending in `.gz` are BGZF compressed so they can
/// be indexed with tabix.
///
/// # Arguments
/// - scores: (identity, score) table; must not be empty
/// - input: path to the original VCF
/// - output: path to the VCF to create
///
pub fn write_scored_vcf(scores: &ScoreTable, input: &Path, output: &Path) -> Result<WriteSummary> {
    if scores.is_empty() {
        return Err(VcfError::EmptyScoreTable);
    }
    let lookup = scores.to_lookup();

    let reader = get_dynamic_reader(input).map_err(|e| VcfError::Open(format!("{:#}", e)))?;

    let parent = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut builder = tempfile::Builder::new();
    builder.prefix(".psscore-").suffix(".vcf.tmp");
    // 0666 minus the umask, as File::create would give
    #[cfg(unix)]
    builder.permissions(std::fs::Permissions::from_mode(0o666));
    let staged = builder.tempfile_in(parent)?;
    let file: File = staged.as_file().try_clone()?;

    let summary = if is_gzipped(output) {
        let mut writer = BufWriter::new(bgzf::io::Writer::new(file));
        let summary = rewrite_records(reader, &mut writer, &lookup)?;
        writer.into_inner().map_err(|e| e.into_error())?.finish()?;
        summary
    } else {
        let mut writer = BufWriter::new(file);
        let summary = rewrite_records(reader, &mut writer, &lookup)?;
        writer.flush()?;
        summary
    };

    staged.as_file().sync_all()?;
    staged.persist(output).map_err(|e| VcfError::Io(e.error))?;

    info!(
        "Wrote {} records ({} scored) to {}",
        summary.records,
        summary.scored,
        output.display()
    );

    Ok(summary)
}

///
/// Stream VCF text from `reader` to `writer`, declaring the PriorityScore
/// INFO field in the header and attaching scores found in `lookup`.
///
/// Lookup keys use the first ALT allele of each record.
///
pub fn rewrite_records<R: BufRead, W: Write>(
    mut reader: R,
    writer: &mut W,
    lookup: &FxHashMap<VariantKey, i32>,
) -> Result<WriteSummary> {
    let mut summary = WriteSummary {
        records: 0,
        scored: 0,
    };
    let mut in_header = true;
    let mut line_no = 0usize;
    let mut line_buf = String::new();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed}] {msg} ({per_sec})")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["-", "\\", "|", "/"]),
    );
    spinner.set_message("Writing scored records...");

    loop {
        line_buf.clear();
        if reader.read_line(&mut line_buf)? == 0 {
            break;
        }
        line_no += 1;

        if in_header {
            if line_buf.starts_with("##") {
                // drop any previous declaration, ours goes right before #CHROM
                if !is_priority_score_header(&line_buf) {
                    writer.write_all(line_buf.as_bytes())?;
                }
                continue;
            }
            if line_buf.starts_with("#CHROM") {
                let terminator = match line_ending(&line_buf) {
                    "" => "\n",
                    ending => ending,
                };
                write!(writer, "{}{}", PRIORITY_SCORE_HEADER, terminator)?;
                writer.write_all(line_buf.as_bytes())?;
                in_header = false;
                continue;
            }
            return Err(VcfError::MissingColumnHeader);
        }

        let line = line_buf.trim_end_matches(['\n', '\r']);
        if line.is_empty() {
            continue;
        }

        summary.records += 1;
        spinner.inc(1);

        let fields: Vec<&str> = line.split('\t').collect();
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

        match lookup.get(&key) {
            Some(score) => {
                let info = with_priority_score(fields[7], *score);
                let mut fields = fields;
                fields[7] = &info;
                write!(writer, "{}{}", fields.join("\t"), line_ending(&line_buf))?;
                summary.scored += 1;
            }
            None => writer.write_all(line_buf.as_bytes())?,
        }
    }

    spinner.finish_and_clear();

    if in_header {
        return Err(VcfError::MissingColumnHeader);
    }

    Ok(summary)
}

/// The `\n` or `\r\n` a line was read with, empty on a final unterminated line.
fn line_ending(line: &str) -> &str {
    let body = line.trim_end_matches(['\n', '\r']);
    &line[body.len()..]
}

fn is_priority_score_header(line: &str) -> bool {
    line.starts_with(&format!("##INFO=<ID={},", PRIORITY_SCORE_ID))
}

///
/// INFO column with `PriorityScore=<score>` set, replacing an existing
/// entry in place or appending a new one.
///
pub fn with_priority_score(info: &str, score: i32) -> String {
    let entry = format!("{}={}", PRIORITY_SCORE_ID, score);
    if info == "." || info.is_empty() {
        return entry;
    }

    let mut replaced = false;
    let mut entries: Vec<String> = info
        .split(';')
        .map(|e| {
            let key = e.split('=').next().unwrap_or(e);
            if key == PRIORITY_SCORE_ID {
                replaced = true;
                entry.clone()
            } else {
                e.to_string()
            }
        })
        .collect();
    if !replaced {
        entries.push(entry);
    }

    entries.join(";")
}
