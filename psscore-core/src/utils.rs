use std::ffi::OsStr;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use flate2::read::MultiGzDecoder;
use fxhash::FxHashMap;

use crate::errors::{ModelError, Result};

/// Values upstream tools use to mean "no value here".
pub const MISSING_VALUES: [&str; 5] = ["", ".", "NA", "nan", "NaN"];

///
/// Get a reader for either a gzip'd (or bgzip'd) or plain text file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> anyhow::Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = is_gzipped(path) || path.extension() == Some(OsStr::new("bgz"));
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    // 256KB buffer, annotated VCF lines get long
    let reader = BufReader::with_capacity(256 * 1024, file);

    Ok(reader)
}

/// Whether the path should be read or written through gzip.
pub fn is_gzipped(path: &Path) -> bool {
    path.extension() == Some(OsStr::new("gz"))
}

///
/// Strip every extension from a file name, e.g. `sample.vcf.gz` -> `sample`.
///
pub fn remove_all_extensions(path: &Path) -> String {
    let mut stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let mut parent_path = path.with_file_name(stem.clone());
    while parent_path.extension().is_some() {
        parent_path = parent_path.with_extension("");
        stem = parent_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
    }

    stem
}

/// True when the raw field is one of the [MISSING_VALUES] markers.
pub fn is_missing(value: &str) -> bool {
    MISSING_VALUES.contains(&value.trim())
}

///
/// Parse an optional typed value out of a text column.
///
/// Missing markers map to `None`; anything else must parse.
///
pub fn parse_optional<T: FromStr>(field: &str, value: &str) -> Result<Option<T>> {
    if is_missing(value) {
        return Ok(None);
    }
    value
        .trim()
        .parse::<T>()
        .map(Some)
        .map_err(|_| ModelError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        })
}

///
/// Parse an optional integer that may have been written as a float
/// (`12.0`), which is how tabular tools serialize integer columns
/// containing missing values.
///
pub fn parse_optional_int(field: &str, value: &str) -> Result<Option<i64>> {
    if let Ok(Some(v)) = parse_optional::<i64>(field, value) {
        return Ok(Some(v));
    }
    match parse_optional::<f64>(field, value)? {
        None => Ok(None),
        Some(v) if v.fract() == 0.0 && v.is_finite() => Ok(Some(v as i64)),
        Some(_) => Err(ModelError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Parse a boolean flag column. Missing values are `false`.
pub fn parse_flag(field: &str, value: &str) -> Result<bool> {
    if is_missing(value) {
        return Ok(false);
    }
    match value.trim() {
        "True" | "true" | "TRUE" | "Yes" | "yes" | "1" => Ok(true),
        "False" | "false" | "FALSE" | "No" | "no" | "0" => Ok(false),
        _ => Err(ModelError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        }),
    }
}

///
/// Header of a tab-delimited table: column name -> column index.
///
#[derive(Debug, Clone)]
pub struct TableHeader {
    table: String,
    columns: FxHashMap<String, usize>,
    width: usize,
}

impl TableHeader {
    pub fn parse(table: &str, line: &str) -> Self {
        let line = line.trim_end_matches(['\n', '\r']);
        let columns: FxHashMap<String, usize> = line
            .split('\t')
            .enumerate()
            .map(|(i, name)| (name.trim().to_string(), i))
            .collect();
        let width = line.split('\t').count();

        TableHeader {
            table: table.to_string(),
            columns,
            width,
        }
    }

    /// Fail with every absent column named at once.
    pub fn require(&self, required: &[&str]) -> Result<()> {
        let missing: Vec<String> = required
            .iter()
            .filter(|c| !self.columns.contains_key(**c))
            .map(|c| c.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ModelError::MissingColumns {
                table: self.table.clone(),
                columns: missing,
            })
        }
    }

    pub fn index(&self, column: &str) -> Option<usize> {
        self.columns.get(column).copied()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Split a data line, checking it matches the header width.
    pub fn split_row<'a>(&self, line_no: usize, line: &'a str) -> Result<Vec<&'a str>> {
        let fields: Vec<&str> = line.trim_end_matches(['\n', '\r']).split('\t').collect();
        if fields.len() != self.width {
            return Err(ModelError::MalformedRow {
                table: self.table.clone(),
                line: line_no,
                expected: self.width,
                found: fields.len(),
            });
        }
        Ok(fields)
    }

    /// Field for `column`, or `""` when the table has no such column.
    pub fn get<'a>(&self, fields: &[&'a str], column: &str) -> &'a str {
        self.index(column)
            .and_then(|i| fields.get(i).copied())
            .unwrap_or("")
    }
}
