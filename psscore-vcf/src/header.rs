//! Self-discovery of annotation layouts from VCF `##INFO` header lines.
//!
//! VEP and SpliceAI both document the order of their pipe-delimited
//! subfields in the header, e.g.
//!
//! ```text
//! ##INFO=<ID=SpliceAI,Number=.,Type=String,Description="SpliceAIv1.3 variant annotation. Format: ALLELE|SYMBOL|DS_AG|DS_AL|DS_DG|DS_DL|DP_AG|DP_AL|DP_DG|DP_DL">
//! ```
//!
//! Positions are looked up by name, so reordered fields across tool
//! versions are handled transparently.

use fxhash::FxHashMap;

use crate::consts::{CSQ_ID, SPLICEAI_ID};
use crate::errors::{Result, VcfError};

/// Subfield name -> position for one pipe-delimited INFO annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationLayout {
    id: String,
    fields: FxHashMap<String, usize>,
    width: usize,
}

impl AnnotationLayout {
    ///
    /// Parse the layout out of an `##INFO=<ID=...,Description="... Format: a|b|c">` line.
    ///
    pub fn from_info_line(id: &str, line: &str) -> Result<Self> {
        let malformed = || VcfError::MalformedHeader {
            annotation: id.to_string(),
            line: line.to_string(),
        };

        let description = info_attribute(line, "Description").ok_or_else(malformed)?;
        let (_, format) = description.split_once("Format: ").ok_or_else(malformed)?;

        let names: Vec<&str> = format.trim_end_matches('"').trim().split('|').collect();
        let fields = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim().to_string(), i))
            .collect();

        Ok(AnnotationLayout {
            id: id.to_string(),
            fields,
            width: names.len(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Number of subfields the layout declares.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn index(&self, field: &str) -> Option<usize> {
        self.fields.get(field).copied()
    }

    pub fn require(&self, field: &str) -> Result<usize> {
        self.index(field)
            .ok_or_else(|| VcfError::MissingAnnotationField {
                annotation: self.id.clone(),
                field: field.to_string(),
            })
    }
}

///
/// The two annotation layouts the extractor needs.
///
#[derive(Debug, Clone)]
pub struct AnnotationHeader {
    pub csq: AnnotationLayout,
    pub spliceai: AnnotationLayout,
}

impl AnnotationHeader {
    ///
    /// Scan `##` meta lines for the CSQ and SpliceAI definitions.
    ///
    /// Fails with [VcfError::MissingAnnotationHeader] when either is absent.
    ///
    pub fn from_meta_lines<'a, I>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut csq = None;
        let mut spliceai = None;

        for line in lines {
            match info_id(line) {
                Some(CSQ_ID) => csq = Some(AnnotationLayout::from_info_line(CSQ_ID, line)?),
                Some(SPLICEAI_ID) => {
                    spliceai = Some(AnnotationLayout::from_info_line(SPLICEAI_ID, line)?)
                }
                _ => {}
            }
        }

        Ok(AnnotationHeader {
            csq: csq.ok_or_else(|| VcfError::MissingAnnotationHeader(CSQ_ID.to_string()))?,
            spliceai: spliceai
                .ok_or_else(|| VcfError::MissingAnnotationHeader(SPLICEAI_ID.to_string()))?,
        })
    }
}

/// ID of an `##INFO=<ID=...,...>` line, if the line is one.
pub fn info_id(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("##INFO=<ID=")?;
    let end = rest.find([',', '>']).unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Value of a quoted attribute such as `Description="..."`, without quotes.
fn info_attribute<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let marker = format!("{}=\"", key);
    let start = line.find(&marker)? + marker.len();
    let rest = &line[start..];
    let end = rest.rfind('"')?;
    Some(&rest[..end])
}
