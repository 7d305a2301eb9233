use std::io;
use thiserror::Error;

use psscore_core::ModelError;

/// Error type for psscore-vcf operations.
#[derive(Error, Debug)]
pub enum VcfError {
    /// IO error occurred while reading or writing a VCF.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Could not open the input VCF.
    #[error("Failed to open VCF: {0}")]
    Open(String),

    /// The header lacks an `##INFO` definition for a required annotation.
    #[error("Missing required annotation header: ##INFO=<ID={0},...> not found")]
    MissingAnnotationHeader(String),

    /// The annotation's declared `Format:` layout lacks a required subfield.
    #[error("Annotation {annotation} does not declare required field {field}")]
    MissingAnnotationField { annotation: String, field: String },

    /// An `##INFO` line for an annotation could not be parsed.
    #[error("Malformed header line for {annotation}: {line}")]
    MalformedHeader { annotation: String, line: String },

    /// The file has no `#CHROM` column header line.
    #[error("VCF has no #CHROM header line")]
    MissingColumnHeader,

    /// A data line has fewer than the 8 fixed VCF columns or a bad POS.
    #[error("Malformed VCF record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// The score table handed to the writer has no rows.
    #[error("The score table is empty; refusing to write an unscored VCF")]
    EmptyScoreTable,

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type alias for psscore-vcf operations.
pub type Result<T> = std::result::Result<T, VcfError>;
