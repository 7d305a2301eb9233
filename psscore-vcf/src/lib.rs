//! # Annotated VCF handling for splice priority scoring
//!
//! This crate covers both ends of the scoring pipeline that touch VCF text:
//!
//! - Annotation layout discovery from `##INFO` header lines (CSQ, SpliceAI)
//! - Extraction of one flat [VariantRecord](psscore_core::models::VariantRecord) per record
//! - Rewriting the original VCF with a `PriorityScore` INFO field, record for record

pub mod consts;
pub mod errors;
pub mod extract;
pub mod header;
pub mod writer;

pub use errors::{Result, VcfError};
pub use extract::{extract_from_reader, extract_variant_records, write_variant_records};
pub use header::{AnnotationHeader, AnnotationLayout};
pub use writer::{WriteSummary, rewrite_records, write_scored_vcf};
