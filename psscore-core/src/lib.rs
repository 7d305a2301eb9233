//! # Core models for splice priority scoring
//!
//! Shared types for the splice priority scoring workspace:
//!
//! - [VariantKey](models::VariantKey): the identity a score is attached to
//! - [VariantRecord](models::VariantRecord): a flat row extracted from an annotated VCF
//! - [Enrichment](models::Enrichment): fields computed by external collaborators
//! - [ScoreTable](models::ScoreTable): the (identity, score) table consumed by the VCF writer
//!
//! plus small helpers for reading plain/gzipped text tables.
pub mod errors;
pub mod models;
pub mod utils;

pub use errors::{ModelError, Result};
