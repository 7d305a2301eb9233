pub mod enrichment;
pub mod score;
pub mod variant;

// re-export for cleaner imports
pub use self::enrichment::{EnrichedRecord, Enrichment, NmdPrediction, SpliceType};
pub use self::score::{ScoreTable, ScoredVariant};
pub use self::variant::{LofTier, SpliceDeltas, Strand, VariantKey, VariantRecord};
