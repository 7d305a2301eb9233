use thiserror::Error;

use psscore_core::ModelError;

#[derive(Error, Debug)]
pub enum ScoringError {
    /// A classifier produced a category the weight table has no entry for.
    #[error("Category {category} has no weight; cannot score {variant}")]
    UnweightedCategory { category: String, variant: String },

    #[error("No enrichment row for {0}")]
    MissingEnrichment(String),

    #[error("Failed to build scoring thread pool: {0}")]
    ThreadPool(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScoringError>;
