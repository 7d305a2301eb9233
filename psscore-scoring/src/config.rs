use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;

use crate::consts::{DEFAULT_N_WORKERS, DEFAULT_SYMBOL_SOURCE};
use crate::errors::{Result, ScoringError};

///
/// Run settings for the scoring pipeline, usually read from a `.toml` file.
/// Absent keys fall back to their defaults.
///
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    /// Size of the scoring thread pool.
    pub n_workers: usize,
    /// Also dump the enriched, scored table as TSV next to the output.
    pub raw_tsv: bool,
    /// Only rows whose gene symbol comes from this source are scored.
    pub symbol_source: String,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            n_workers: DEFAULT_N_WORKERS,
            raw_tsv: false,
            symbol_source: DEFAULT_SYMBOL_SOURCE.to_string(),
        }
    }
}

impl TryFrom<&Path> for ScoringConfig {
    type Error = ScoringError;

    ///
    /// Read a scoring config.
    ///
    /// # Arguments
    /// - path: Path to the config file (a .toml) file.
    fn try_from(path: &Path) -> Result<Self> {
        let toml_str = read_to_string(path)?;
        let config: ScoringConfig =
            toml::from_str(&toml_str).map_err(|e| ScoringError::Config(e.to_string()))?;
        config.validate()?;

        Ok(config)
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<()> {
        if self.n_workers == 0 {
            return Err(ScoringError::Config(
                "n_workers must be at least 1".to_string(),
            ));
        }
        if self.symbol_source.trim().is_empty() {
            return Err(ScoringError::Config(
                "symbol_source must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
