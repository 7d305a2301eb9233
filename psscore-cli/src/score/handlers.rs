use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use psscore_scoring::{
    ElofGenes, EnrichmentTable, ScoringConfig, filter_symbol_source, merge_enrichment,
    raw_tsv_path, score_records, to_score_table, write_scored_records,
};
use psscore_vcf::{extract_variant_records, write_scored_vcf};

///
/// Settings from `--config`, with command line flags taking precedence.
///
fn resolve_config(matches: &ArgMatches) -> Result<ScoringConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => ScoringConfig::try_from(Path::new(path))
            .with_context(|| format!("Failed to read config {}", path))?,
        None => ScoringConfig::default(),
    };

    if let Some(threads) = matches.get_one::<usize>("threads") {
        config.n_workers = *threads;
    }
    if matches.get_flag("raw-tsv") {
        config.raw_tsv = true;
    }
    config.validate()?;

    Ok(config)
}

pub fn run_score(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .context("A path to an annotated VCF is required.")?;
    let output = matches
        .get_one::<String>("output")
        .context("An output path is required.")?;
    let enrichment = matches
        .get_one::<String>("enrichment")
        .context("A path to an enrichment table is required.")?;
    let elof = matches
        .get_one::<String>("elof")
        .context("A path to the eLoF gene list is required.")?;

    let config = resolve_config(matches)?;

    let input = Path::new(input);
    let output = Path::new(output);
    let enrichment = Path::new(enrichment);
    let elof = Path::new(elof);

    // collaborators first, so a bad table fails before the VCF is read
    let enrichment = EnrichmentTable::try_from(enrichment)
        .with_context(|| format!("Failed to read enrichment table {}", enrichment.display()))?;
    let elof = ElofGenes::from_file(elof)
        .with_context(|| format!("Failed to read eLoF gene list {}", elof.display()))?;

    let records = extract_variant_records(input)
        .with_context(|| format!("Failed to extract variants from {}", input.display()))?;
    let records = filter_symbol_source(records, &config.symbol_source);

    let enriched = merge_enrichment(records, &enrichment, &elof)?;
    let scored = score_records(enriched, config.n_workers)?;

    let scores = to_score_table(&scored);
    let summary = write_scored_vcf(&scores, input, output)
        .with_context(|| format!("Failed to write scored VCF {}", output.display()))?;

    // after the VCF is persisted
    if config.raw_tsv {
        let raw_path = raw_tsv_path(input, output);
        write_scored_records(&raw_path, &scored)
            .with_context(|| format!("Failed to write {}", raw_path.display()))?;
    }

    info!(
        "Scored {} of {} records in {}",
        summary.scored,
        summary.records,
        input.display()
    );

    Ok(())
}
