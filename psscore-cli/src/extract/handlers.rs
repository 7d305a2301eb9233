use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;

use psscore_vcf::{extract_variant_records, write_variant_records};

pub fn run_extract(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .context("A path to an annotated VCF is required.")?;
    let output = matches
        .get_one::<String>("output")
        .context("An output path is required.")?;

    let input = Path::new(input);
    let output = Path::new(output);

    let records = extract_variant_records(input)
        .with_context(|| format!("Failed to extract variants from {}", input.display()))?;

    write_variant_records(output, &records)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    Ok(())
}
