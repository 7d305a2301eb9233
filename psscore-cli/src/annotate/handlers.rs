use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;

use psscore_core::models::ScoreTable;
use psscore_vcf::write_scored_vcf;

pub fn run_annotate(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .context("A path to the original VCF is required.")?;
    let scores = matches
        .get_one::<String>("scores")
        .context("A path to a score table is required.")?;
    let output = matches
        .get_one::<String>("output")
        .context("An output path is required.")?;

    let input = Path::new(input);
    let scores = Path::new(scores);
    let output = Path::new(output);

    let table = ScoreTable::try_from(scores)
        .with_context(|| format!("Failed to read score table {}", scores.display()))?;

    write_scored_vcf(&table, input, output)
        .with_context(|| format!("Failed to write scored VCF {}", output.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tempfile::tempdir;

    use crate::build_parser;

    const VCF: &str = "##fileformat=VCFv4.2
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
1\t100\t.\tA\tG\t.\tPASS\tDP=3
1\t200\t.\tC\tT\t.\tPASS\tDP=9
";

    fn annotate(input: &Path, scores: &Path, output: &Path) -> Result<()> {
        let matches = build_parser()
            .try_get_matches_from([
                "psscore",
                "annotate",
                "--input",
                input.to_str().unwrap(),
                "--scores",
                scores.to_str().unwrap(),
                "--output",
                output.to_str().unwrap(),
            ])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        run_annotate(sub)
    }

    #[rstest]
    fn test_run_annotate() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.vcf");
        let scores = dir.path().join("scores.tsv");
        let output = dir.path().join("out.vcf");
        std::fs::write(&input, VCF).unwrap();
        std::fs::write(&scores, "CHROM\tPOS\tREF\tALT\tPriorityScore\n1\t200\tC\tT\t7\n").unwrap();

        annotate(&input, &scores, &output).unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = text.lines().filter(|l| !l.starts_with('#')).collect();
        assert_eq!(
            lines,
            vec!["1\t100\t.\tA\tG\t.\tPASS\tDP=3", "1\t200\t.\tC\tT\t.\tPASS\tDP=9;PriorityScore=7"]
        );
    }

    #[rstest]
    #[case("CHROM\tPOS\tREF\tALT\tPriorityScore\n")]
    #[case("CHROM\tPOS\tREF\tScore\n1\t200\tC\t7\n")]
    fn test_invalid_score_table_writes_nothing(#[case] table: &str) {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.vcf");
        let scores = dir.path().join("scores.tsv");
        let output = dir.path().join("out.vcf");
        std::fs::write(&input, VCF).unwrap();
        std::fs::write(&scores, table).unwrap();

        assert!(annotate(&input, &scores, &output).is_err());
        assert!(!output.exists());
    }
}
