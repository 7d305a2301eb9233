use clap::{ArgAction, Command, arg, value_parser};

pub const SCORE_CMD: &str = "score";

pub fn create_score_cli() -> Command {
    Command::new(SCORE_CMD)
        .about("Score every variant of an annotated VCF and write it back with a PriorityScore INFO field.")
        .arg(arg!(--input <input> "Annotated VCF (.vcf, .vcf.gz or .vcf.bgz)").required(true))
        .arg(arg!(--output <output> "Scored VCF to write; .gz paths are gzipped").required(true))
        .arg(
            arg!(--enrichment <enrichment> "Tab-delimited gene model / ClinVar / CCR fields per variant")
                .required(true),
        )
        .arg(arg!(--elof <elof> "Tab-delimited eLoF gene list with an HGNC_ID column").required(true))
        .arg(
            arg!(--threads <threads> "Number of scoring workers")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(--"raw-tsv" "Also write the enriched, scored table next to the output")
                .action(ArgAction::SetTrue),
        )
        .arg(arg!(--config <config> "TOML file with scoring settings"))
}
