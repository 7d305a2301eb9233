use clap::{Command, arg};

use psscore_vcf::consts::DEFAULT_EXTRACT_OUT;

pub const EXTRACT_CMD: &str = "extract";

pub fn create_extract_cli() -> Command {
    Command::new(EXTRACT_CMD)
        .about("Flatten a CSQ/SpliceAI annotated VCF into one tab-delimited row per variant.")
        .arg(arg!(--input <input> "Annotated VCF (.vcf, .vcf.gz or .vcf.bgz)").required(true))
        .arg(arg!(--output <output> "Where to write the rows").default_value(DEFAULT_EXTRACT_OUT))
}
