use clap::{Command, arg};

pub const ANNOTATE_CMD: &str = "annotate";

pub fn create_annotate_cli() -> Command {
    Command::new(ANNOTATE_CMD)
        .about("Write a VCF with PriorityScore values taken from an existing score table.")
        .arg(arg!(--input <input> "Original VCF").required(true))
        .arg(
            arg!(--scores <scores> "Tab-delimited table with CHROM, POS, REF, ALT and PriorityScore")
                .required(true),
        )
        .arg(arg!(--output <output> "Scored VCF to write; .gz paths are gzipped").required(true))
}
