mod annotate;
mod extract;
mod score;

use anyhow::Result;
use clap::{ArgAction, ArgMatches, Command, arg};
use tracing_subscriber::EnvFilter;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "psscore";
    pub const VERBOSE_ARG: &str = "verbose";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Prioritize splice-disrupting variants in CSQ/SpliceAI annotated VCFs.")
        .subcommand_required(true)
        .arg(
            arg!(-v --verbose "Log debug messages")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(extract::cli::create_extract_cli())
        .subcommand(score::cli::create_score_cli())
        .subcommand(annotate::cli::create_annotate_cli())
}

fn is_verbose(matches: &ArgMatches) -> bool {
    matches.get_flag(consts::VERBOSE_ARG)
        || matches
            .subcommand()
            .is_some_and(|(_, sub)| sub.get_flag(consts::VERBOSE_ARG))
}

///
/// Install the log subscriber. `RUST_LOG` wins unless `--verbose` is given.
///
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    // library crates log through `log`; the subscriber bridges those records
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    init_logging(is_verbose(&matches));

    match matches.subcommand() {
        //
        // EXTRACT
        //
        Some((extract::cli::EXTRACT_CMD, matches)) => {
            extract::handlers::run_extract(matches)?;
        }

        //
        // SCORE
        //
        Some((score::cli::SCORE_CMD, matches)) => {
            score::handlers::run_score(matches)?;
        }

        //
        // ANNOTATE
        //
        Some((annotate::cli::ANNOTATE_CMD, matches)) => {
            annotate::handlers::run_annotate(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
