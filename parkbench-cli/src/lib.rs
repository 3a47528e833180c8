//! Command-line interface for scoring benches and managing bench flags.
#![forbid(unsafe_code)]

use chrono::Utc;
use clap::{Parser, Subcommand};

mod error;
mod ledger;
mod score;

pub use error::CliError;

use ledger::{FlagArgs, LedgerArgs, ResolveArgs, run_flag, run_report, run_resolve};
use score::{LabelArgs, ScoreArgs, run_label, run_score};

pub(crate) const ARG_SCORE_REQUEST: &str = "request";
pub(crate) const ARG_WEIGHTS: &str = "weights";
pub(crate) const ARG_LABEL_SCORE: &str = "score";
pub(crate) const ARG_LEDGER: &str = "ledger";
pub(crate) const ARG_BENCH: &str = "bench";
pub(crate) const ARG_USER: &str = "user";
pub(crate) const ARG_REASON: &str = "reason";
pub(crate) const ENV_SCORE_REQUEST: &str = "PARKBENCH_CMDS_SCORE_REQUEST_PATH";
pub(crate) const ENV_LABEL_SCORE: &str = "PARKBENCH_CMDS_LABEL_SCORE";
pub(crate) const ENV_FLAG_LEDGER: &str = "PARKBENCH_CMDS_FLAG_LEDGER";
pub(crate) const ENV_FLAG_BENCH: &str = "PARKBENCH_CMDS_FLAG_BENCH";
pub(crate) const ENV_FLAG_USER: &str = "PARKBENCH_CMDS_FLAG_USER";
pub(crate) const ENV_FLAG_REASON: &str = "PARKBENCH_CMDS_FLAG_REASON";
pub(crate) const ENV_RESOLVE_LEDGER: &str = "PARKBENCH_CMDS_RESOLVE_LEDGER";
pub(crate) const ENV_RESOLVE_BENCH: &str = "PARKBENCH_CMDS_RESOLVE_BENCH";
pub(crate) const ENV_RESOLVE_USER: &str = "PARKBENCH_CMDS_RESOLVE_USER";
pub(crate) const ENV_REPORT_LEDGER: &str = "PARKBENCH_CMDS_REPORT_LEDGER";

/// Run the Parkbench CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration layering, file
/// access, or the requested operation fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Score(args) => run_score(args, &mut stdout),
        Command::Label(args) => run_label(args, &mut stdout),
        Command::Flag(args) => run_flag(args, Utc::now(), &mut stdout),
        Command::Resolve(args) => run_resolve(args, &mut stdout),
        Command::Report(args) => run_report(args, &mut stdout),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "parkbench",
    about = "Score park benches and track community flags",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score and rank benches described in a JSON request.
    Score(ScoreArgs),
    /// Print the quality label for a score.
    Label(LabelArgs),
    /// Flag a bench for attention.
    Flag(FlagArgs),
    /// Resolve the oldest active flag on a bench.
    Resolve(ResolveArgs),
    /// List benches with active flags.
    Report(LedgerArgs),
}

#[cfg(test)]
mod tests;
