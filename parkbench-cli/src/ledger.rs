//! `flag`, `resolve`, and `report` command implementations.
//!
//! The ledger lives in a JSON file that is created on the first flag and
//! rewritten atomically after every change. Commands that change the ledger
//! hold a lock marker beside it for the whole read-modify-write cycle.

use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use clap::Parser;
use log::{debug, info};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use parkbench_core::{FlagLedger, FlagReason};
use parkbench_fs::{
    FileLock, lock_file, lock_marker, read_to_string_if_exists, write_atomically,
};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_BENCH, ARG_LEDGER, ARG_REASON, ARG_USER, CliError, ENV_FLAG_BENCH, ENV_FLAG_LEDGER,
    ENV_FLAG_REASON, ENV_FLAG_USER, ENV_REPORT_LEDGER, ENV_RESOLVE_BENCH, ENV_RESOLVE_LEDGER,
    ENV_RESOLVE_USER,
};

/// CLI arguments for the `flag` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "flag",
    long_about = "Record that a bench needs attention. Reasons are damaged, \
                 dirty, broken, or other. The ledger file is created when \
                 missing. Concurrent updates are refused while a \
                 .<ledger>.lock marker exists beside the ledger.",
    about = "Flag a bench for attention"
)]
#[ortho_config(prefix = "PARKBENCH")]
pub(crate) struct FlagArgs {
    /// Path to the JSON flag ledger.
    #[arg(long = ARG_LEDGER, value_name = "path")]
    #[serde(default)]
    pub(crate) ledger: Option<Utf8PathBuf>,
    /// Identifier of the bench being flagged.
    #[arg(long = ARG_BENCH, value_name = "id")]
    #[serde(default)]
    pub(crate) bench: Option<u64>,
    /// Identifier of the reporting user.
    #[arg(long = ARG_USER, value_name = "id")]
    #[serde(default)]
    pub(crate) user: Option<u64>,
    /// Why the bench needs attention.
    #[arg(long = ARG_REASON, value_name = "reason")]
    #[serde(default)]
    pub(crate) reason: Option<String>,
    /// Free-text detail for moderators.
    #[arg(long, value_name = "text")]
    #[serde(default)]
    pub(crate) note: Option<String>,
}

impl FlagArgs {
    fn into_config(self) -> Result<FlagConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        FlagConfig::try_from(merged)
    }
}

/// Resolved `flag` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FlagConfig {
    pub(crate) ledger: Utf8PathBuf,
    pub(crate) bench: u64,
    pub(crate) user: u64,
    pub(crate) reason: FlagReason,
    pub(crate) note: Option<String>,
}

impl TryFrom<FlagArgs> for FlagConfig {
    type Error = CliError;

    fn try_from(args: FlagArgs) -> Result<Self, Self::Error> {
        let ledger = args.ledger.ok_or(CliError::MissingArgument {
            field: ARG_LEDGER,
            env: ENV_FLAG_LEDGER,
        })?;
        let bench = args.bench.ok_or(CliError::MissingArgument {
            field: ARG_BENCH,
            env: ENV_FLAG_BENCH,
        })?;
        let user = args.user.ok_or(CliError::MissingArgument {
            field: ARG_USER,
            env: ENV_FLAG_USER,
        })?;
        let raw_reason = args.reason.ok_or(CliError::MissingArgument {
            field: ARG_REASON,
            env: ENV_FLAG_REASON,
        })?;
        let reason = raw_reason.parse::<FlagReason>()?;
        Ok(Self {
            ledger,
            bench,
            user,
            reason,
            note: args.note,
        })
    }
}

/// CLI arguments for the `resolve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(name = "resolve", about = "Resolve the oldest active flag on a bench")]
#[ortho_config(prefix = "PARKBENCH")]
pub(crate) struct ResolveArgs {
    /// Path to the JSON flag ledger.
    #[arg(long = ARG_LEDGER, value_name = "path")]
    #[serde(default)]
    pub(crate) ledger: Option<Utf8PathBuf>,
    /// Identifier of the bench whose flag is resolved.
    #[arg(long = ARG_BENCH, value_name = "id")]
    #[serde(default)]
    pub(crate) bench: Option<u64>,
    /// Identifier of the resolving moderator.
    #[arg(long = ARG_USER, value_name = "id")]
    #[serde(default)]
    pub(crate) user: Option<u64>,
}

impl ResolveArgs {
    fn into_config(self) -> Result<ResolveConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ResolveConfig::try_from(merged)
    }
}

/// Resolved `resolve` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolveConfig {
    pub(crate) ledger: Utf8PathBuf,
    pub(crate) bench: u64,
    pub(crate) user: u64,
}

impl TryFrom<ResolveArgs> for ResolveConfig {
    type Error = CliError;

    fn try_from(args: ResolveArgs) -> Result<Self, Self::Error> {
        let ledger = args.ledger.ok_or(CliError::MissingArgument {
            field: ARG_LEDGER,
            env: ENV_RESOLVE_LEDGER,
        })?;
        let bench = args.bench.ok_or(CliError::MissingArgument {
            field: ARG_BENCH,
            env: ENV_RESOLVE_BENCH,
        })?;
        let user = args.user.ok_or(CliError::MissingArgument {
            field: ARG_USER,
            env: ENV_RESOLVE_USER,
        })?;
        Ok(Self {
            ledger,
            bench,
            user,
        })
    }
}

/// CLI arguments for the `report` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(name = "report", about = "List benches with active flags")]
#[ortho_config(prefix = "PARKBENCH")]
pub(crate) struct LedgerArgs {
    /// Path to the JSON flag ledger.
    #[arg(long = ARG_LEDGER, value_name = "path")]
    #[serde(default)]
    pub(crate) ledger: Option<Utf8PathBuf>,
}

impl LedgerArgs {
    fn into_ledger_path(self) -> Result<Utf8PathBuf, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        merged.ledger.ok_or(CliError::MissingArgument {
            field: ARG_LEDGER,
            env: ENV_REPORT_LEDGER,
        })
    }
}

pub(crate) fn run_flag(
    args: FlagArgs,
    now: DateTime<Utc>,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    apply_flag(&config, now, writer)
}

pub(crate) fn apply_flag(
    config: &FlagConfig,
    now: DateTime<Utc>,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let _guard = lock_ledger(&config.ledger)?;
    let mut ledger = load_ledger(&config.ledger)?;
    let message = ledger.flag_bench(
        config.bench,
        config.user,
        config.reason,
        config.note.clone(),
        now,
    );
    save_ledger(&config.ledger, &ledger)?;
    writeln!(writer, "{message}").map_err(CliError::WriteOutput)
}

pub(crate) fn run_resolve(args: ResolveArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    apply_resolve(&config, writer)
}

pub(crate) fn apply_resolve(config: &ResolveConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let _guard = lock_ledger(&config.ledger)?;
    let mut ledger = load_ledger(&config.ledger)?;
    let message = ledger.resolve_flag(config.bench, config.user)?;
    save_ledger(&config.ledger, &ledger)?;
    writeln!(writer, "{message}").map_err(CliError::WriteOutput)
}

pub(crate) fn run_report(args: LedgerArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let path = args.into_ledger_path()?;
    write_report(&path, writer)
}

pub(crate) fn write_report(path: &Utf8Path, writer: &mut dyn Write) -> Result<(), CliError> {
    let ledger = load_ledger(path)?;
    writeln!(writer, "{}", ledger.report()).map_err(CliError::WriteOutput)
}

/// Claim the ledger at `path` until the returned guard drops.
pub(crate) fn lock_ledger(path: &Utf8Path) -> Result<FileLock, CliError> {
    lock_file(path).map_err(|source| {
        if source.kind() == io::ErrorKind::AlreadyExists {
            CliError::LedgerLocked {
                path: path.to_path_buf(),
                marker: lock_marker(path),
            }
        } else {
            CliError::LockLedger {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Load the ledger at `path`, starting empty when the file does not exist.
pub(crate) fn load_ledger(path: &Utf8Path) -> Result<FlagLedger, CliError> {
    let contents = read_to_string_if_exists(path).map_err(|source| CliError::ReadLedger {
        path: path.to_path_buf(),
        source,
    })?;
    let Some(json) = contents else {
        debug!("no flag ledger at {path}; starting empty");
        return Ok(FlagLedger::new());
    };
    serde_json::from_str(&json).map_err(|source| CliError::ParseLedger {
        path: path.to_path_buf(),
        source,
    })
}

fn save_ledger(path: &Utf8Path, ledger: &FlagLedger) -> Result<(), CliError> {
    let payload = serde_json::to_vec_pretty(ledger).map_err(CliError::SerialiseOutput)?;
    write_atomically(path, &payload).map_err(|source| CliError::WriteLedger {
        path: path.to_path_buf(),
        source,
    })?;
    info!("saved {} flags to {path}", ledger.flags().len());
    Ok(())
}
