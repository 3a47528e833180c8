//! Error types emitted by the Parkbench CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use parkbench_core::FlagError;
use parkbench_scorer::{ThresholdsError, WeightsError};
use thiserror::Error;

/// Errors emitted by the Parkbench CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Name of the missing flag.
        field: &'static str,
        /// Environment variable that can supply it instead.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk or is not a file.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        /// Name of the flag that referenced the path.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Name of the flag that referenced the path.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Opening the score request file failed.
    #[error("failed to open score request at {path:?}: {source}")]
    OpenScoreRequest {
        /// Requested file path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Score request JSON could not be decoded.
    #[error("failed to parse score request JSON at {path:?}: {source}")]
    ParseScoreRequest {
        /// Requested file path.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// The weights file could not be loaded.
    #[error(transparent)]
    Weights(#[from] WeightsError),
    /// Label threshold overrides were inconsistent.
    #[error("invalid label thresholds: {0}")]
    Thresholds(#[from] ThresholdsError),
    /// Reading the flag ledger failed.
    #[error("failed to read flag ledger at {path:?}: {source}")]
    ReadLedger {
        /// Ledger file path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The flag ledger was not valid JSON.
    #[error("failed to parse flag ledger at {path:?}: {source}")]
    ParseLedger {
        /// Ledger file path.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// Another process is updating the flag ledger.
    #[error(
        "flag ledger at {path:?} is locked by another command; \
         remove {marker:?} if no other command is running"
    )]
    LedgerLocked {
        /// Ledger file path.
        path: Utf8PathBuf,
        /// Lock marker beside the ledger.
        marker: Utf8PathBuf,
    },
    /// Taking the flag ledger lock failed.
    #[error("failed to lock flag ledger at {path:?}: {source}")]
    LockLedger {
        /// Ledger file path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Persisting the flag ledger failed.
    #[error("failed to write flag ledger at {path:?}: {source}")]
    WriteLedger {
        /// Ledger file path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// A flag operation was rejected.
    #[error(transparent)]
    Flag(#[from] FlagError),
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
