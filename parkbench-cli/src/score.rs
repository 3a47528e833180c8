//! `score` and `label` command implementations.

use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::{debug, info};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use parkbench_fs::open_utf8_file;
use parkbench_scorer::{
    BenchRecord, LabelThresholds, QualityWeights, RankedBench, WeightedQualityScorer,
    rank_benches,
};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_LABEL_SCORE, ARG_SCORE_REQUEST, ARG_WEIGHTS, CliError, ENV_LABEL_SCORE, ENV_SCORE_REQUEST,
};

/// CLI arguments for the `score` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "score",
    long_about = "Score every bench in a JSON request of the form \
                 {\"benches\": [{\"id\": 1, \"factors\": {...}}]} and print \
                 a ranked report, best bench first. Weights and label \
                 thresholds can come from CLI flags, configuration files, or \
                 environment variables.",
    about = "Score and rank benches"
)]
#[ortho_config(prefix = "PARKBENCH")]
pub(crate) struct ScoreArgs {
    /// Path to a JSON file listing the benches to score.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Path to a JSON weight table replacing the defaults.
    #[arg(long = ARG_WEIGHTS, value_name = "path")]
    #[serde(default)]
    pub(crate) weights: Option<Utf8PathBuf>,
    /// Lower bound for the `excellent` label.
    #[arg(long, value_name = "score")]
    #[serde(default)]
    pub(crate) excellent: Option<f64>,
    /// Lower bound for the `good` label.
    #[arg(long, value_name = "score")]
    #[serde(default)]
    pub(crate) good: Option<f64>,
    /// Lower bound for the `average` label.
    #[arg(long, value_name = "score")]
    #[serde(default)]
    pub(crate) average: Option<f64>,
}

impl ScoreArgs {
    pub(crate) fn into_config(self) -> Result<ScoreConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ScoreConfig::try_from(merged)
    }
}

/// Resolved `score` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScoreConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Optional weight table override.
    pub(crate) weights: Option<Utf8PathBuf>,
    /// Thresholds after applying overrides.
    pub(crate) thresholds: LabelThresholds,
}

impl ScoreConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.request_path, ARG_SCORE_REQUEST)?;
        if let Some(weights) = &self.weights {
            require_existing(weights, ARG_WEIGHTS)?;
        }
        Ok(())
    }

    pub(crate) fn build_scorer(&self) -> Result<WeightedQualityScorer, CliError> {
        let Some(path) = &self.weights else {
            return Ok(WeightedQualityScorer::new(
                QualityWeights::default(),
                self.thresholds,
            ));
        };
        Ok(WeightedQualityScorer::from_weights_file(
            path,
            self.thresholds,
        )?)
    }
}

impl TryFrom<ScoreArgs> for ScoreConfig {
    type Error = CliError;

    fn try_from(args: ScoreArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_SCORE_REQUEST,
            env: ENV_SCORE_REQUEST,
        })?;
        let thresholds =
            LabelThresholds::default().with_overrides(args.excellent, args.good, args.average)?;
        Ok(Self {
            request_path,
            weights: args.weights,
            thresholds,
        })
    }
}

/// Benches submitted for scoring.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ScoreRequest {
    pub(crate) benches: Vec<BenchRecord>,
}

/// Ranked output of the `score` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ScoreReport {
    pub(crate) benches: Vec<RankedBench>,
}

pub(crate) fn run_score(args: ScoreArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    write_score_report(&config, writer)
}

pub(crate) fn write_score_report(
    config: &ScoreConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let scorer = config.build_scorer()?;
    let request = load_score_request(&config.request_path)?;
    debug!(
        "scoring {} benches from {}",
        request.benches.len(),
        config.request_path
    );
    let report = ScoreReport {
        benches: rank_benches(&scorer, &request.benches),
    };
    info!("ranked {} benches", report.benches.len());
    write_json(writer, &report)
}

/// Loads a JSON-encoded [`ScoreRequest`] from disk.
pub(crate) fn load_score_request(path: &Utf8Path) -> Result<ScoreRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenScoreRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseScoreRequest {
        path: path.to_path_buf(),
        source,
    })
}

/// CLI arguments for the `label` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(name = "label", about = "Print the quality label for a score")]
#[ortho_config(prefix = "PARKBENCH")]
pub(crate) struct LabelArgs {
    /// Score to classify; values outside 0..=120 are clamped.
    #[arg(value_name = "score", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) score: Option<f64>,
    /// Lower bound for the `excellent` label.
    #[arg(long, value_name = "score")]
    #[serde(default)]
    pub(crate) excellent: Option<f64>,
    /// Lower bound for the `good` label.
    #[arg(long, value_name = "score")]
    #[serde(default)]
    pub(crate) good: Option<f64>,
    /// Lower bound for the `average` label.
    #[arg(long, value_name = "score")]
    #[serde(default)]
    pub(crate) average: Option<f64>,
}

impl LabelArgs {
    pub(crate) fn into_config(self) -> Result<LabelConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        LabelConfig::try_from(merged)
    }
}

/// Resolved `label` command configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LabelConfig {
    pub(crate) score: f64,
    pub(crate) thresholds: LabelThresholds,
}

impl TryFrom<LabelArgs> for LabelConfig {
    type Error = CliError;

    fn try_from(args: LabelArgs) -> Result<Self, Self::Error> {
        let score = args.score.ok_or(CliError::MissingArgument {
            field: ARG_LABEL_SCORE,
            env: ENV_LABEL_SCORE,
        })?;
        let thresholds =
            LabelThresholds::default().with_overrides(args.excellent, args.good, args.average)?;
        Ok(Self { score, thresholds })
    }
}

pub(crate) fn run_label(args: LabelArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    write_label(config, writer)
}

pub(crate) fn write_label(config: LabelConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let label = config.thresholds.classify(config.score);
    writeln!(writer, "{label}").map_err(CliError::WriteOutput)
}

pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match parkbench_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

pub(crate) fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
