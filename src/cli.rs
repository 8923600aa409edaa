use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::EngineConfig;
use crate::similarity::SimilarityMetric;
use crate::util;

#[derive(Parser, Debug)]
#[command(
    name = "issue-resolve-predictor",
    version,
    about = "Predict issue resolve times per assignee from similar historical issues",
    long_about = None
)]
pub struct Cli {
  /// Corpus file: native JSON or a Jira REST search export
  #[arg(long, required_unless_present = "gen_man")]
  pub corpus: Option<PathBuf>,

  /// Engine configuration (JSON); every key has a default
  #[arg(long)]
  pub config: Option<PathBuf>,

  /// Predict a single target issue by id
  #[arg(long, conflicts_with = "percentage")]
  pub issue: Option<String>,

  /// Evaluate a seeded sample of this percentage of the project's resolved issues
  #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
  pub percentage: Option<u8>,

  /// Project to sample in batch mode (overrides the config file)
  #[arg(long)]
  pub project: Option<String>,

  /// Text similarity metric (overrides the config file)
  #[arg(long, value_enum)]
  pub metric: Option<SimilarityMetric>,

  /// Keep only the k most similar historical issues per assignee
  #[arg(long)]
  pub top_k: Option<usize>,

  /// Sampling seed (overrides `sample_seed` in the config file)
  #[arg(long)]
  pub seed: Option<u64>,

  /// Worker threads for batch mode (default: available cores)
  #[arg(long)]
  pub jobs: Option<usize>,

  /// Report format
  #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
  pub format: OutputFormat,

  /// Output file (default stdout "-")
  #[arg(long, default_value = "-")]
  pub out: String,

  /// Raise log verbosity (-v info, -vv debug); RUST_LOG takes precedence
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
  Json,
  Text,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum RunMode {
  Single { issue: String },
  Batch { project: String, percentage: u8, seed: u64 },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EffectiveConfig {
  pub corpus: String, // absolute path for stability
  pub mode: RunMode,
  pub engine: EngineConfig,
  pub jobs: Option<usize>,
  pub format: OutputFormat,
  pub out: String,
}

/// Operator mistakes in selecting what to run; reported with exit code 2.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct UsageError(pub String);

fn usage(msg: &str) -> anyhow::Error {
  UsageError(msg.to_string()).into()
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  let corpus = cli.corpus.as_deref().ok_or_else(|| usage("--corpus is required"))?;

  let mut engine = match &cli.config {
    Some(path) => EngineConfig::from_file(path).with_context(|| format!("loading config {}", path.display()))?,
    None => EngineConfig::default(),
  };

  // CLI overrides win over the config file
  if let Some(p) = cli.project {
    engine.project = Some(p);
  }
  if let Some(m) = cli.metric {
    engine.metric = m;
  }
  if cli.top_k.is_some() {
    engine.top_k = cli.top_k;
  }
  if let Some(s) = cli.seed {
    engine.sample_seed = s;
  }
  engine.validate().context("invalid engine configuration")?;

  if cli.jobs == Some(0) {
    anyhow::bail!("--jobs must be at least 1");
  }

  let mode = match (cli.issue, cli.percentage) {
    (Some(issue), None) => RunMode::Single { issue },
    (None, Some(percentage)) => {
      let project = engine
        .project
        .clone()
        .ok_or_else(|| usage("--percentage needs a project (--project or `project` in the config file)"))?;
      RunMode::Batch { project, percentage, seed: engine.sample_seed }
    }
    (None, None) => return Err(usage("Provide one of --issue <id> or --percentage <1..=100>")),
    _ => return Err(usage("Ambiguous run mode: choose only one of --issue | --percentage")),
  };

  Ok(EffectiveConfig {
    corpus: util::canonicalize_lossy(corpus),
    mode,
    engine,
    jobs: cli.jobs,
    format: cli.format,
    out: cli.out,
  })
}
