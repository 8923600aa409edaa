// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Engine configuration document: defaults, JSON loading, eager validation, component construction
// role: config
// inputs: Optional JSON file; CLI overrides applied by cli::normalize
// outputs: EngineConfig, SimilarityWeights, TextSimilarity
// invariants:
// - every key has a default; unknown keys are rejected
// - validate() runs before any evaluation; failures are fatal configuration errors
// errors: Io / Json when loading; InvalidWeight / InvalidConfig on validation
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::aggregate::SimilarityWeights;
use crate::error::{Error, Result};
use crate::similarity::{SimilarityMetric, TextSimilarity};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
  /// Project whose backlog is sampled and compared (required for batch mode).
  pub project: Option<String>,
  pub summary_weight: f64,
  pub description_weight: f64,
  pub comments_weight: f64,
  pub metric: SimilarityMetric,
  /// Share of the lexical score when `metric` is `blend`.
  pub lexical_share: f64,
  pub min_description_length: usize,
  pub min_issue_count: usize,
  pub allowed_types: Vec<String>,
  pub allowed_priorities: Vec<String>,
  pub top_k: Option<usize>,
  pub sample_seed: u64,
}

impl Default for EngineConfig {
  fn default() -> Self {
    let w = SimilarityWeights::default();
    Self {
      project: None,
      summary_weight: w.summary,
      description_weight: w.description,
      comments_weight: w.comments,
      metric: SimilarityMetric::default(),
      lexical_share: 0.5,
      min_description_length: 20,
      min_issue_count: 1,
      allowed_types: Vec::new(),
      allowed_priorities: Vec::new(),
      top_k: None,
      sample_seed: 0,
    }
  }
}

impl EngineConfig {
  pub fn from_file(path: &Path) -> Result<Self> {
    let display = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|source| Error::Io { path: display.clone(), source })?;
    serde_json::from_str(&raw).map_err(|source| Error::Json { path: display, source })
  }

  pub fn weights(&self) -> SimilarityWeights {
    SimilarityWeights {
      summary: self.summary_weight,
      description: self.description_weight,
      comments: self.comments_weight,
    }
  }

  pub fn text_similarity(&self) -> TextSimilarity {
    TextSimilarity::new(self.metric, self.lexical_share)
  }

  pub fn validate(&self) -> Result<()> {
    self.weights().validate()?;

    if !(0.0..=1.0).contains(&self.lexical_share) {
      return Err(Error::InvalidConfig(format!("lexical_share must lie in [0, 1], got {}", self.lexical_share)));
    }
    if self.top_k == Some(0) {
      return Err(Error::InvalidConfig("top_k must be at least 1".into()));
    }
    if matches!(&self.project, Some(p) if p.trim().is_empty()) {
      return Err(Error::InvalidConfig("project must not be blank".into()));
    }
    Ok(())
  }
}
