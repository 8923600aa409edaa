// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Typed error taxonomy for the prediction engine (configuration, data, numeric, io)
// role: errors
// outputs: Error enum and crate-level Result alias
// invariants: configuration errors are fatal; data/numeric errors are scoped to one unit of work by the caller
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use thiserror::Error;

/// All errors raised by the prediction engine and its collaborators.
#[derive(Debug, Error)]
pub enum Error {
  // configuration
  #[error("invalid configuration: {0}")]
  InvalidConfig(String),

  #[error("invalid weight for {name}: {value} (weights must be finite and >= 0)")]
  InvalidWeight { name: &'static str, value: f64 },

  // data
  #[error("issue not found: {0}")]
  IssueNotFound(String),

  #[error("project not found: {0}")]
  ProjectNotFound(String),

  #[error("assignee '{0}' has no historical issues left after filtering")]
  EmptyHistory(String),

  #[error("issue {0} has no measurable resolve time")]
  MissingResolveTime(String),

  #[error("no assignee produced a prediction for issue {0}")]
  NoPredictions(String),

  #[error("cannot evaluate an empty batch of predictions")]
  EmptyBatch,

  // numeric
  #[error("similarity {0} is outside [0, 1]")]
  SimilarityOutOfRange(f64),

  // io / parse
  #[error("io error on {path}: {source}")]
  Io {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("malformed JSON in {path}: {source}")]
  Json {
    path: String,
    #[source]
    source: serde_json::Error,
  },
}

impl Error {
  /// Usage-level failures are reported to the operator instead of crashing the run.
  pub fn is_usage_failure(&self) -> bool {
    matches!(self, Error::IssueNotFound(_) | Error::ProjectNotFound(_))
  }
}

pub type Result<T> = std::result::Result<T, Error>;
