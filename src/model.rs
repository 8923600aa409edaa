// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Define the in-memory issue/assignee model and the transient similarity/prediction/statistics types
// role: model/types
// outputs: Serializable structs with stable field names; borrowed views over corpus-owned issues
// invariants: resolved >= created whenever both are present (enforced at load); issues are never mutated by the engine
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Comment {
  pub body: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub author: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub created: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Issue {
  pub id: String,
  pub project: String,
  #[serde(default)]
  pub summary: Option<String>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub comments: Vec<Comment>,
  #[serde(default)]
  pub created: Option<DateTime<Utc>>,
  #[serde(default)]
  pub resolved: Option<DateTime<Utc>>,
  #[serde(default)]
  pub priority: Option<String>,
  #[serde(default, rename = "type")]
  pub issue_type: Option<String>,
  /// Identifier of the resolving assignee.
  #[serde(default)]
  pub assignee: Option<String>,
  #[serde(default)]
  pub resolution: Option<String>,
}

impl Issue {
  /// Wall-clock resolve time in days; `None` without both timestamps.
  pub fn resolve_days(&self) -> Option<f64> {
    match (self.created, self.resolved) {
      (Some(created), Some(resolved)) => util::days_between(created, resolved),
      _ => None,
    }
  }

  /// Comment bodies joined in order; `None` when the issue has no comments.
  pub fn joined_comments(&self) -> Option<String> {
    if self.comments.is_empty() {
      return None;
    }
    let parts: Vec<&str> = self.comments.iter().map(|c| c.body.as_str()).collect();
    Some(parts.join(" "))
  }

  /// Trimmed description length in characters (0 when absent).
  pub fn description_len(&self) -> usize {
    self.description.as_deref().map(|d| d.trim().chars().count()).unwrap_or(0)
  }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Assignee {
  pub id: String,
  pub name: String,
}

impl Assignee {
  pub fn anonymous(id: &str) -> Self {
    Self { id: id.to_string(), name: id.to_string() }
  }
}

/// One assignee with the issues attributed to them, borrowed from the corpus.
#[derive(Debug, Clone)]
pub struct AssigneeIssues<'a> {
  pub assignee: &'a Assignee,
  pub issues: Vec<&'a Issue>,
}

/// Per-field similarities for one (target, candidate) pair plus their weighted aggregate.
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct SimilarityScore {
  pub summary: f64,
  pub description: f64,
  pub comments: f64,
  pub aggregate: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct ScoredIssue<'a> {
  pub issue: &'a Issue,
  pub score: SimilarityScore,
}

/// Similarities of one assignee's historical issues to a single target issue.
#[derive(Debug, Clone)]
pub struct AssigneeIssueSimilarity<'a> {
  pub assignee: &'a Assignee,
  pub scored: Vec<ScoredIssue<'a>>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Prediction {
  pub assignee: Assignee,
  pub predicted_days: f64,
  pub similarity_mass: f64,
  pub compared_issues: usize,
  /// False when the predictor fell back to the unweighted mean.
  pub weighted: bool,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct EvaluationStatistics {
  pub count: usize,
  pub mean_squared_error: f64,
  pub root_mean_squared_error: f64,
  /// `None` when every actual value is identical (R² undefined).
  pub coefficient_of_determination: Option<f64>,
}
