// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Combine per-field text similarities into one issue-pair score and build per-assignee similarity lists
// role: similarity/aggregation
// inputs: target issue, filtered assignee groups, weights, TextSimilarity
// outputs: SimilarityScore per pair; AssigneeIssueSimilarity per assignee
// invariants:
// - score = w_summary·sim(summary, summary) + w_description·sim(desc, desc) + w_comments·sim(target summary, candidate comments)
// - weights are not normalized; with non-negative weights the score is monotonic in each field similarity
// - the target issue is skipped when it appears among the candidates
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{AssigneeIssueSimilarity, AssigneeIssues, Issue, ScoredIssue, SimilarityScore};
use crate::similarity::TextSimilarity;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityWeights {
  pub summary: f64,
  pub description: f64,
  pub comments: f64,
}

impl Default for SimilarityWeights {
  fn default() -> Self {
    Self { summary: 0.5, description: 0.3, comments: 0.2 }
  }
}

impl SimilarityWeights {
  pub fn validate(&self) -> Result<()> {
    for (name, value) in [
      ("summary_weight", self.summary),
      ("description_weight", self.description),
      ("comments_weight", self.comments),
    ] {
      if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidWeight { name, value });
      }
    }
    if self.summary + self.description + self.comments == 0.0 {
      return Err(Error::InvalidConfig("at least one similarity weight must be positive".into()));
    }
    Ok(())
  }

  /// Weighted sum of the three field similarities.
  pub fn combine(&self, summary: f64, description: f64, comments: f64) -> f64 {
    self.summary * summary + self.description * description + self.comments * comments
  }
}

#[derive(Debug)]
pub struct IssueSimilarityCalculator {
  weights: SimilarityWeights,
  text: TextSimilarity,
}

impl IssueSimilarityCalculator {
  pub fn new(weights: SimilarityWeights, text: TextSimilarity) -> Self {
    Self { weights, text }
  }

  pub fn score(&self, target: &Issue, candidate: &Issue) -> SimilarityScore {
    let summary = self.text.score(target.summary.as_deref(), candidate.summary.as_deref());
    let description = self.text.score(target.description.as_deref(), candidate.description.as_deref());
    // Target summary against the candidate's discussion, not the candidate's summary.
    let candidate_comments = candidate.joined_comments();
    let comments = self.text.score(target.summary.as_deref(), candidate_comments.as_deref());

    SimilarityScore {
      summary,
      description,
      comments,
      aggregate: self.weights.combine(summary, description, comments),
    }
  }

  pub fn aggregate(&self, target: &Issue, candidate: &Issue) -> f64 {
    self.score(target, candidate).aggregate
  }

  pub fn assignee_similarity<'a>(&self, target: &Issue, group: &AssigneeIssues<'a>) -> AssigneeIssueSimilarity<'a> {
    let scored: Vec<ScoredIssue<'a>> = group
      .issues
      .iter()
      .filter(|candidate| candidate.id != target.id)
      .map(|candidate| ScoredIssue { issue: *candidate, score: self.score(target, candidate) })
      .collect();

    debug!(assignee = %group.assignee.id, target = %target.id, compared = scored.len(), "scored assignee history");
    AssigneeIssueSimilarity { assignee: group.assignee, scored }
  }

  /// One similarity list per assignee group, in group order.
  pub fn similarity_list<'a>(&self, target: &Issue, groups: &[AssigneeIssues<'a>]) -> Vec<AssigneeIssueSimilarity<'a>> {
    groups.iter().map(|g| self.assignee_similarity(target, g)).collect()
  }
}
