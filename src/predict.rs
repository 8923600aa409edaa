// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Turn one assignee's scored history into a predicted resolve time (days)
// role: prediction
// inputs: AssigneeIssueSimilarity for one target issue
// outputs: Prediction (predicted days, similarity mass, compared issue count)
// invariants:
// - predicted = Σ(sᵢ·dᵢ) / Σsᵢ when Σsᵢ > 0, otherwise the unweighted mean of dᵢ
// - pure: same input, same output
// - empty history is an EmptyHistory error for the caller to skip
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use crate::error::{Error, Result};
use crate::model::{AssigneeIssueSimilarity, Prediction};

/// Similarity-weighted nearest-neighbour regression over an assignee's history.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveTimePredictor {
  /// Keep only the k most similar issues; `None` uses the whole history.
  top_k: Option<usize>,
}

impl ResolveTimePredictor {
  pub fn new(top_k: Option<usize>) -> Self {
    Self { top_k }
  }

  pub fn predict(&self, similarity: &AssigneeIssueSimilarity<'_>) -> Result<Prediction> {
    // Phase 1: (score, duration) pairs; issues without a measurable resolve time carry no signal
    let mut samples: Vec<(f64, f64)> = similarity
      .scored
      .iter()
      .filter_map(|s| s.issue.resolve_days().map(|d| (s.score.aggregate, d)))
      .collect();

    if samples.is_empty() {
      return Err(Error::EmptyHistory(similarity.assignee.id.clone()));
    }

    // Phase 2: optional cutoff; stable sort keeps corpus order among ties
    if let Some(k) = self.top_k {
      samples.sort_by(|a, b| b.0.total_cmp(&a.0));
      samples.truncate(k.max(1));
    }

    // Phase 3: weighted mean, or plain mean without any similarity signal
    let mass: f64 = samples.iter().map(|(s, _)| s).sum();
    let weighted = mass > 0.0 && mass.is_finite();
    let predicted_days = if weighted {
      samples.iter().map(|(s, d)| s * d).sum::<f64>() / mass
    } else {
      samples.iter().map(|(_, d)| d).sum::<f64>() / samples.len() as f64
    };

    Ok(Prediction {
      assignee: similarity.assignee.clone(),
      predicted_days,
      similarity_mass: mass,
      compared_issues: samples.len(),
      weighted,
    })
  }
}
