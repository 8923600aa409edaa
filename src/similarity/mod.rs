// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Text similarity metrics (lexical overlap, term-vector cosine) behind one capability, plus metric selection
// role: similarity/namespace
// inputs: Two optional text bodies
// outputs: A score in [0, 1]
// invariants:
// - absent text on either side scores 0 and is never an error
// - out-of-range metric results are logged and scored 0; they never abort a run
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

pub mod cosine;
pub mod lexical;
pub mod vectorizer;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
pub use cosine::CosineSimilarity;
pub use lexical::LexicalSimilarity;
pub use vectorizer::{LetterTokenizer, TermFrequencies, TermVectorizer};

/// Similarity between two present text bodies.
pub trait TextsSimilarity: Send + Sync {
  fn name(&self) -> &'static str;
  fn similarity(&self, a: &str, b: &str) -> Result<f64>;
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum SimilarityMetric {
  #[default]
  Cosine,
  Lexical,
  /// Lexical and cosine mixed by `lexical_share`.
  Blend,
}

/// Field-level text scorer used by the aggregator.
pub struct TextSimilarity {
  metric: SimilarityMetric,
  lexical_share: f64,
  lexical: Box<dyn TextsSimilarity>,
  cosine: Box<dyn TextsSimilarity>,
}

impl TextSimilarity {
  pub fn new(metric: SimilarityMetric, lexical_share: f64) -> Self {
    Self::with_vectorizer(metric, lexical_share, LetterTokenizer)
  }

  pub fn with_vectorizer<V>(metric: SimilarityMetric, lexical_share: f64, vectorizer: V) -> Self
  where
    V: TermVectorizer + Clone + 'static,
  {
    Self {
      metric,
      lexical_share: lexical_share.clamp(0.0, 1.0),
      lexical: Box::new(LexicalSimilarity::new(vectorizer.clone())),
      cosine: Box::new(CosineSimilarity::new(vectorizer)),
    }
  }

  pub fn metric(&self) -> SimilarityMetric {
    self.metric
  }

  /// Score two optional texts; missing input contributes no signal.
  pub fn score(&self, a: Option<&str>, b: Option<&str>) -> f64 {
    let (a, b) = match (a, b) {
      (Some(a), Some(b)) => (a, b),
      _ => return 0.0,
    };

    match self.metric {
      SimilarityMetric::Lexical => recover(self.lexical.as_ref(), a, b),
      SimilarityMetric::Cosine => recover(self.cosine.as_ref(), a, b),
      SimilarityMetric::Blend => {
        let lex = recover(self.lexical.as_ref(), a, b);
        let cos = recover(self.cosine.as_ref(), a, b);
        self.lexical_share * lex + (1.0 - self.lexical_share) * cos
      }
    }
  }
}

impl std::fmt::Debug for TextSimilarity {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("TextSimilarity")
      .field("metric", &self.metric)
      .field("lexical_share", &self.lexical_share)
      .finish()
  }
}

fn recover(metric: &dyn TextsSimilarity, a: &str, b: &str) -> f64 {
  match metric.similarity(a, b) {
    Ok(v) => v,
    Err(Error::SimilarityOutOfRange(v)) => {
      warn!(metric = metric.name(), value = v, "similarity outside [0, 1]; scoring pair as 0");
      0.0
    }
    Err(e) => {
      warn!(metric = metric.name(), error = %e, "similarity failed; scoring pair as 0");
      0.0
    }
  }
}
