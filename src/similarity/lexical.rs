use std::collections::BTreeSet;

use super::vectorizer::{LetterTokenizer, TermVectorizer};
use super::TextsSimilarity;
use crate::error::Result;

/// Jaccard overlap of the two texts' term sets: |A ∩ B| / |A ∪ B|.
#[derive(Debug, Clone, Default)]
pub struct LexicalSimilarity<V = LetterTokenizer> {
  vectorizer: V,
}

impl<V: TermVectorizer> LexicalSimilarity<V> {
  pub fn new(vectorizer: V) -> Self {
    Self { vectorizer }
  }

  fn terms(&self, text: &str) -> BTreeSet<String> {
    self.vectorizer.term_frequencies(text).into_keys().collect()
  }
}

impl<V: TermVectorizer> TextsSimilarity for LexicalSimilarity<V> {
  fn name(&self) -> &'static str { "lexical" }

  fn similarity(&self, a: &str, b: &str) -> Result<f64> {
    let ta = self.terms(a);
    let tb = self.terms(b);
    if ta.is_empty() || tb.is_empty() {
      return Ok(0.0);
    }

    let intersection = ta.intersection(&tb).count();
    let union = ta.union(&tb).count();
    if union == 0 {
      return Ok(0.0);
    }
    Ok(intersection as f64 / union as f64)
  }
}
