use std::collections::BTreeSet;

use super::vectorizer::{LetterTokenizer, TermFrequencies, TermVectorizer};
use super::TextsSimilarity;
use crate::error::{Error, Result};

/// Rounding slack tolerated outside [0, 1] before a cosine counts as out of range.
pub const DRIFT_TOLERANCE: f64 = 1e-9;

/// Cosine of the angle between L1-normalized term-frequency vectors built over
/// the union vocabulary of both texts.
#[derive(Debug, Clone, Default)]
pub struct CosineSimilarity<V = LetterTokenizer> {
  vectorizer: V,
}

impl<V: TermVectorizer> CosineSimilarity<V> {
  pub fn new(vectorizer: V) -> Self {
    Self { vectorizer }
  }
}

impl<V: TermVectorizer> TextsSimilarity for CosineSimilarity<V> {
  fn name(&self) -> &'static str { "cosine" }

  fn similarity(&self, a: &str, b: &str) -> Result<f64> {
    let fa = self.vectorizer.term_frequencies(a);
    let fb = self.vectorizer.term_frequencies(b);
    cosine(&fa, &fb)
  }
}

fn to_l1_vector(freqs: &TermFrequencies, vocabulary: &BTreeSet<&String>) -> Option<Vec<f64>> {
  let raw: Vec<f64> = vocabulary.iter().map(|t| freqs.get(*t).copied().unwrap_or(0) as f64).collect();
  let l1: f64 = raw.iter().map(|x| x.abs()).sum();
  if l1 == 0.0 {
    return None;
  }
  Some(raw.into_iter().map(|x| x / l1).collect())
}

/// Cosine over two frequency maps; 0 when either has no terms.
pub fn cosine(fa: &TermFrequencies, fb: &TermFrequencies) -> Result<f64> {
  let vocabulary: BTreeSet<&String> = fa.keys().chain(fb.keys()).collect();

  let (v1, v2) = match (to_l1_vector(fa, &vocabulary), to_l1_vector(fb, &vocabulary)) {
    (Some(v1), Some(v2)) => (v1, v2),
    _ => return Ok(0.0),
  };

  let dot: f64 = v1.iter().zip(&v2).map(|(x, y)| x * y).sum();
  let n1 = v1.iter().map(|x| x * x).sum::<f64>().sqrt();
  let n2 = v2.iter().map(|x| x * x).sum::<f64>().sqrt();

  check_range(dot / (n1 * n2))
}

/// Accept values in [0, 1], clamp pure rounding drift, reject the rest.
pub fn check_range(value: f64) -> Result<f64> {
  if (0.0..=1.0).contains(&value) {
    return Ok(value);
  }
  if value.is_finite() && value > -DRIFT_TOLERANCE && value < 1.0 + DRIFT_TOLERANCE {
    return Ok(value.clamp(0.0, 1.0));
  }
  Err(Error::SimilarityOutOfRange(value))
}
