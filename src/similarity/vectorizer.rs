use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// Term → occurrence count for one text.
pub type TermFrequencies = BTreeMap<String, u32>;

/// Turns raw text into term frequencies for the similarity metrics.
pub trait TermVectorizer: Send + Sync {
  fn term_frequencies(&self, text: &str) -> TermFrequencies;
}

static LETTER_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{L}+").expect("valid letter-run pattern"));

/// Splits on anything that is not a letter and lowercases each run.
/// "NullPointerException in login()" → {nullpointerexception, in, login}.
///
/// Digits are separators, not terms: "HTTP 500" yields only {http}, and a text
/// made of digits and punctuation alone has no terms, so it scores 0 under every
/// metric, even against an identical text.
#[derive(Debug, Clone, Copy, Default)]
pub struct LetterTokenizer;

impl LetterTokenizer {
  pub fn tokens<'t>(&self, text: &'t str) -> impl Iterator<Item = String> + 't {
    LETTER_RUN.find_iter(text).map(|m| m.as_str().to_lowercase())
  }
}

impl TermVectorizer for LetterTokenizer {
  fn term_frequencies(&self, text: &str) -> TermFrequencies {
    let mut freqs = TermFrequencies::new();
    for term in self.tokens(text) {
      *freqs.entry(term).or_insert(0) += 1;
    }
    freqs
  }
}
