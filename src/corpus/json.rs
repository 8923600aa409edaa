use serde::{Deserialize, Serialize};

use super::Corpus;
use crate::model::{Assignee, Issue};

/// Native corpus document: `{ "assignees": [...], "issues": [...] }`.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct CorpusFile {
  #[serde(default)]
  pub assignees: Vec<Assignee>,
  pub issues: Vec<Issue>,
}

pub fn from_value(value: serde_json::Value) -> Result<Corpus, serde_json::Error> {
  let file: CorpusFile = serde_json::from_value(value)?;
  Ok(Corpus::new(file.issues, file.assignees))
}
