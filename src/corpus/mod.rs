// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Persistence boundary: materialized issue/assignee corpus and the lookups the engine consumes
// role: corpus/repository
// inputs: Corpus files (native JSON or Jira search export)
// outputs: assignee→issues groups, single issue lookup, seeded percentage-scope samples
// side_effects: load reads one file; nothing else touches the filesystem
// invariants:
// - loaded issues satisfy resolved >= created (violating resolution timestamps are dropped with a warning)
// - issue ids are unique (later duplicates are dropped with a warning)
// - groups are ordered by assignee id; issues keep corpus order
// - the same (project, percentage, seed) always yields the same sample
// errors: IssueNotFound / ProjectNotFound for lookups; Io / Json for loading
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

pub mod jira;
pub mod json;

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::model::{Assignee, AssigneeIssues, Issue};

/// Read-only access to the issue corpus, as consumed by the engine.
pub trait IssueRepository: Sync {
  fn assignee_issues(&self, project: &str) -> Result<Vec<AssigneeIssues<'_>>>;
  fn issue(&self, id: &str) -> Result<&Issue>;
  fn project_sample(&self, project: &str, percentage: u8, seed: u64) -> Result<Vec<&Issue>>;
}

#[derive(Debug, Clone, Default)]
pub struct Corpus {
  assignees: BTreeMap<String, Assignee>,
  issues: Vec<Issue>,
}

impl Corpus {
  pub fn new(issues: Vec<Issue>, assignees: Vec<Assignee>) -> Self {
    let mut by_id: BTreeMap<String, Assignee> = assignees.into_iter().map(|a| (a.id.clone(), a)).collect();
    let mut seen: HashSet<String> = HashSet::new();
    let mut kept: Vec<Issue> = Vec::with_capacity(issues.len());

    for mut issue in issues {
      if !seen.insert(issue.id.clone()) {
        warn!(issue = %issue.id, "duplicate issue id; keeping the first occurrence");
        continue;
      }
      if let (Some(created), Some(resolved)) = (issue.created, issue.resolved) {
        if resolved < created {
          warn!(issue = %issue.id, "resolved before created; ignoring resolution timestamp");
          issue.resolved = None;
        }
      }
      if let Some(id) = &issue.assignee {
        by_id.entry(id.clone()).or_insert_with(|| Assignee::anonymous(id));
      }
      kept.push(issue);
    }

    Self { assignees: by_id, issues: kept }
  }

  /// Load a corpus file, detecting Jira search exports by shape.
  pub fn load(path: &Path) -> Result<Self> {
    let shown = path.display().to_string();
    let bytes = std::fs::read(path).map_err(|source| Error::Io { path: shown.clone(), source })?;
    let value: serde_json::Value =
      serde_json::from_slice(&bytes).map_err(|source| Error::Json { path: shown.clone(), source })?;

    let corpus = if jira::is_jira_export(&value) {
      jira::from_value(&value)
    } else {
      json::from_value(value).map_err(|source| Error::Json { path: shown.clone(), source })?
    };

    info!(
      path = %shown,
      issues = corpus.issues.len(),
      assignees = corpus.assignees.len(),
      projects = corpus.projects().len(),
      "corpus loaded"
    );
    Ok(corpus)
  }

  pub fn issues(&self) -> &[Issue] {
    &self.issues
  }

  pub fn assignees(&self) -> impl Iterator<Item = &Assignee> {
    self.assignees.values()
  }

  pub fn projects(&self) -> BTreeSet<&str> {
    self.issues.iter().map(|i| i.project.as_str()).collect()
  }

  fn project_issues(&self, project: &str) -> Result<Vec<&Issue>> {
    let issues: Vec<&Issue> = self.issues.iter().filter(|i| i.project == project).collect();
    if issues.is_empty() {
      return Err(Error::ProjectNotFound(project.to_string()));
    }
    Ok(issues)
  }
}

impl IssueRepository for Corpus {
  fn assignee_issues(&self, project: &str) -> Result<Vec<AssigneeIssues<'_>>> {
    let mut grouped: BTreeMap<&str, Vec<&Issue>> = BTreeMap::new();
    for issue in self.project_issues(project)? {
      if let Some(id) = issue.assignee.as_deref() {
        grouped.entry(id).or_default().push(issue);
      }
    }

    Ok(
      grouped
        .into_iter()
        .filter_map(|(id, issues)| self.assignees.get(id).map(|assignee| AssigneeIssues { assignee, issues }))
        .collect(),
    )
  }

  fn issue(&self, id: &str) -> Result<&Issue> {
    self.issues.iter().find(|i| i.id == id).ok_or_else(|| Error::IssueNotFound(id.to_string()))
  }

  fn project_sample(&self, project: &str, percentage: u8, seed: u64) -> Result<Vec<&Issue>> {
    if !(1..=100).contains(&percentage) {
      return Err(Error::InvalidConfig(format!("percentage must be within 1..=100, got {}", percentage)));
    }

    // Only resolved issues carry ground truth to evaluate against.
    let candidates: Vec<&Issue> =
      self.project_issues(project)?.into_iter().filter(|i| i.resolve_days().is_some()).collect();
    let n = candidates.len();
    let count = (n * percentage as usize).div_ceil(100);
    if count == 0 {
      return Ok(Vec::new());
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut picked = rand::seq::index::sample(&mut rng, n, count).into_vec();
    picked.sort_unstable();
    Ok(picked.into_iter().map(|i| candidates[i]).collect())
  }
}
