// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Narrow the assignee→issues corpus to comparable, well-formed historical issues
// role: pipeline/filtering
// inputs: target issue, assignee groups borrowed from the corpus, filter settings from EngineConfig
// outputs: New assignee groups holding only accepted issues; assignees with nothing left are dropped
// invariants:
// - an issue survives only if every filter accepts it (pure conjunction, order-independent)
// - filtering never mutates or copies issues
// - the target issue is never part of its own comparison set when ExcludeTarget is in the chain
// - assignee history counts resolved issues other than the target, before any other filter runs
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use tracing::debug;

use crate::config::EngineConfig;
use crate::model::{AssigneeIssues, Issue};

/// What a filter may look at besides the issue itself.
#[derive(Debug, Clone, Copy)]
pub struct FilterContext<'a> {
  pub target: &'a Issue,
  /// Resolved issues in the assignee's group, not counting the target.
  pub assignee_history: usize,
}

pub trait IssueFilter: Send + Sync {
  fn name(&self) -> &'static str;
  fn accept(&self, issue: &Issue, ctx: &FilterContext<'_>) -> bool;
}

/// Both creation and resolution timestamps must be present.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampsPresent;

impl IssueFilter for TimestampsPresent {
  fn name(&self) -> &'static str { "timestamps_present" }

  fn accept(&self, issue: &Issue, _ctx: &FilterContext<'_>) -> bool {
    issue.created.is_some() && issue.resolved.is_some()
  }
}

#[derive(Debug, Clone, Copy)]
pub struct MinDescriptionLength(pub usize);

impl IssueFilter for MinDescriptionLength {
  fn name(&self) -> &'static str { "min_description_length" }

  fn accept(&self, issue: &Issue, _ctx: &FilterContext<'_>) -> bool {
    issue.description_len() >= self.0
  }
}

/// Assignees with fewer historical issues than this are not comparable.
#[derive(Debug, Clone, Copy)]
pub struct MinIssueCount(pub usize);

impl IssueFilter for MinIssueCount {
  fn name(&self) -> &'static str { "min_issue_count" }

  fn accept(&self, _issue: &Issue, ctx: &FilterContext<'_>) -> bool {
    ctx.assignee_history >= self.0
  }
}

fn allowed(value: Option<&str>, list: &[String]) -> bool {
  if list.is_empty() {
    return true;
  }
  match value {
    Some(v) => list.iter().any(|a| a.eq_ignore_ascii_case(v.trim())),
    None => false,
  }
}

/// Issue type must be in the list (case-insensitive). An empty list allows everything.
#[derive(Debug, Clone, Default)]
pub struct AllowedTypes(pub Vec<String>);

impl IssueFilter for AllowedTypes {
  fn name(&self) -> &'static str { "allowed_types" }

  fn accept(&self, issue: &Issue, _ctx: &FilterContext<'_>) -> bool {
    allowed(issue.issue_type.as_deref(), &self.0)
  }
}

/// Priority must be in the list (case-insensitive). An empty list allows everything.
#[derive(Debug, Clone, Default)]
pub struct AllowedPriorities(pub Vec<String>);

impl IssueFilter for AllowedPriorities {
  fn name(&self) -> &'static str { "allowed_priorities" }

  fn accept(&self, issue: &Issue, _ctx: &FilterContext<'_>) -> bool {
    allowed(issue.priority.as_deref(), &self.0)
  }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExcludeTarget;

impl IssueFilter for ExcludeTarget {
  fn name(&self) -> &'static str { "exclude_target" }

  fn accept(&self, issue: &Issue, ctx: &FilterContext<'_>) -> bool {
    issue.id != ctx.target.id
  }
}

#[derive(Default)]
pub struct FilterChain {
  filters: Vec<Box<dyn IssueFilter>>,
}

impl FilterChain {
  pub fn new() -> Self {
    Self::default()
  }

  /// Append a filter to the chain.
  pub fn with<F: IssueFilter + 'static>(mut self, filter: F) -> Self {
    self.filters.push(Box::new(filter));
    self
  }

  /// The standard six-filter chain driven by configuration.
  pub fn from_config(cfg: &EngineConfig) -> Self {
    Self::new()
      .with(TimestampsPresent)
      .with(MinDescriptionLength(cfg.min_description_length))
      .with(MinIssueCount(cfg.min_issue_count))
      .with(AllowedTypes(cfg.allowed_types.clone()))
      .with(AllowedPriorities(cfg.allowed_priorities.clone()))
      .with(ExcludeTarget)
  }

  /// Index of the first filter rejecting `issue`, or `None` when all accept.
  fn first_rejection(&self, issue: &Issue, ctx: &FilterContext<'_>) -> Option<usize> {
    self.filters.iter().position(|f| !f.accept(issue, ctx))
  }

  /// Apply the chain to every assignee group for `target`.
  pub fn apply<'a>(&self, target: &Issue, groups: &[AssigneeIssues<'a>]) -> Vec<AssigneeIssues<'a>> {
    let mut rejected = vec![0usize; self.filters.len()];
    let mut out = Vec::with_capacity(groups.len());

    for group in groups {
      let history = group
        .issues
        .iter()
        .filter(|i| i.id != target.id && i.created.is_some() && i.resolved.is_some())
        .count();
      let ctx = FilterContext { target, assignee_history: history };
      let mut kept: Vec<&'a Issue> = Vec::new();

      for issue in &group.issues {
        match self.first_rejection(issue, &ctx) {
          None => kept.push(*issue),
          Some(idx) => rejected[idx] += 1,
        }
      }

      if !kept.is_empty() {
        out.push(AssigneeIssues { assignee: group.assignee, issues: kept });
      }
    }

    for (f, count) in self.filters.iter().zip(&rejected) {
      if *count > 0 {
        debug!(filter = f.name(), rejected = *count, target = %target.id, "filter rejections");
      }
    }

    out
  }
}

impl std::fmt::Debug for FilterChain {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let names: Vec<&str> = self.filters.iter().map(|x| x.name()).collect();
    f.debug_struct("FilterChain").field("filters", &names).finish()
  }
}
