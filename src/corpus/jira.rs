// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Import a Jira REST search export into the issue corpus
// role: corpus/import
// inputs: serde_json::Value shaped like {"issues": [{"key", "fields": {...}}]}
// outputs: Corpus with issues and assignees (id = Jira account name/key, name = display name)
// invariants: Best-effort; entries without a key or project are skipped with a warning, never abort the load
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;

use tracing::warn;

use super::Corpus;
use crate::ext::serde_json::JsonFetch;
use crate::model::{Assignee, Comment, Issue};

/// Jira search responses carry issues with a `fields` object.
pub fn is_jira_export(value: &serde_json::Value) -> bool {
  value
    .fetch("issues")
    .items()
    .first()
    .map(|first| first.get("fields").is_some())
    .unwrap_or(false)
}

fn assignee_of(fields: &serde_json::Value) -> Option<Assignee> {
  let name = fields.fetch("assignee.displayName").text();
  let id = fields
    .fetch("assignee.name")
    .text()
    .or_else(|| fields.fetch("assignee.accountId").text())
    .or_else(|| name.clone())?;
  Some(Assignee { name: name.unwrap_or_else(|| id.clone()), id })
}

fn comments_of(fields: &serde_json::Value) -> Vec<Comment> {
  fields
    .fetch("comment.comments")
    .items()
    .iter()
    .filter_map(|c| {
      Some(Comment {
        body: c.fetch("body").text()?,
        author: c.fetch("author.displayName").text(),
        created: c.fetch("created").to_datetime(),
      })
    })
    .collect()
}

fn issue_of(raw: &serde_json::Value) -> Option<(Issue, Option<Assignee>)> {
  let key = raw.fetch("key").text()?;
  let fields = raw.get("fields")?;
  let project = fields.fetch("project.key").text().or_else(|| key.split('-').next().map(str::to_string))?;
  let assignee = assignee_of(fields);

  let issue = Issue {
    id: key,
    project,
    summary: fields.fetch("summary").text(),
    description: fields.fetch("description").text(),
    comments: comments_of(fields),
    created: fields.fetch("created").to_datetime(),
    resolved: fields.fetch("resolutiondate").to_datetime(),
    priority: fields.fetch("priority.name").text(),
    issue_type: fields.fetch("issuetype.name").text(),
    assignee: assignee.as_ref().map(|a| a.id.clone()),
    resolution: fields.fetch("resolution.name").text(),
  };
  Some((issue, assignee))
}

pub fn from_value(value: &serde_json::Value) -> Corpus {
  let mut issues = Vec::new();
  let mut assignees: BTreeMap<String, Assignee> = BTreeMap::new();

  for (idx, raw) in value.fetch("issues").items().iter().enumerate() {
    match issue_of(raw) {
      Some((issue, assignee)) => {
        if let Some(a) = assignee {
          assignees.entry(a.id.clone()).or_insert(a);
        }
        issues.push(issue);
      }
      None => warn!(index = idx, "skipping Jira issue without key or fields"),
    }
  }

  Corpus::new(issues, assignees.into_values().collect())
}
