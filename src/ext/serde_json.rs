// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Nested JSON fetching via dotted paths with text, timestamp, and array extraction for loosely typed exports
// role: extension/serde_json
// outputs: JsonFetch trait and JsonFetched wrapper
// invariants: No panics; missing paths and blank strings yield None; non-arrays yield no items
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{DateTime, Utc};

/// Wrapper around a JSON location; extraction happens in a second step.
pub struct JsonFetched<'a> {
  inner: Option<&'a serde_json::Value>,
}

impl<'a> JsonFetched<'a> {
  /// Non-empty string value (blank strings count as absent).
  pub fn text(&self) -> Option<String> {
    self.inner.and_then(|v| v.as_str()).map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
  }

  /// Timestamp in RFC 3339 or Jira's `2016-03-01T10:15:30.000+0000` form.
  pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
    let raw = self.inner.and_then(|v| v.as_str())?;
    DateTime::parse_from_rfc3339(raw)
      .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z"))
      .ok()
      .map(|dt| dt.with_timezone(&Utc))
  }

  /// Elements of an array value; empty when absent or not an array.
  pub fn items(&self) -> &'a [serde_json::Value] {
    self.inner.and_then(|v| v.as_array()).map(|a| a.as_slice()).unwrap_or(&[])
  }
}

/// Extension to fetch nested values via dotted paths like "fields.assignee.displayName".
pub trait JsonFetch {
  fn fetch(&self, path: &str) -> JsonFetched<'_>;
}

impl JsonFetch for serde_json::Value {
  fn fetch(&self, path: &str) -> JsonFetched<'_> {
    if path.is_empty() {
      return JsonFetched { inner: Some(self) };
    }

    let mut cur = self;

    for key in path.split('.') {
      match cur.get(key) {
        Some(next) => cur = next,
        None => return JsonFetched { inner: None },
      }
    }

    JsonFetched { inner: Some(cur) }
  }
}
