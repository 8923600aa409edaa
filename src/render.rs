use std::fmt::Write as _;

use anyhow::Result;

use crate::cli::OutputFormat;
use crate::engine::{BatchReport, Report, TargetReport};
use crate::model::EvaluationStatistics;

pub const NEW_PREDICTION: &str = "######## New prediction ########";
pub const END_PREDICTION: &str = "######## End prediction ########";
pub const BATCH_SUMMARY: &str = "######## Batch summary ########";

pub fn render(report: &Report, format: OutputFormat) -> Result<String> {
  match format {
    OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    OutputFormat::Text => Ok(render_text(report)),
  }
}

pub fn render_text(report: &Report) -> String {
  let mut out = String::new();
  match report {
    Report::Single(target) => write_target(&mut out, target),
    Report::Batch(batch) => write_batch(&mut out, batch),
  }
  out
}

fn days(v: Option<f64>) -> String {
  v.map(|d| format!("{:.3} days", d)).unwrap_or_else(|| "n/a".to_string())
}

fn num(v: Option<f64>) -> String {
  v.map(|x| format!("{:.4}", x)).unwrap_or_else(|| "n/a".to_string())
}

fn write_statistics(out: &mut String, stats: Option<&EvaluationStatistics>) {
  let _ = writeln!(out, "Root mean squared error: {}", num(stats.map(|s| s.root_mean_squared_error)));
  let _ = writeln!(out, "Coefficient of determination: {}", num(stats.and_then(|s| s.coefficient_of_determination)));
}

fn write_target(out: &mut String, t: &TargetReport) {
  let _ = writeln!(out, "{}", NEW_PREDICTION);
  let _ = writeln!(out, "Issue: {} ({})", t.issue_id, t.project);
  for row in &t.predictions {
    let p = &row.prediction;
    let _ = writeln!(
      out,
      "{}: {} (similarity {:.4}, {} issues{}), squared error {}",
      p.assignee.name,
      days(Some(p.predicted_days)),
      p.similarity_mass,
      p.compared_issues,
      if p.weighted { "" } else { ", unweighted" },
      num(row.squared_error),
    );
  }
  for a in &t.skipped_assignees {
    let _ = writeln!(out, "{}: skipped (no usable history)", a);
  }
  let _ = writeln!(out, "Real assignee: {}", t.real_assignee.as_deref().unwrap_or("n/a"));
  let _ = writeln!(out, "Real time: {}", days(t.real_days));
  write_statistics(out, t.statistics.as_ref());
  let _ = writeln!(out, "{}", END_PREDICTION);
}

fn write_batch(out: &mut String, b: &BatchReport) {
  for t in &b.targets {
    write_target(out, t);
  }
  let _ = writeln!(out, "{}", BATCH_SUMMARY);
  let _ = writeln!(out, "Project: {}", b.project);
  let _ = writeln!(out, "Sampled: {} ({}%, seed {})", b.sampled, b.percentage, b.seed);
  let _ = writeln!(out, "Evaluated: {}", b.evaluated);
  let _ = writeln!(out, "Skipped: {}", b.skipped.len());
  for s in &b.skipped {
    let _ = writeln!(out, "  {}: {}", s.issue_id, s.reason);
  }
  write_statistics(out, b.statistics.as_ref());
}
