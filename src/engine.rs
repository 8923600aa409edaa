// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Drive filter → similarity → prediction → evaluation once per target issue, and over a seeded project sample
// role: processing/orchestrator
// inputs: IssueRepository, validated EngineConfig, target id or (project, percentage, seed)
// outputs: TargetReport per target; BatchReport with skipped targets and run-level statistics
// invariants:
// - evaluations share no mutable state; batch results are merged in sample order regardless of worker count
// - an assignee with no usable history is skipped, never fatal
// - a failing batch target is recorded as skipped, never aborts the batch
// errors: IssueNotFound / ProjectNotFound surface to the caller in single mode; InvalidConfig for a bad worker pool
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::aggregate::IssueSimilarityCalculator;
use crate::config::EngineConfig;
use crate::corpus::IssueRepository;
use crate::error::{Error, Result};
use crate::evaluate::PredictionPair;
use crate::filter::FilterChain;
use crate::model::{EvaluationStatistics, Issue, Prediction};
use crate::predict::ResolveTimePredictor;

/// One assignee's prediction for a target, with its error when the real duration is known.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AssigneeRow {
  #[serde(flatten)]
  pub prediction: Prediction,
  pub squared_error: Option<f64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TargetReport {
  pub issue_id: String,
  pub project: String,
  pub predictions: Vec<AssigneeRow>,
  /// Assignees dropped because nothing in their history could be used.
  pub skipped_assignees: Vec<String>,
  pub real_assignee: Option<String>,
  pub real_days: Option<f64>,
  pub statistics: Option<EvaluationStatistics>,
}

impl TargetReport {
  /// The prediction made for the assignee who actually resolved the issue.
  pub fn real_assignee_prediction(&self) -> Option<&Prediction> {
    let real = self.real_assignee.as_deref()?;
    self.predictions.iter().map(|r| &r.prediction).find(|p| p.assignee.id == real)
  }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SkippedTarget {
  pub issue_id: String,
  pub reason: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BatchReport {
  pub project: String,
  pub percentage: u8,
  pub seed: u64,
  pub sampled: usize,
  pub evaluated: usize,
  pub targets: Vec<TargetReport>,
  pub skipped: Vec<SkippedTarget>,
  /// Real assignee's prediction against the real duration, one pair per evaluated target.
  pub statistics: Option<EvaluationStatistics>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Report {
  Single(TargetReport),
  Batch(BatchReport),
}

pub struct Engine<'r, R: IssueRepository + ?Sized> {
  repo: &'r R,
  filters: FilterChain,
  calculator: IssueSimilarityCalculator,
  predictor: ResolveTimePredictor,
}

impl<'r, R: IssueRepository + ?Sized> Engine<'r, R> {
  /// Build the standard pipeline; configuration errors are raised here, before any evaluation.
  pub fn new(repo: &'r R, cfg: &EngineConfig) -> Result<Self> {
    cfg.validate()?;
    Ok(Self {
      repo,
      filters: FilterChain::from_config(cfg),
      calculator: IssueSimilarityCalculator::new(cfg.weights(), cfg.text_similarity()),
      predictor: ResolveTimePredictor::new(cfg.top_k),
    })
  }

  /// Assemble an engine from explicit components.
  pub fn with_components(
    repo: &'r R,
    filters: FilterChain,
    calculator: IssueSimilarityCalculator,
    predictor: ResolveTimePredictor,
  ) -> Self {
    Self { repo, filters, calculator, predictor }
  }

  pub fn evaluate_target(&self, target: &Issue) -> Result<TargetReport> {
    let groups = self.repo.assignee_issues(&target.project)?;
    let filtered = self.filters.apply(target, &groups);
    info!(target = %target.id, assignees = filtered.len(), "evaluating target issue");

    let real_days = target.resolve_days();
    let mut predictions = Vec::with_capacity(filtered.len());
    let mut skipped_assignees = Vec::new();

    for sim in self.calculator.similarity_list(target, &filtered) {
      match self.predictor.predict(&sim) {
        Ok(prediction) => {
          debug!(
            target = %target.id,
            assignee = %prediction.assignee.id,
            predicted_days = prediction.predicted_days,
            mass = prediction.similarity_mass,
            "assignee prediction"
          );
          let squared_error = real_days.map(|actual| PredictionPair::new(prediction.predicted_days, actual).squared_error());
          predictions.push(AssigneeRow { prediction, squared_error });
        }
        Err(Error::EmptyHistory(assignee)) => {
          warn!(target = %target.id, assignee = %assignee, "assignee has no usable history; skipped");
          skipped_assignees.push(assignee);
        }
        Err(e) => return Err(e),
      }
    }

    let statistics = real_days.and_then(|actual| {
      let pairs: Vec<PredictionPair> =
        predictions.iter().map(|r| PredictionPair::new(r.prediction.predicted_days, actual)).collect();
      EvaluationStatistics::from_pairs(&pairs).ok()
    });

    info!(target = %target.id, predictions = predictions.len(), "target issue evaluated");
    Ok(TargetReport {
      issue_id: target.id.clone(),
      project: target.project.clone(),
      predictions,
      skipped_assignees,
      real_assignee: target.assignee.clone(),
      real_days,
      statistics,
    })
  }

  pub fn run_single(&self, issue_id: &str) -> Result<TargetReport> {
    let target = self.repo.issue(issue_id)?;
    self.evaluate_target(target)
  }

  fn evaluate_sampled(&self, target: &Issue) -> Result<TargetReport> {
    if target.resolve_days().is_none() {
      return Err(Error::MissingResolveTime(target.id.clone()));
    }
    let report = self.evaluate_target(target)?;
    if report.predictions.is_empty() {
      return Err(Error::NoPredictions(target.id.clone()));
    }
    Ok(report)
  }

  /// Evaluate a seeded sample of the project on a worker pool (`jobs = None` uses all cores).
  pub fn run_batch(&self, project: &str, percentage: u8, seed: u64, jobs: Option<usize>) -> Result<BatchReport> {
    let sample = self.repo.project_sample(project, percentage, seed)?;
    info!(project, percentage, seed, sampled = sample.len(), "batch sample drawn");

    let pool = rayon::ThreadPoolBuilder::new()
      .num_threads(jobs.unwrap_or(0))
      .build()
      .map_err(|e| Error::InvalidConfig(format!("worker pool: {}", e)))?;

    // Order-preserving collect keeps the report identical for any worker count
    let outcomes: Vec<(&Issue, Result<TargetReport>)> =
      pool.install(|| sample.par_iter().map(|t| (*t, self.evaluate_sampled(t))).collect());

    let mut targets = Vec::new();
    let mut skipped = Vec::new();
    for (issue, outcome) in outcomes {
      match outcome {
        Ok(report) => targets.push(report),
        Err(e) => {
          warn!(target = %issue.id, error = %e, "target issue skipped");
          skipped.push(SkippedTarget { issue_id: issue.id.clone(), reason: e.to_string() });
        }
      }
    }

    let pairs: Vec<PredictionPair> = targets
      .iter()
      .filter_map(|t| Some(PredictionPair::new(t.real_assignee_prediction()?.predicted_days, t.real_days?)))
      .collect();
    let statistics = match EvaluationStatistics::from_pairs(&pairs) {
      Ok(stats) => {
        if stats.coefficient_of_determination.is_none() {
          warn!(project, "R² not computable: every real duration is identical");
        }
        Some(stats)
      }
      Err(e) => {
        warn!(project, error = %e, "no run-level statistics");
        None
      }
    };

    info!(project, evaluated = targets.len(), skipped = skipped.len(), "batch finished");
    Ok(BatchReport {
      project: project.to_string(),
      percentage,
      seed,
      sampled: sample.len(),
      evaluated: targets.len(),
      targets,
      skipped,
      statistics,
    })
  }
}
