// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Batch prediction-quality statistics (MSE, RMSE, R²)
// role: evaluation
// inputs: (predicted, actual) duration pairs
// outputs: EvaluationStatistics
// invariants:
// - RMSE is exactly sqrt(MSE)
// - R² is None (not computable) when all actual values are identical; never reported as 0
// - empty batches are an EmptyBatch error
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::EvaluationStatistics;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionPair {
  pub predicted: f64,
  pub actual: f64,
}

impl PredictionPair {
  pub fn new(predicted: f64, actual: f64) -> Self {
    Self { predicted, actual }
  }

  pub fn squared_error(&self) -> f64 {
    (self.predicted - self.actual).powi(2)
  }
}

fn non_empty(pairs: &[PredictionPair]) -> Result<&[PredictionPair]> {
  if pairs.is_empty() {
    return Err(Error::EmptyBatch);
  }
  Ok(pairs)
}

pub fn mean_squared_error(pairs: &[PredictionPair]) -> Result<f64> {
  let pairs = non_empty(pairs)?;
  Ok(pairs.iter().map(PredictionPair::squared_error).sum::<f64>() / pairs.len() as f64)
}

pub fn root_mean_squared_error(pairs: &[PredictionPair]) -> Result<f64> {
  mean_squared_error(pairs).map(f64::sqrt)
}

/// R² = 1 − SS_res / SS_tot; `None` when SS_tot is zero.
pub fn coefficient_of_determination(pairs: &[PredictionPair]) -> Result<Option<f64>> {
  let pairs = non_empty(pairs)?;
  let first = pairs[0].actual;
  if pairs.iter().all(|p| p.actual == first) {
    return Ok(None);
  }

  let mean = pairs.iter().map(|p| p.actual).sum::<f64>() / pairs.len() as f64;
  let ss_res: f64 = pairs.iter().map(PredictionPair::squared_error).sum();
  let ss_tot: f64 = pairs.iter().map(|p| (p.actual - mean).powi(2)).sum();
  if ss_tot == 0.0 {
    return Ok(None);
  }
  Ok(Some(1.0 - ss_res / ss_tot))
}

impl EvaluationStatistics {
  pub fn from_pairs(pairs: &[PredictionPair]) -> Result<Self> {
    let mse = mean_squared_error(pairs)?;
    Ok(Self {
      count: pairs.len(),
      mean_squared_error: mse,
      root_mean_squared_error: mse.sqrt(),
      coefficient_of_determination: coefficient_of_determination(pairs)?,
    })
  }
}
