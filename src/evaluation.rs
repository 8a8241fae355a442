//! Detection scoring against ground truth.
//!
//! A detection matches a ground-truth region of the same image id when their
//! left edges are within `tolerance_px`. Detections are considered in
//! id order (stable, so file order within an id) and each ground-truth region
//! can be claimed once; the first detection to reach it wins. Detections left
//! without a match are false positives and are returned so they can be fed
//! back as bootstrap negatives.
use crate::types::Region;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationOptions {
    pub tolerance_px: i64,
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        Self { tolerance_px: 40 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationReport {
    pub true_positives: usize,
    pub false_positives: usize,
    pub matched_ground_truth: usize,
    pub total_ground_truth: usize,
    pub recall: Option<f64>,
    pub precision: Option<f64>,
    pub f1: Option<f64>,
    #[serde(skip)]
    pub false_positive_regions: Vec<Region>,
}

fn ratio(num: usize, den: usize) -> Option<f64> {
    (den > 0).then(|| num as f64 / den as f64)
}

fn f1_score(precision: Option<f64>, recall: Option<f64>) -> Option<f64> {
    let (p, r) = (precision?, recall?);
    (p + r > 0.0).then(|| 2.0 * p * r / (p + r))
}

pub fn evaluate(
    ground_truth: &[Region],
    detections: &[Region],
    options: &EvaluationOptions,
) -> EvaluationReport {
    let mut ordered: Vec<&Region> = detections.iter().collect();
    ordered.sort_by_key(|r| r.id);

    let tolerance = options.tolerance_px.max(0).unsigned_abs();
    let mut claimed = vec![false; ground_truth.len()];
    let mut true_positives = 0;
    let mut false_positive_regions = Vec::new();

    for det in ordered {
        let hit = ground_truth.iter().enumerate().position(|(i, gt)| {
            !claimed[i] && gt.id == det.id && det.x0.abs_diff(gt.x0) <= tolerance
        });
        match hit {
            Some(i) => {
                claimed[i] = true;
                true_positives += 1;
            }
            None => false_positive_regions.push(*det),
        }
    }

    let matched_ground_truth = claimed.iter().filter(|&&c| c).count();
    let total_ground_truth = ground_truth.len();
    let false_positives = false_positive_regions.len();
    let recall = ratio(matched_ground_truth, total_ground_truth);
    let precision = ratio(true_positives, true_positives + false_positives);
    let f1 = f1_score(precision, recall);

    debug!(
        "evaluate: {} detections, {} ground truth, tp={} fp={}",
        detections.len(),
        total_ground_truth,
        true_positives,
        false_positives
    );

    EvaluationReport {
        true_positives,
        false_positives,
        matched_ground_truth,
        total_ground_truth,
        recall,
        precision,
        f1,
        false_positive_regions,
    }
}

impl EvaluationReport {
    /// Human-readable summary; undefined ratios print as `-`.
    pub fn summary(&self) -> String {
        fn fmt(v: Option<f64>) -> String {
            v.map(|v| format!("{:.3}", v))
                .unwrap_or_else(|| "-".to_string())
        }
        format!(
            "recall {} ({}/{}), precision {} ({} tp, {} fp), F1 {}",
            fmt(self.recall),
            self.matched_ground_truth,
            self.total_ground_truth,
            fmt(self.precision),
            self.true_positives,
            self.false_positives,
            fmt(self.f1)
        )
    }
}
