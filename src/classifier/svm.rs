//! Linear SVM trained by dual coordinate descent.
//!
//! Solves the L2-regularised, L2-loss (squared hinge) two-class problem
//!
//! ```text
//! min_w  ½‖w‖² + C Σ max(0, 1 − yᵢ w·xᵢ)²
//! ```
//!
//! through its dual. Each sweep visits every sample once and updates its
//! dual variable in closed form:
//!
//! - `G = yᵢ w·xᵢ − 1 + Dᵢᵢ αᵢ` with `Dᵢᵢ = 1 / (2C)`
//! - projected gradient `PG = min(G, 0)` while `αᵢ = 0`, otherwise `G`
//! - `αᵢ ← max(αᵢ − G / Qᵢᵢ, 0)` with `Qᵢᵢ = xᵢ·xᵢ + Dᵢᵢ`
//!
//! Training stops once the spread of projected gradients over a sweep drops
//! below `eps`. The intercept is learned as the weight of an extra constant
//! feature of value `bias` (disabled when `bias <= 0`).
use super::Classifier;
use crate::error::{Error, Result};
use crate::image::io::{read_json_file, write_json_file};
use crate::types::{Label, LabeledSample};
use log::{debug, warn};
use nalgebra::{DVector, DVectorView};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvmParams {
    /// Penalty on squared hinge loss.
    pub c: f64,
    /// Stopping tolerance on the projected-gradient spread.
    pub eps: f64,
    pub max_iter: usize,
    /// Value of the constant feature carrying the intercept; `<= 0` fits
    /// through the origin.
    pub bias: f64,
}

impl Default for SvmParams {
    fn default() -> Self {
        Self {
            c: 1.0,
            eps: 1e-4,
            max_iter: 1000,
            bias: 1.0,
        }
    }
}

/// Trained hyperplane: `score(x) = weights · x + bias`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub weights: DVector<f64>,
    pub bias: f64,
}

impl LinearModel {
    pub fn dimension(&self) -> usize {
        self.weights.len()
    }

    pub fn decision_value(&self, features: &[f64]) -> f64 {
        assert_eq!(
            features.len(),
            self.weights.len(),
            "feature vector has {} entries, model expects {}",
            features.len(),
            self.weights.len()
        );
        self.weights
            .dot(&DVectorView::from_slice(features, features.len()))
            + self.bias
    }
}

impl SvmParams {
    /// Checks that the solver can run with these parameters.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !(self.c.is_finite() && self.c > 0.0) {
            return Err(format!("svm.c must be positive, got {}", self.c));
        }
        if !(self.eps.is_finite() && self.eps > 0.0) {
            return Err(format!("svm.eps must be positive, got {}", self.eps));
        }
        if !self.bias.is_finite() {
            return Err(format!("svm.bias must be finite, got {}", self.bias));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct LinearSvm {
    pub params: SvmParams,
}

impl LinearSvm {
    pub fn new(params: SvmParams) -> Self {
        Self { params }
    }
}

/// Outcome of a solver run, kept for logging and tests.
#[derive(Clone, Copy, Debug)]
struct SolveStats {
    sweeps: usize,
    converged: bool,
}

fn validate(samples: &[LabeledSample]) -> Result<usize> {
    let first = samples.first().ok_or(Error::EmptyTrainingSet)?;
    let dim = first.features.len();
    if dim == 0 {
        return Err(Error::Classifier("samples have no features".into()));
    }
    if let Some((i, s)) = samples
        .iter()
        .enumerate()
        .find(|(_, s)| s.features.len() != dim)
    {
        return Err(Error::Classifier(format!(
            "sample {i} has {} features, expected {dim}",
            s.features.len()
        )));
    }
    let positives = samples
        .iter()
        .filter(|s| s.label == Label::Positive)
        .count();
    if positives == 0 || positives == samples.len() {
        return Err(Error::Classifier(format!(
            "training needs both classes, got {positives} positive and {} negative samples",
            samples.len() - positives
        )));
    }
    Ok(dim)
}

fn solve(samples: &[LabeledSample], dim: usize, params: &SvmParams) -> (LinearModel, SolveStats) {
    let bias = if params.bias > 0.0 { params.bias } else { 0.0 };
    let diag = 0.5 / params.c;

    let xs: Vec<DVectorView<'_, f64>> = samples
        .iter()
        .map(|s| DVectorView::from_slice(&s.features, dim))
        .collect();
    let qd: Vec<f64> = xs.iter().map(|x| x.norm_squared() + bias * bias + diag).collect();

    let mut w = DVector::<f64>::zeros(dim);
    let mut w_bias = 0.0;
    let mut alpha = vec![0.0; samples.len()];

    let mut stats = SolveStats {
        sweeps: 0,
        converged: false,
    };
    while stats.sweeps < params.max_iter {
        stats.sweeps += 1;
        let mut pg_max = f64::NEG_INFINITY;
        let mut pg_min = f64::INFINITY;

        for (i, sample) in samples.iter().enumerate() {
            let y = sample.label.sign();
            let g = y * (w.dot(&xs[i]) + w_bias * bias) - 1.0 + diag * alpha[i];
            let pg = if alpha[i] == 0.0 { g.min(0.0) } else { g };
            pg_max = pg_max.max(pg);
            pg_min = pg_min.min(pg);

            if pg.abs() > 1e-12 {
                let old = alpha[i];
                alpha[i] = (old - g / qd[i]).max(0.0);
                let d = (alpha[i] - old) * y;
                w.axpy(d, &xs[i], 1.0);
                w_bias += d * bias;
            }
        }

        if pg_max - pg_min < params.eps {
            stats.converged = true;
            break;
        }
    }

    (
        LinearModel {
            weights: w,
            bias: w_bias * bias,
        },
        stats,
    )
}

impl Classifier for LinearSvm {
    type Model = LinearModel;

    fn train(&self, samples: &[LabeledSample]) -> Result<LinearModel> {
        self.params.validate().map_err(Error::Classifier)?;
        let dim = validate(samples)?;
        let start = Instant::now();
        let (model, stats) = solve(samples, dim, &self.params);
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        if stats.converged {
            debug!(
                "LinearSvm: {} samples x {} features converged after {} sweeps in {:.1} ms",
                samples.len(),
                dim,
                stats.sweeps,
                elapsed_ms
            );
        } else {
            warn!(
                "LinearSvm: reached max_iter={} without meeting eps={} ({} samples, {:.1} ms)",
                self.params.max_iter,
                self.params.eps,
                samples.len(),
                elapsed_ms
            );
        }
        Ok(model)
    }

    fn score(&self, model: &LinearModel, features: &[f64]) -> f64 {
        model.decision_value(features)
    }

    fn save(&self, model: &LinearModel, path: &Path) -> Result<()> {
        write_json_file(path, model)
    }

    fn load(&self, path: &Path) -> Result<LinearModel> {
        read_json_file(path)
    }

    fn dimension(&self, model: &LinearModel) -> Option<usize> {
        Some(model.dimension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable_set() -> Vec<LabeledSample> {
        let mut samples = Vec::new();
        for i in 0..10 {
            let t = i as f64 * 0.1;
            samples.push(LabeledSample::positive(vec![2.0 + t, 1.0 - t]));
            samples.push(LabeledSample::negative(vec![-2.0 - t, -1.0 + t]));
        }
        samples
    }

    #[test]
    fn separates_two_clusters() {
        let svm = LinearSvm::default();
        let samples = separable_set();
        let model = svm.train(&samples).expect("train");
        for s in &samples {
            let score = svm.score(&model, &s.features);
            assert!(
                score * s.label.sign() > 0.0,
                "sample {:?} scored {score}",
                s.features
            );
        }
    }

    #[test]
    fn converges_on_separable_data() {
        let samples = separable_set();
        let params = SvmParams::default();
        let (_, stats) = solve(&samples, 2, &params);
        assert!(stats.converged, "stopped after {} sweeps", stats.sweeps);
        assert!(stats.sweeps < params.max_iter);
    }

    #[test]
    fn learns_an_intercept() {
        // Classes split at x = 5 along a single feature.
        let mut samples = Vec::new();
        for i in 0..5 {
            samples.push(LabeledSample::positive(vec![6.0 + i as f64]));
            samples.push(LabeledSample::negative(vec![4.0 - i as f64]));
        }
        let svm = LinearSvm::new(SvmParams {
            c: 10.0,
            max_iter: 10_000,
            ..SvmParams::default()
        });
        let model = svm.train(&samples).expect("train");
        assert!(model.bias < 0.0, "bias {}", model.bias);
        assert!(svm.score(&model, &[5.5]) > svm.score(&model, &[4.5]));
        assert!(svm.score(&model, &[6.0]) > 0.0);
        assert!(svm.score(&model, &[4.0]) < 0.0);
    }

    #[test]
    fn zero_bias_fits_through_origin() {
        let svm = LinearSvm::new(SvmParams {
            bias: 0.0,
            ..SvmParams::default()
        });
        let model = svm.train(&separable_set()).expect("train");
        assert_eq!(model.bias, 0.0);
        assert_eq!(svm.score(&model, &[0.0, 0.0]), 0.0);
    }

    #[test]
    fn rejects_degenerate_sets() {
        let svm = LinearSvm::default();
        assert!(matches!(svm.train(&[]), Err(Error::EmptyTrainingSet)));

        let one_class = vec![
            LabeledSample::positive(vec![1.0, 2.0]),
            LabeledSample::positive(vec![2.0, 1.0]),
        ];
        assert!(matches!(svm.train(&one_class), Err(Error::Classifier(_))));

        let ragged = vec![
            LabeledSample::positive(vec![1.0, 2.0]),
            LabeledSample::negative(vec![2.0]),
        ];
        assert!(matches!(svm.train(&ragged), Err(Error::Classifier(_))));
    }

    #[test]
    fn rejects_non_positive_penalty_and_tolerance() {
        for params in [
            SvmParams {
                c: 0.0,
                ..SvmParams::default()
            },
            SvmParams {
                eps: 0.0,
                ..SvmParams::default()
            },
            SvmParams {
                c: f64::NAN,
                ..SvmParams::default()
            },
        ] {
            let err = LinearSvm::new(params).train(&separable_set()).unwrap_err();
            assert!(matches!(err, Error::Classifier(_)), "{params:?}: {err:?}");
        }
    }

    #[test]
    fn iteration_cap_still_returns_a_model() {
        let svm = LinearSvm::new(SvmParams {
            max_iter: 1,
            ..SvmParams::default()
        });
        let model = svm.train(&separable_set()).expect("train");
        assert_eq!(model.dimension(), 2);
    }

    #[test]
    fn model_survives_json_roundtrip() {
        let svm = LinearSvm::default();
        let model = svm.train(&separable_set()).expect("train");
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("model.json");
        svm.save(&model, &path).expect("save");
        let loaded = svm.load(&path).expect("load");
        assert_eq!(loaded, model);
        assert_eq!(svm.dimension(&loaded), Some(2));
    }

    #[test]
    fn corrupt_model_file_is_a_model_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("model.json");
        std::fs::write(&path, "{ not json").expect("write");
        let err = LinearSvm::default().load(&path).unwrap_err();
        assert!(matches!(err, Error::Model { .. }));
    }

    #[test]
    #[should_panic]
    fn scoring_wrong_length_is_a_defect() {
        let model = LinearModel {
            weights: DVector::from_vec(vec![1.0, 2.0]),
            bias: 0.0,
        };
        let _ = model.decision_value(&[1.0]);
    }
}
