//! Two-class classifier seam.
//!
//! The detector and dataset code only depend on [`Classifier`]; the bundled
//! [`LinearSvm`] is the implementation the binary uses.
pub mod svm;

pub use svm::{LinearModel, LinearSvm, SvmParams};

use crate::error::Result;
use crate::types::LabeledSample;
use std::path::Path;

pub trait Classifier {
    type Model;

    /// Fits a model on labeled samples. All samples must share one feature
    /// length and both classes must be present.
    fn train(&self, samples: &[LabeledSample]) -> Result<Self::Model>;

    /// Decision value of `features`; larger means more object-like.
    fn score(&self, model: &Self::Model, features: &[f64]) -> f64;

    fn save(&self, model: &Self::Model, path: &Path) -> Result<()>;

    fn load(&self, path: &Path) -> Result<Self::Model>;

    /// Feature length the model was trained on, when the model knows it.
    fn dimension(&self, _model: &Self::Model) -> Option<usize> {
        None
    }
}
