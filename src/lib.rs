#![doc = include_str!("../README.md")]

// Public modules
pub mod classifier;
pub mod config;
pub mod dataset;
pub mod detector;
pub mod diagnostics;
pub mod evaluation;
pub mod image;
pub mod pipeline;
pub mod types;

// Building blocks used by the stages above.
pub mod angle;
pub mod descriptor;
pub mod error;
pub mod gradient;

// --- High-level re-exports -------------------------------------------------

pub use crate::config::{load_config, DetectorConfig};
pub use crate::detector::PedestrianDetector;
pub use crate::diagnostics::DetectionReport;
pub use crate::error::{Error, Result};
pub use crate::evaluation::EvaluationReport;
pub use crate::types::{Candidate, Detection, LabeledSample, Region, WindowSize};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use hog_detector::prelude::*;
///
/// # fn main() -> hog_detector::Result<()> {
/// let config = DetectorConfig::default();
/// let svm = LinearSvm::new(config.svm);
/// let model = svm.load(std::path::Path::new("model.json"))?;
/// let detector = PedestrianDetector::new(config, svm, model)?;
/// let img = image::RgbImage::new(640, 200);
/// let report = detector.process(&img)?;
/// println!("{} detections in {:.1} ms", report.detections.len(), report.timings.total_ms);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::classifier::{Classifier, LinearSvm};
    pub use crate::{DetectionReport, DetectorConfig, PedestrianDetector, Region};
}
