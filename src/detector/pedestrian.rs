//! Single-image detection: orientation map, window scan, suppression.
//!
//! Typical usage:
//! ```no_run
//! use hog_detector::classifier::{Classifier, LinearSvm};
//! use hog_detector::{DetectorConfig, PedestrianDetector};
//! use std::path::Path;
//!
//! # fn example(img: image::RgbImage) -> hog_detector::Result<()> {
//! let config = DetectorConfig::default();
//! let svm = LinearSvm::new(config.svm);
//! let model = svm.load(Path::new("model.json"))?;
//! let detector = PedestrianDetector::new(config, svm, model)?;
//! for det in detector.process(&img)?.detections {
//!     println!("x={} score={:.3}", det.x, det.score);
//! }
//! # Ok(())
//! # }
//! ```
use super::nms::suppress_non_max;
use super::scanner::{check_window_fits, SlidingWindowScanner};
use crate::classifier::Classifier;
use crate::config::DetectorConfig;
use crate::descriptor::DescriptorBuilder;
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{DetectionReport, InputDescriptor, TimingBreakdown};
use crate::error::{Error, Result};
use crate::gradient::{orientation_map, OrientationMap};
use crate::types::{Candidate, Detection};
use image::RgbImage;
use log::debug;
use std::time::Instant;

pub struct PedestrianDetector<C: Classifier> {
    config: DetectorConfig,
    descriptor: DescriptorBuilder,
    classifier: C,
    model: C::Model,
}

impl<C: Classifier> PedestrianDetector<C> {
    /// Fails when `config` is invalid or the model was trained for a different
    /// feature length than `config` produces.
    pub fn new(config: DetectorConfig, classifier: C, model: C::Model) -> Result<Self> {
        config.validate()?;
        let expected = config.num_features();
        if let Some(dim) = classifier.dimension(&model) {
            if dim != expected {
                return Err(Error::Classifier(format!(
                    "model expects {dim} features but the configuration yields {expected}"
                )));
            }
        }
        Ok(Self {
            descriptor: config.descriptor_builder(),
            config,
            classifier,
            model,
        })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    pub fn model(&self) -> &C::Model {
        &self.model
    }

    fn scanner(&self) -> SlidingWindowScanner<'_, C> {
        SlidingWindowScanner {
            descriptor: &self.descriptor,
            classifier: &self.classifier,
            model: &self.model,
            window: self.config.window,
            options: self.config.scan,
        }
    }

    /// Candidate windows of a precomputed orientation map.
    pub fn scan(&self, map: &OrientationMap) -> Result<Vec<Candidate>> {
        self.scanner().scan(map)
    }

    pub fn suppress(&self, candidates: &[Candidate]) -> Vec<Detection> {
        suppress_non_max(
            candidates,
            self.config.window.width,
            self.config.scan.threshold,
        )
    }

    pub fn detect(&self, image: &RgbImage) -> Result<Vec<Detection>> {
        Ok(self.process(image)?.detections)
    }

    /// Runs the full single-image pipeline and reports per-stage timings.
    pub fn process(&self, image: &RgbImage) -> Result<DetectionReport> {
        let total_start = Instant::now();
        let (width, height) = (image.width() as usize, image.height() as usize);
        check_window_fits(width, height, self.config.window)?;

        let mut timings = TimingBreakdown::default();
        let map = timings.time("orientation", || orientation_map(image, &self.config.gradient));
        let candidates = timings.time("scan", || self.scan(&map))?;
        let detections = timings.time("suppress", || self.suppress(&candidates));
        timings.total_ms = elapsed_ms(total_start);

        let windows_scanned = self.scanner().positions(width).count();
        debug!(
            "PedestrianDetector::process {}x{}: {} windows, {} candidates, {} detections in {:.1} ms",
            width,
            height,
            windows_scanned,
            candidates.len(),
            detections.len(),
            timings.total_ms
        );

        Ok(DetectionReport {
            input: InputDescriptor {
                width,
                height,
                windows_scanned,
            },
            window: self.config.window,
            candidates,
            detections,
            timings,
        })
    }
}
