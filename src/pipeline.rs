//! Top-level operations behind the command-line tool.
//!
//! - [`learn`]: mine a training set from a directory and fit a model.
//! - [`classify`]: run a detector over every image of a directory.
//! - [`bootstrap`]: learn, classify the training images, then retrain with
//!   the false positives added as negatives.
//! - [`detect_one`]: detect on a single image file.
//! - [`evaluate_files`]: score a detection table against ground truth.
//!
//! Each operation returns its results without writing anything, so a
//! failure never leaves partial output behind.
use crate::classifier::Classifier;
use crate::config::DetectorConfig;
use crate::dataset::{list_images, read_descriptions, DatasetBuilder, TrainingSet};
use crate::detector::PedestrianDetector;
use crate::diagnostics::DetectionReport;
use crate::error::{Error, Result};
use crate::evaluation::{evaluate, EvaluationOptions, EvaluationReport};
use crate::image::io::load_rgb_image;
use crate::types::Region;
use log::{info, warn};
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;

/// Model fitted by [`learn`] together with the data it was trained on.
pub struct Learned<M> {
    pub model: M,
    pub training_set: TrainingSet,
}

pub fn learn<C: Classifier>(
    config: &DetectorConfig,
    classifier: &C,
    dir: &Path,
    ground_truth: &[Region],
) -> Result<Learned<C::Model>> {
    train_with_bootstrap(config, classifier, dir, ground_truth, &[])
}

fn train_with_bootstrap<C: Classifier>(
    config: &DetectorConfig,
    classifier: &C,
    dir: &Path,
    ground_truth: &[Region],
    bootstrap: &[Region],
) -> Result<Learned<C::Model>> {
    config.validate()?;
    let training_set =
        DatasetBuilder::new(config).build_with_bootstrap(dir, ground_truth, bootstrap)?;
    if training_set.samples.is_empty() {
        return Err(Error::EmptyTrainingSet);
    }
    let start = Instant::now();
    let model = classifier.train(&training_set.samples)?;
    info!(
        "trained on {} samples in {:.1} ms",
        training_set.samples.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(Learned {
        model,
        training_set,
    })
}

/// Detections for every image in `dir`, as regions in image id order.
///
/// Images that cannot be decoded or do not fit the window are skipped with
/// a warning; any other failure aborts.
pub fn classify<C>(detector: &PedestrianDetector<C>, dir: &Path) -> Result<Vec<Region>>
where
    C: Classifier + Sync,
    C::Model: Sync,
{
    let start = Instant::now();
    let entries = list_images(dir, &detector.config().mining.extensions)?;
    let per_image: Vec<Vec<Region>> = entries
        .par_iter()
        .map(|entry| {
            let report = load_rgb_image(&entry.path).and_then(|img| detector.process(&img));
            skip_data_error(entry.id, report.map(|r| r.regions(entry.id)))
        })
        .collect::<Result<_>>()?;
    let regions: Vec<Region> = per_image.into_iter().flatten().collect();
    info!(
        "classified {} images: {} detections in {:.1} ms",
        entries.len(),
        regions.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(regions)
}

/// Downgrades a per-image data error to an empty result.
fn skip_data_error(id: u64, result: Result<Vec<Region>>) -> Result<Vec<Region>> {
    match result {
        Err(err) if err.is_skippable() => {
            warn!("skipping image {id}: {err}");
            Ok(Vec::new())
        }
        other => other,
    }
}

/// Outcome of a bootstrap round.
pub struct Bootstrapped<M> {
    /// Model retrained with the false positives as extra negatives.
    pub model: M,
    /// Evaluation of the first model on its own training images.
    pub initial: EvaluationReport,
    pub training_set: TrainingSet,
}

pub fn bootstrap<C>(
    config: &DetectorConfig,
    classifier: C,
    dir: &Path,
    ground_truth: &[Region],
) -> Result<Bootstrapped<C::Model>>
where
    C: Classifier + Sync,
    C::Model: Sync,
{
    let first = learn(config, &classifier, dir, ground_truth)?;
    let detector = PedestrianDetector::new(config.clone(), classifier, first.model)?;
    let detections = classify(&detector, dir)?;
    let initial = evaluate(ground_truth, &detections, &config.evaluation);
    info!(
        "bootstrap: first model {}; retraining with {} false positives",
        initial.summary(),
        initial.false_positive_regions.len()
    );
    let retrained = train_with_bootstrap(
        config,
        detector.classifier(),
        dir,
        ground_truth,
        &initial.false_positive_regions,
    )?;
    Ok(Bootstrapped {
        model: retrained.model,
        initial,
        training_set: retrained.training_set,
    })
}

pub fn detect_one<C: Classifier>(
    detector: &PedestrianDetector<C>,
    image_path: &Path,
) -> Result<DetectionReport> {
    let image = load_rgb_image(image_path)?;
    detector.process(&image)
}

pub fn evaluate_files(
    ground_truth: &Path,
    detections: &Path,
    options: &EvaluationOptions,
) -> Result<EvaluationReport> {
    let gt = read_descriptions(ground_truth)?;
    let dets = read_descriptions(detections)?;
    Ok(evaluate(&gt, &dets, options))
}
