mod common;

use common::synthetic_image::{pedestrian_scene, save_scene};
use hog_detector::classifier::{Classifier, LinearSvm};
use hog_detector::descriptor::DescriptorOptions;
use hog_detector::gradient::{orientation_map, GradientOptions, Smoothing};
use hog_detector::{DetectorConfig, PedestrianDetector, Region};

fn config() -> DetectorConfig {
    DetectorConfig {
        gradient: GradientOptions {
            smoothing: Smoothing::None,
            ..GradientOptions::default()
        },
        descriptor: DescriptorOptions {
            expansion: None,
            ..DescriptorOptions::default()
        },
        ..DetectorConfig::default()
    }
}

fn train_and_detect_finds_the_figure(config: DetectorConfig) {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().expect("tempdir");
    let scene = pedestrian_scene(320, 200, 120, 160);
    save_scene(dir.path(), 1, &scene);
    let gt = vec![Region::new(1, 100, 0, 180, 200)];

    let svm = LinearSvm::new(config.svm);
    let learned = hog_detector::pipeline::learn(&config, &svm, dir.path(), &gt).expect("learn");
    assert!(learned.training_set.positives >= 1);
    assert!(learned.training_set.negatives >= 1);
    assert_eq!(svm.dimension(&learned.model), Some(config.num_features()));

    let detector = PedestrianDetector::new(config, svm, learned.model).expect("detector");
    let map = orientation_map(&scene, &detector.config().gradient);
    let candidates = detector.scan(&map).expect("scan");
    assert!(
        candidates.iter().any(|c| c.x.abs_diff(100) <= 40),
        "no candidate near x=100: {candidates:?}"
    );

    let detections = detector.suppress(&candidates);
    let near: Vec<_> = detections
        .iter()
        .filter(|d| d.x.abs_diff(100) <= 40)
        .collect();
    assert_eq!(near.len(), 1, "detections: {detections:?}");

    let report = detector.process(&scene).expect("process");
    assert_eq!(report.detections, detections);
}

#[test]
fn single_image_train_and_detect_finds_the_figure() {
    train_and_detect_finds_the_figure(config());
}

#[test]
fn default_pipeline_with_smoothing_and_expansion_finds_the_figure() {
    train_and_detect_finds_the_figure(DetectorConfig::default());
}

#[test]
fn descriptor_length_matches_configuration() {
    let scene = pedestrian_scene(320, 200, 120, 160);
    for expansion in [None, DescriptorOptions::default().expansion] {
        let config = DetectorConfig {
            descriptor: DescriptorOptions {
                expansion,
                ..DescriptorOptions::default()
            },
            ..DetectorConfig::default()
        };
        let map = orientation_map(&scene, &config.gradient);
        let builder = config.descriptor_builder();
        let v = builder.describe(
            &map,
            hog_detector::types::PixelRect::window_at(40, config.window),
        );
        assert_eq!(v.len(), config.num_features());
    }
}
