//! Detector configuration.
//!
//! [`DetectorConfig`] gathers every tunable of the pipeline. All sections
//! carry serde defaults, so a JSON config only needs the fields it changes:
//!
//! ```json
//! { "scan": { "threshold": 0.5 }, "gradient": { "smoothing": "none" } }
//! ```
use crate::classifier::SvmParams;
use crate::dataset::{MiningOptions, UnlabeledImagePolicy};
use crate::descriptor::{DescriptorBuilder, DescriptorOptions};
use crate::detector::ScanOptions;
use crate::error::{Error, Result};
use crate::evaluation::EvaluationOptions;
use crate::gradient::GradientOptions;
use crate::types::WindowSize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub window: WindowSize,
    pub gradient: GradientOptions,
    pub descriptor: DescriptorOptions,
    pub scan: ScanOptions,
    pub mining: MiningOptions,
    pub evaluation: EvaluationOptions,
    pub svm: SvmParams,
}

impl DetectorConfig {
    pub fn descriptor_builder(&self) -> DescriptorBuilder {
        DescriptorBuilder::new(self.gradient.bins, self.descriptor)
    }

    /// Feature length of one detector window.
    pub fn num_features(&self) -> usize {
        self.descriptor_builder()
            .descriptor_len(self.window.width, self.window.height)
    }

    /// Rejects values the pipeline cannot run with. Every entry point that
    /// accepts a configuration calls this before building any stage.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| Err(Error::InvalidConfig(reason));
        let bins = self.gradient.bins;
        if bins == 0 || bins > usize::from(u16::MAX) {
            return invalid(format!("gradient.bins must be in 1..={}, got {bins}", u16::MAX));
        }
        let cell = self.descriptor.cell;
        if cell.width == 0 || cell.height == 0 {
            return invalid(format!(
                "descriptor.cell must be positive, got {}x{}",
                cell.width, cell.height
            ));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return invalid(format!(
                "window must be positive, got {}x{}",
                self.window.width, self.window.height
            ));
        }
        if let Some(kernel) = &self.descriptor.expansion {
            if !(kernel.step.is_finite() && kernel.step > 0.0) {
                return invalid(format!("descriptor.expansion.step must be positive, got {}", kernel.step));
            }
        }
        if self.scan.step == 0 {
            return invalid("scan.step must be positive".to_string());
        }
        if let UnlabeledImagePolicy::SampleNegatives { stride: 0 } = self.mining.unlabeled {
            return invalid("mining.unlabeled stride must be positive".to_string());
        }
        self.svm.validate().map_err(Error::InvalidConfig)
    }
}

/// Reads and validates a JSON configuration.
pub fn load_config(path: &Path) -> Result<DetectorConfig> {
    let data = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let config: DetectorConfig = serde_json::from_str(&data).map_err(|source| Error::Config {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient::Smoothing;

    #[test]
    fn defaults_give_expanded_pedestrian_window() {
        let config = DetectorConfig::default();
        assert_eq!(config.window, WindowSize { width: 80, height: 200 });
        assert_eq!(config.gradient.bins, 16);
        assert_eq!(config.num_features(), 8 * 20 * 16 * 6);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config: DetectorConfig = serde_json::from_str(
            r#"{"scan": {"threshold": 0.5}, "gradient": {"smoothing": "none"}, "descriptor": {"expansion": null}}"#,
        )
        .expect("parse");
        assert_eq!(config.scan.threshold, 0.5);
        assert_eq!(config.scan.step, 10);
        assert_eq!(config.gradient.smoothing, Smoothing::None);
        assert_eq!(config.num_features(), 2560);
        assert_eq!(config.evaluation.tolerance_px, 40);
    }

    #[test]
    fn load_config_reports_parse_errors() {
        let dir = tempfile::tempdir().expect("tempdir");
        let good = dir.path().join("good.json");
        fs::write(&good, r#"{"window": {"width": 40, "height": 100}}"#).expect("write");
        let config = load_config(&good).expect("load");
        assert_eq!(config.window.width, 40);

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "[1, 2").expect("write");
        assert!(matches!(load_config(&bad), Err(Error::Config { .. })));
        assert!(matches!(
            load_config(&dir.path().join("missing.json")),
            Err(Error::Io { .. })
        ));
    }

    #[test]
    fn load_config_rejects_unusable_values() {
        let dir = tempfile::tempdir().expect("tempdir");
        for (name, json) in [
            ("cell_width", r#"{"descriptor": {"cell": {"width": 0, "height": 10}}}"#),
            ("cell_height", r#"{"descriptor": {"cell": {"width": 10, "height": 0}}}"#),
            ("bins", r#"{"gradient": {"bins": 0}}"#),
            ("window", r#"{"window": {"width": 80, "height": 0}}"#),
            ("svm_c", r#"{"svm": {"c": 0.0}}"#),
            ("svm_eps", r#"{"svm": {"eps": -1.0}}"#),
            ("scan_step", r#"{"scan": {"step": 0}}"#),
        ] {
            let path = dir.path().join(format!("{name}.json"));
            fs::write(&path, json).expect("write");
            let err = load_config(&path).err();
            assert!(
                matches!(err, Some(Error::InvalidConfig(_))),
                "{name}: expected InvalidConfig, got {err:?}"
            );
        }
    }

    #[test]
    fn default_config_is_valid() {
        DetectorConfig::default().validate().expect("valid");
    }
}
