//! Labeled sample mining from an image directory and a description table.
//!
//! For every image of the configured window height:
//! - each ground-truth region yields a positive window anchored at its `x0`;
//! - the first region also yields a hard negative beside it
//!   ([`NegativeCrop::beside`]) unless disabled;
//! - images without ground truth are skipped or sampled as negatives;
//! - bootstrap regions (earlier false positives) become extra negatives.
//!
//! Images are handled in parallel; the resulting samples are ordered by image
//! id, then positives, hard negative, sampled negatives, bootstrap negatives.
use super::description::group_by_id;
use super::directory::{list_images, ImageEntry};
use super::options::{HardNegativePolicy, NegativeCrop, UnlabeledImagePolicy};
use crate::config::DetectorConfig;
use crate::descriptor::DescriptorBuilder;
use crate::error::{Error, Result};
use crate::gradient::{orientation_map, OrientationMap};
use crate::image::io::load_rgb_image;
use crate::types::{LabeledSample, PixelRect, Region};
use image::RgbImage;
use log::{debug, info, warn};
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::time::Instant;

#[derive(Clone, Debug, Default)]
pub struct TrainingSet {
    pub samples: Vec<LabeledSample>,
    /// Images that contributed at least one sample.
    pub images_used: usize,
    pub positives: usize,
    pub negatives: usize,
}

impl TrainingSet {
    fn extend(&mut self, part: ImageSamples) {
        if part.samples.is_empty() {
            return;
        }
        self.images_used += 1;
        self.positives += part.positives;
        self.negatives += part.samples.len() - part.positives;
        self.samples.extend(part.samples);
    }
}

/// Samples mined from one image.
#[derive(Clone, Debug, Default)]
pub struct ImageSamples {
    pub samples: Vec<LabeledSample>,
    pub positives: usize,
}

pub struct DatasetBuilder<'a> {
    config: &'a DetectorConfig,
    descriptor: DescriptorBuilder,
}

impl<'a> DatasetBuilder<'a> {
    pub fn new(config: &'a DetectorConfig) -> Self {
        Self {
            config,
            descriptor: config.descriptor_builder(),
        }
    }

    pub fn build(&self, dir: &Path, ground_truth: &[Region]) -> Result<TrainingSet> {
        self.build_with_bootstrap(dir, ground_truth, &[])
    }

    /// Like [`build`](Self::build) with `bootstrap` regions added as
    /// negatives on their images.
    pub fn build_with_bootstrap(
        &self,
        dir: &Path,
        ground_truth: &[Region],
        bootstrap: &[Region],
    ) -> Result<TrainingSet> {
        let start = Instant::now();
        let entries = list_images(dir, &self.config.mining.extensions)?;
        let gt_by_id = group_by_id(ground_truth);
        let boot_by_id = group_by_id(bootstrap);

        let known: BTreeSet<u64> = entries.iter().map(|e| e.id).collect();
        for id in gt_by_id.keys().filter(|id| !known.contains(id)) {
            debug!("ground truth for image {id} has no image file; ignored");
        }

        let parts: Vec<Option<ImageSamples>> = entries
            .par_iter()
            .map(|entry| self.mine_entry(entry, &gt_by_id, &boot_by_id))
            .collect::<Result<_>>()?;

        let mut set = TrainingSet::default();
        for part in parts.into_iter().flatten() {
            set.extend(part);
        }
        info!(
            "dataset: {} samples ({} positive, {} negative) from {} of {} images in {:.1} ms",
            set.samples.len(),
            set.positives,
            set.negatives,
            set.images_used,
            entries.len(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(set)
    }

    fn mine_entry(
        &self,
        entry: &ImageEntry,
        gt_by_id: &BTreeMap<u64, Vec<Region>>,
        boot_by_id: &BTreeMap<u64, Vec<Region>>,
    ) -> Result<Option<ImageSamples>> {
        let gt = gt_by_id.get(&entry.id).map_or(&[][..], Vec::as_slice);
        let boot = boot_by_id.get(&entry.id).map_or(&[][..], Vec::as_slice);
        let sample_unlabeled = matches!(
            self.config.mining.unlabeled,
            UnlabeledImagePolicy::SampleNegatives { .. }
        );
        if gt.is_empty() && boot.is_empty() && !sample_unlabeled {
            debug!("image {} has no ground truth; skipped", entry.id);
            return Ok(None);
        }

        let mined = load_rgb_image(&entry.path)
            .and_then(|image| self.image_samples(entry.id, &image, gt, boot));
        match mined {
            Ok(part) => Ok(Some(part)),
            Err(err) if err.is_skippable() => {
                warn!("skipping image {}: {err}", entry.id);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Mines the samples of one decoded image. Fails only when the image
    /// height differs from the window height.
    pub fn image_samples(
        &self,
        id: u64,
        image: &RgbImage,
        ground_truth: &[Region],
        bootstrap: &[Region],
    ) -> Result<ImageSamples> {
        let window = self.config.window;
        let (width, height) = (image.width() as usize, image.height() as usize);
        if height != window.height {
            return Err(Error::WindowMismatch {
                width,
                height,
                window_width: window.width,
                window_height: window.height,
            });
        }
        let map = orientation_map(image, &self.config.gradient);

        let mut out = ImageSamples::default();
        for gt in ground_truth {
            match self.window_at(&map, gt.x0) {
                Some(features) => {
                    out.samples.push(LabeledSample::positive(features));
                    out.positives += 1;
                }
                None => warn!(
                    "image {id}: ground truth at x0={} does not fit a {}-wide window",
                    gt.x0, window.width
                ),
            }
        }

        if let Some(first) = ground_truth.first() {
            if self.config.mining.hard_negatives == HardNegativePolicy::Adjacent {
                let crop = NegativeCrop::beside(first.x0, window.width, width);
                match crop.anchor() {
                    Some(x) => {
                        let rect = PixelRect::window_at(x, window);
                        out.samples
                            .push(LabeledSample::negative(self.descriptor.describe(&map, rect)));
                    }
                    None => debug!("image {id}: {crop:?} beside x0={}", first.x0),
                }
            }
        } else if let UnlabeledImagePolicy::SampleNegatives { stride } = self.config.mining.unlabeled {
            let mut x = 0;
            while x + window.width <= width {
                let rect = PixelRect::window_at(x, window);
                out.samples
                    .push(LabeledSample::negative(self.descriptor.describe(&map, rect)));
                x += stride.max(1);
            }
        }

        for fp in bootstrap {
            match self.window_at(&map, fp.x0) {
                Some(features) => out.samples.push(LabeledSample::negative(features)),
                None => debug!("image {id}: bootstrap region at x0={} outside image", fp.x0),
            }
        }

        debug!(
            "image {id}: {} positive, {} negative samples",
            out.positives,
            out.samples.len() - out.positives
        );
        Ok(out)
    }

    fn window_at(&self, map: &OrientationMap, x0: i64) -> Option<Vec<f64>> {
        let x = usize::try_from(x0).ok()?;
        if x.checked_add(self.config.window.width)? > map.width() {
            return None;
        }
        Some(
            self.descriptor
                .describe(map, PixelRect::window_at(x, self.config.window)),
        )
    }
}
