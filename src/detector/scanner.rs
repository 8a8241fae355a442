//! Single-scale sliding-window scan.
//!
//! Windows span the full image height and slide horizontally in steps of
//! `step` while `x + window.width <= image width`. Every position is
//! described and scored; those above the threshold are kept as candidates
//! in scan order (left to right).
use super::options::ScanOptions;
use crate::classifier::Classifier;
use crate::descriptor::DescriptorBuilder;
use crate::error::{Error, Result};
use crate::gradient::OrientationMap;
use crate::types::{Candidate, PixelRect, WindowSize};

pub struct SlidingWindowScanner<'a, C: Classifier> {
    pub descriptor: &'a DescriptorBuilder,
    pub classifier: &'a C,
    pub model: &'a C::Model,
    pub window: WindowSize,
    pub options: ScanOptions,
}

impl<'a, C: Classifier> SlidingWindowScanner<'a, C> {
    /// Window anchors visited on an image `image_width` pixels wide.
    pub fn positions(&self, image_width: usize) -> impl Iterator<Item = usize> {
        let step = self.options.step.max(1);
        let width = self.window.width;
        (0..)
            .step_by(step)
            .take_while(move |x| x + width <= image_width)
    }

    /// Scores every window position and returns those above the threshold.
    pub fn scan(&self, map: &OrientationMap) -> Result<Vec<Candidate>> {
        check_window_fits(map.width(), map.height(), self.window)?;
        let mut candidates = Vec::new();
        for x in self.positions(map.width()) {
            let features = self
                .descriptor
                .describe(map, PixelRect::window_at(x, self.window));
            let score = self.classifier.score(self.model, &features);
            if score > self.options.threshold {
                candidates.push(Candidate { x, score });
            }
        }
        Ok(candidates)
    }
}

/// Windows cover the full image height, so the image must be exactly one
/// window tall and at least one window wide.
pub fn check_window_fits(width: usize, height: usize, window: WindowSize) -> Result<()> {
    if height != window.height || width < window.width {
        return Err(Error::WindowMismatch {
            width,
            height,
            window_width: window.width,
            window_height: window.height,
        });
    }
    Ok(())
}
