use super::TimingBreakdown;
use crate::types::{Candidate, Detection, Region, WindowSize};
use serde::Serialize;

/// Result of running the detector on one image.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    pub input: InputDescriptor,
    pub window: WindowSize,
    /// Windows that passed the threshold, in scan order.
    pub candidates: Vec<Candidate>,
    /// Survivors of non-maximum suppression, strongest first.
    pub detections: Vec<Detection>,
    pub timings: TimingBreakdown,
}

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub windows_scanned: usize,
}

impl DetectionReport {
    /// Detections as description-table regions of image `id`.
    pub fn regions(&self, id: u64) -> Vec<Region> {
        self.detections
            .iter()
            .map(|d| d.to_region(id, self.window))
            .collect()
    }
}
