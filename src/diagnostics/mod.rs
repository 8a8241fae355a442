//! Diagnostics returned alongside detections: per-stage timings and the
//! serialisable [`DetectionReport`].

pub mod report;
pub mod timing;

pub use report::{DetectionReport, InputDescriptor};
pub use timing::{StageTiming, TimingBreakdown};
