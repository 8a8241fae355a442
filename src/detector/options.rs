use serde::{Deserialize, Serialize};

/// Sliding-window scan parameters.
///
/// - `step`: horizontal stride between window positions in pixels.
/// - `threshold`: decision value a window must exceed to become a
///   candidate; the suppressor stops at the same level.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    pub step: usize,
    pub threshold: f64,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            step: 10,
            threshold: 0.2,
        }
    }
}
