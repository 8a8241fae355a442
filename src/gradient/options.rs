use super::smooth::Smoothing;
use serde::{Deserialize, Serialize};

/// Finite-difference scheme used for the brightness gradient.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientKernel {
    /// `b(i+1) - b(i)`.
    Forward,
    /// `b(i+1) - b(i-1)`.
    Symmetric,
    /// `(b(i+1) - b(i-1)) / 2`.
    #[default]
    Centered,
}

/// Options controlling the orientation map.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientOptions {
    /// Number of orientation bins over [0, 2π).
    pub bins: usize,
    pub kernel: GradientKernel,
    /// Blur applied to the luminance plane before differentiating.
    pub smoothing: Smoothing,
}

impl Default for GradientOptions {
    fn default() -> Self {
        Self {
            bins: 16,
            kernel: GradientKernel::Centered,
            smoothing: Smoothing::Gaussian5,
        }
    }
}
