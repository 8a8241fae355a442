//! Gradient orientation stage: luminance, optional smoothing, and per-pixel
//! orientation bins.
//!
//! - `smooth`: separable 5-tap blur (horizontal then vertical, replicate
//!   borders).
//! - `grad`: finite-difference gradients and signed orientation
//!   quantization into an [`OrientationMap`].
//!
//! The map is computed once per image and shared by every window drawn from
//! it.

pub mod grad;
pub mod options;
pub mod smooth;

pub use grad::{orientation_map, orientation_map_luma, OrientationMap, FLAT_BIN};
pub use options::{GradientKernel, GradientOptions};
pub use smooth::{separable_blur, SeparableFilter, Smoothing, GAUSSIAN_5TAP};
