//! Per-pixel brightness gradients quantized into orientation bins.
//!
//! - Differentiates the luminance plane with a 1-pixel finite difference in
//!   `x` and `y`, clamping coordinates at the border (replicate).
//! - Maps `atan2(gy, gx) + π` into [0, 2π) and splits it into `bins`
//!   equal-width sectors (signed orientation, 2π-periodic).
//! - A zero gradient carries no orientation and is assigned [`FLAT_BIN`].
//!
//! Complexity: O(W·H); memory: one `u16` per pixel.
use super::options::{GradientKernel, GradientOptions};
use crate::angle::{quantize, signed_orientation};
use crate::image::{luminance, Buffer2, ImageF32, ImageView};
use image::RgbImage;
use log::debug;
use std::time::Instant;

/// Bin assigned to pixels whose gradient has zero magnitude.
pub const FLAT_BIN: u16 = 0;

/// Per-pixel orientation bin ids in `[0, bins)`.
#[derive(Clone, Debug, PartialEq)]
pub struct OrientationMap {
    bins: usize,
    map: Buffer2<u16>,
}

impl OrientationMap {
    pub fn width(&self) -> usize {
        self.map.w
    }

    pub fn height(&self) -> usize {
        self.map.h
    }

    /// Number of orientation bins the map was quantized into.
    pub fn bins(&self) -> usize {
        self.bins
    }

    #[inline]
    pub fn bin(&self, x: usize, y: usize) -> u16 {
        self.map.get(x, y)
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[u16] {
        self.map.row(y)
    }

    pub fn as_buffer(&self) -> &Buffer2<u16> {
        &self.map
    }
}

/// Computes the orientation map of an RGB image.
pub fn orientation_map(image: &RgbImage, options: &GradientOptions) -> OrientationMap {
    let start = Instant::now();
    let luma = luminance(image);
    let map = orientation_map_luma(&luma, options);
    debug!(
        "orientation_map {}x{} bins={} smoothing={:?} elapsed_ms={:.3}",
        map.width(),
        map.height(),
        map.bins(),
        options.smoothing,
        start.elapsed().as_secs_f64() * 1000.0
    );
    map
}

/// Computes the orientation map of a luminance plane.
pub fn orientation_map_luma(luma: &ImageF32, options: &GradientOptions) -> OrientationMap {
    assert!(
        options.bins > 0 && options.bins <= u16::MAX as usize,
        "bin count {} out of range",
        options.bins
    );
    let smoothed = options.smoothing.apply(luma);
    let l = smoothed.as_ref().unwrap_or(luma);

    let (w, h) = (l.w, l.h);
    let mut map = Buffer2::<u16>::new(w, h);
    for y in 0..h {
        let yi = y as isize;
        for x in 0..w {
            let xi = x as isize;
            let (gx, gy) = match options.kernel {
                GradientKernel::Forward => (
                    l.get_clamped(xi + 1, yi) - l.get_clamped(xi, yi),
                    l.get_clamped(xi, yi + 1) - l.get_clamped(xi, yi),
                ),
                GradientKernel::Symmetric => (
                    l.get_clamped(xi + 1, yi) - l.get_clamped(xi - 1, yi),
                    l.get_clamped(xi, yi + 1) - l.get_clamped(xi, yi - 1),
                ),
                GradientKernel::Centered => (
                    0.5 * (l.get_clamped(xi + 1, yi) - l.get_clamped(xi - 1, yi)),
                    0.5 * (l.get_clamped(xi, yi + 1) - l.get_clamped(xi, yi - 1)),
                ),
            };
            map.set(x, y, quantize_gradient(gx as f64, gy as f64, options.bins));
        }
    }

    OrientationMap {
        bins: options.bins,
        map,
    }
}

#[inline]
fn quantize_gradient(gx: f64, gy: f64, bins: usize) -> u16 {
    if gx == 0.0 && gy == 0.0 {
        return FLAT_BIN;
    }
    quantize(signed_orientation(gy, gx), bins) as u16
}
