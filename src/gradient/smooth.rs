//! Separable blur applied before gradient computation.
//!
//! Runs the filter horizontally into a scratch plane, then vertically into
//! the output. Borders replicate the edge pixel.
use crate::image::buffer::clamp_index;
use crate::image::{ImageF32, ImageView, ImageViewMut};
use serde::{Deserialize, Serialize};

/// Normalised 5-tap Gaussian `[1, 4, 6, 4, 1] / 16`.
pub const GAUSSIAN_5TAP: [f32; 5] = [0.0625, 0.25, 0.375, 0.25, 0.0625];

/// A 1D kernel applied along both axes.
pub trait SeparableFilter {
    /// Taps in left-to-right order. Expected to be symmetric and to sum to 1.
    fn taps(&self) -> &[f32];
}

/// Pre-smoothing choice exposed through the configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Smoothing {
    /// Use the raw luminance plane.
    None,
    /// Blur with [`GAUSSIAN_5TAP`] before differentiating.
    #[default]
    Gaussian5,
}

impl SeparableFilter for [f32] {
    #[inline]
    fn taps(&self) -> &[f32] {
        self
    }
}

impl Smoothing {
    /// Apply the configured smoothing, or return `None` when disabled.
    pub fn apply(self, src: &ImageF32) -> Option<ImageF32> {
        match self {
            Smoothing::None => None,
            Smoothing::Gaussian5 => Some(separable_blur(src, &GAUSSIAN_5TAP[..])),
        }
    }
}

pub fn separable_blur<F: SeparableFilter + ?Sized>(src: &ImageF32, filter: &F) -> ImageF32 {
    let taps = filter.taps();
    assert!(!taps.is_empty(), "filter must provide at least one tap");
    if src.is_empty() {
        return src.clone();
    }
    let radius = (taps.len() / 2) as isize;

    let mut horiz = ImageF32::new(src.width(), src.height());
    for y in 0..src.height() {
        filter_row(src.row(y), horiz.row_mut(y), taps, radius);
    }

    let mut out = ImageF32::new(src.width(), src.height());
    for y in 0..src.height() {
        let dst = out.row_mut(y);
        for (k, &tap) in taps.iter().enumerate() {
            let sy = clamp_index(y as isize + k as isize - radius, src.height());
            let row = horiz.row(sy);
            for (d, &s) in dst.iter_mut().zip(row) {
                *d += tap * s;
            }
        }
    }
    out
}

fn filter_row(row: &[f32], out: &mut [f32], taps: &[f32], radius: isize) {
    for (x, dst_px) in out.iter_mut().enumerate() {
        let mut acc = 0.0f32;
        for (k, &tap) in taps.iter().enumerate() {
            let idx = clamp_index(x as isize + k as isize - radius, row.len());
            acc += tap * row[idx];
        }
        *dst_px = acc;
    }
}
