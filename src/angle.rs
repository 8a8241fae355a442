//! Orientation utilities for the gradient stage.

use std::f64::consts::{PI, TAU};

/// Pull-in applied to an orientation that lands on (or beyond) 2π.
pub const ORIENTATION_EPS: f64 = 1e-8;

/// Maps `atan2(gy, gx)` to a signed orientation in [0, 2π) by adding π.
#[inline]
pub fn signed_orientation(gy: f64, gx: f64) -> f64 {
    let mut angle = gy.atan2(gx) + PI;
    if angle >= TAU {
        angle = TAU - ORIENTATION_EPS;
    }
    angle
}

/// Quantizes an orientation in [0, 2π) into one of `bins` equal-width bins.
#[inline]
pub fn quantize(angle: f64, bins: usize) -> usize {
    let bin = (angle * bins as f64 / TAU).floor() as usize;
    assert!(
        bin < bins,
        "orientation {angle} quantized to bin {bin} outside [0, {bins})"
    );
    bin
}
