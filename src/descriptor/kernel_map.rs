//! Closed-form feature map approximating an additive homogeneous kernel.
//!
//! Each raw count `z` is lifted into `2 (2K + 1)` values sampled from the
//! kernel's spectrum at frequencies `λ = k · step`, `k ∈ [-K, K]`:
//! `v = sqrt(z / cosh(π λ))`, emitting `cos(-λ ln z) · v` and
//! `sin(-λ ln z) · v`. A linear classifier on the lifted vector then behaves
//! like the kernel classifier on the raw histogram.
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelMapOptions {
    /// Approximation order `K`; frequencies run over `[-K, K]`.
    pub order: usize,
    /// Sampling period of the spectrum.
    pub step: f64,
}

impl Default for KernelMapOptions {
    fn default() -> Self {
        Self {
            order: 1,
            step: 0.35,
        }
    }
}

impl KernelMapOptions {
    /// Number of output values produced per input value.
    pub fn expansion(&self) -> usize {
        2 * (2 * self.order + 1)
    }

    /// Appends the lifted representation of `z` to `out`.
    pub fn lift(&self, z: f64, out: &mut Vec<f64>) {
        let order = self.order as i64;
        if z <= 0.0 {
            out.extend(std::iter::repeat(0.0).take(self.expansion()));
            return;
        }
        let ln_z = z.ln();
        for k in -order..=order {
            let lambda = k as f64 * self.step;
            let v = (z / (PI * lambda).cosh()).sqrt();
            let phase = -lambda * ln_z;
            out.push(phase.cos() * v);
            out.push(phase.sin() * v);
        }
    }
}
