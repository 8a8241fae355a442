use super::kernel_map::KernelMapOptions;
use serde::{Deserialize, Serialize};

/// Width and height of one histogram cell in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSize {
    pub width: usize,
    pub height: usize,
}

impl Default for CellSize {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
        }
    }
}

/// Options controlling descriptor assembly.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescriptorOptions {
    pub cell: CellSize,
    /// Nonlinear expansion of every histogram count; `None` keeps raw counts.
    pub expansion: Option<KernelMapOptions>,
}

impl Default for DescriptorOptions {
    fn default() -> Self {
        Self {
            cell: CellSize::default(),
            expansion: Some(KernelMapOptions::default()),
        }
    }
}
