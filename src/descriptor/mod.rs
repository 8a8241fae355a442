//! Block descriptor: per-cell orientation histograms concatenated in
//! row-major cell order, optionally lifted through a kernel feature map.
//!
//! Cells step by the configured cell size from the region origin. The last
//! cell in each row/column is clamped to the region boundary rather than
//! padded, so a region of `w × h` pixels yields
//! `ceil(w / cw) · ceil(h / ch)` cells.

mod histogram;
pub mod kernel_map;
pub mod options;

pub use kernel_map::KernelMapOptions;
pub use options::{CellSize, DescriptorOptions};

use crate::gradient::OrientationMap;
use crate::types::{FeatureVector, PixelRect};
use histogram::CellHistogram;

#[derive(Clone, Debug)]
pub struct DescriptorBuilder {
    bins: usize,
    options: DescriptorOptions,
}

impl DescriptorBuilder {
    pub fn new(bins: usize, options: DescriptorOptions) -> Self {
        assert!(bins > 0, "descriptor requires at least one orientation bin");
        assert!(
            options.cell.width > 0 && options.cell.height > 0,
            "cell size must be positive, got {:?}",
            options.cell
        );
        Self { bins, options }
    }

    pub fn options(&self) -> &DescriptorOptions {
        &self.options
    }

    /// Number of cells covering a `width × height` region.
    pub fn cell_count(&self, width: usize, height: usize) -> usize {
        width.div_ceil(self.options.cell.width) * height.div_ceil(self.options.cell.height)
    }

    /// Length of the descriptor of a `width × height` region.
    pub fn descriptor_len(&self, width: usize, height: usize) -> usize {
        let raw = self.cell_count(width, height) * self.bins;
        match &self.options.expansion {
            Some(map) => raw * map.expansion(),
            None => raw,
        }
    }

    /// Builds the descriptor of `rect`. The rectangle must lie inside `map`
    /// and the map must have been quantized with the same bin count.
    pub fn describe(&self, map: &OrientationMap, rect: PixelRect) -> FeatureVector {
        assert_eq!(
            map.bins(),
            self.bins,
            "orientation map has {} bins, descriptor expects {}",
            map.bins(),
            self.bins
        );
        assert!(
            rect.x0 <= rect.x1
                && rect.y0 <= rect.y1
                && rect.x1 <= map.width()
                && rect.y1 <= map.height(),
            "region {:?} outside {}x{} orientation map",
            rect,
            map.width(),
            map.height()
        );

        let expected = self.descriptor_len(rect.width(), rect.height());
        let mut out = Vec::with_capacity(expected);
        let mut hist = CellHistogram::new(self.bins);
        let cell = self.options.cell;

        for cy in (rect.y0..rect.y1).step_by(cell.height) {
            let cy1 = (cy + cell.height).min(rect.y1);
            for cx in (rect.x0..rect.x1).step_by(cell.width) {
                let cx1 = (cx + cell.width).min(rect.x1);
                hist.clear();
                hist.accumulate_cell(map, cx, cy, cx1, cy1);
                match &self.options.expansion {
                    Some(kernel) => {
                        for &count in hist.counts() {
                            kernel.lift(count as f64, &mut out);
                        }
                    }
                    None => out.extend(hist.counts().iter().map(|&c| c as f64)),
                }
            }
        }

        assert_eq!(
            out.len(),
            expected,
            "descriptor length mismatch for region {:?}",
            rect
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient::{orientation_map_luma, GradientKernel, GradientOptions, Smoothing};
    use crate::image::ImageF32;

    fn gradient_options() -> GradientOptions {
        GradientOptions {
            bins: 16,
            kernel: GradientKernel::Centered,
            smoothing: Smoothing::None,
        }
    }

    fn textured_map(width: usize, height: usize) -> OrientationMap {
        let mut luma = ImageF32::new(width, height);
        for y in 0..height {
            for x in 0..width {
                luma.set(x, y, ((x * 13 + y * 7) % 97) as f32 * 2.5);
            }
        }
        orientation_map_luma(&luma, &gradient_options())
    }

    fn raw_options() -> DescriptorOptions {
        DescriptorOptions {
            cell: CellSize {
                width: 10,
                height: 10,
            },
            expansion: None,
        }
    }

    #[test]
    fn length_matches_for_every_region_size() {
        let map = textured_map(120, 60);
        for options in [raw_options(), DescriptorOptions::default()] {
            let builder = DescriptorBuilder::new(16, options);
            for (w, h) in [(80, 60), (10, 10), (33, 17), (1, 1), (120, 59)] {
                let v = builder.describe(&map, PixelRect::new(0, 0, w, h));
                assert_eq!(v.len(), builder.descriptor_len(w, h), "region {w}x{h}");
            }
        }
    }

    #[test]
    fn pedestrian_window_has_2560_raw_features() {
        let builder = DescriptorBuilder::new(16, raw_options());
        assert_eq!(builder.descriptor_len(80, 200), 2560);
        let expanded = DescriptorBuilder::new(16, DescriptorOptions::default());
        assert_eq!(expanded.descriptor_len(80, 200), 2560 * 6);
    }

    #[test]
    fn partial_cells_are_clamped_not_padded() {
        let map = textured_map(25, 12);
        let builder = DescriptorBuilder::new(16, raw_options());
        let v = builder.describe(&map, PixelRect::new(0, 0, 25, 12));
        // 3 x 2 cells; the last column is 5 px and the last row 2 px wide.
        assert_eq!(v.len(), 6 * 16);
        let cell_sums: Vec<f64> = v.chunks(16).map(|c| c.iter().sum()).collect();
        assert_eq!(cell_sums, vec![100.0, 100.0, 50.0, 20.0, 20.0, 10.0]);
    }

    #[test]
    fn cells_are_row_major() {
        // Flat left half, vertical edge in the right half of a 20x20 region.
        let mut luma = ImageF32::new(20, 20);
        for y in 0..20 {
            for x in 15..20 {
                luma.set(x, y, 200.0);
            }
        }
        let map = orientation_map_luma(&luma, &gradient_options());
        let builder = DescriptorBuilder::new(16, raw_options());
        let v = builder.describe(&map, PixelRect::new(0, 0, 20, 20));
        let flat_cell = {
            let mut c = vec![0.0; 16];
            c[0] = 100.0;
            c
        };
        // Cells 0 and 2 are the left column (flat), 1 and 3 contain the edge.
        assert_eq!(&v[0..16], flat_cell.as_slice());
        assert_eq!(&v[32..48], flat_cell.as_slice());
        assert_ne!(&v[16..32], flat_cell.as_slice());
        assert_eq!(&v[16..32], &v[48..64]);
    }

    #[test]
    fn same_region_yields_same_vector() {
        let map = textured_map(90, 40);
        let builder = DescriptorBuilder::new(16, DescriptorOptions::default());
        let rect = PixelRect::new(7, 3, 87, 40);
        assert_eq!(builder.describe(&map, rect), builder.describe(&map, rect));
    }

    #[test]
    #[should_panic]
    fn region_outside_map_is_a_defect() {
        let map = textured_map(30, 30);
        let builder = DescriptorBuilder::new(16, raw_options());
        let _ = builder.describe(&map, PixelRect::new(10, 0, 40, 30));
    }
}
