use crate::gradient::OrientationMap;

/// Per-cell orientation counts over `bins` sectors of [0, 2π).
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CellHistogram {
    counts: Vec<u32>,
}

impl CellHistogram {
    pub(crate) fn new(num_bins: usize) -> Self {
        assert!(num_bins > 0, "cell histogram requires at least one bin");
        CellHistogram {
            counts: vec![0; num_bins],
        }
    }

    #[inline]
    pub(crate) fn accumulate(&mut self, bin: u16) {
        self.counts[bin as usize] += 1;
    }

    /// Counts every pixel of `map` inside `[x0, x1) × [y0, y1)`.
    pub(crate) fn accumulate_cell(
        &mut self,
        map: &OrientationMap,
        x0: usize,
        y0: usize,
        x1: usize,
        y1: usize,
    ) {
        for y in y0..y1 {
            for &bin in &map.row(y)[x0..x1] {
                self.accumulate(bin);
            }
        }
    }

    pub(crate) fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub(crate) fn clear(&mut self) {
        self.counts.iter_mut().for_each(|c| *c = 0);
    }

    #[cfg(test)]
    pub(crate) fn total(&self) -> u32 {
        self.counts.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::CellHistogram;
    use crate::gradient::{orientation_map_luma, GradientKernel, GradientOptions, Smoothing};
    use crate::image::ImageF32;

    #[test]
    fn accumulate_counts_each_bin() {
        let mut hist = CellHistogram::new(4);
        hist.accumulate(0);
        hist.accumulate(3);
        hist.accumulate(3);
        assert_eq!(hist.counts(), &[1, 0, 0, 2]);
        hist.clear();
        assert_eq!(hist.total(), 0);
    }

    #[test]
    fn cell_total_equals_cell_area() {
        let mut luma = ImageF32::new(12, 9);
        for (i, v) in luma.data.iter_mut().enumerate() {
            *v = (i * 37 % 255) as f32;
        }
        let opts = GradientOptions {
            bins: 8,
            kernel: GradientKernel::Centered,
            smoothing: Smoothing::None,
        };
        let map = orientation_map_luma(&luma, &opts);
        let mut hist = CellHistogram::new(8);
        hist.accumulate_cell(&map, 2, 1, 7, 4);
        assert_eq!(hist.total(), 15);
    }

    #[test]
    #[should_panic]
    fn out_of_range_bin_is_a_defect() {
        let mut hist = CellHistogram::new(4);
        hist.accumulate(4);
    }
}
