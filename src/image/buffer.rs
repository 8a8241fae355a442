//! Owned row-major 2-D buffer (stride == width).
//!
//! Backs both the luminance plane (`ImageF32`) and the per-pixel orientation
//! bins. Element access is bounds-checked; `get_clamped` provides the
//! replicate-edge reads used by gradient and filter kernels.
use super::traits::{ImageView, ImageViewMut};

#[derive(Clone, Debug, PartialEq)]
pub struct Buffer2<T> {
    /// Width in elements
    pub w: usize,
    /// Height in rows
    pub h: usize,
    /// Number of elements between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<T>,
}

/// Single-channel float image, e.g. luminance on the 0–255 scale.
pub type ImageF32 = Buffer2<f32>;

impl<T: Copy + Default> Buffer2<T> {
    /// Construct a default-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![T::default(); w * h],
        }
    }
}

impl<T: Copy> Buffer2<T> {
    /// Wrap an existing row-major vector. Panics if the length does not match.
    pub fn from_vec(w: usize, h: usize, data: Vec<T>) -> Self {
        assert_eq!(
            data.len(),
            w * h,
            "buffer of {w}x{h} requires {} elements, got {}",
            w * h,
            data.len()
        );
        Self {
            w,
            h,
            stride: w,
            data,
        }
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.w && y < self.h,
            "({x}, {y}) outside {}x{} buffer",
            self.w,
            self.h
        );
        y * self.stride + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: T) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// Read with replicate-edge boundary handling; coordinates are clamped,
    /// never wrapped. Panics on an empty buffer.
    #[inline]
    pub fn get_clamped(&self, x: isize, y: isize) -> T {
        let cx = clamp_index(x, self.w);
        let cy = clamp_index(y, self.h);
        self.data[cy * self.stride + cx]
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }
}

#[inline]
pub(crate) fn clamp_index(idx: isize, upper: usize) -> usize {
    if upper == 0 {
        return 0;
    }
    if idx < 0 {
        0
    } else if (idx as usize) >= upper {
        upper - 1
    } else {
        idx as usize
    }
}

impl<T: Copy> ImageView for Buffer2<T> {
    type Pixel = T;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[T] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}

impl<T: Copy> ImageViewMut for Buffer2<T> {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [T] {
        let start = y * self.stride;
        let end = start + self.w;
        &mut self.data[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_reads_replicate_edges() {
        let buf = Buffer2::from_vec(3, 2, vec![1u8, 2, 3, 4, 5, 6]);
        assert_eq!(buf.get_clamped(-4, 0), 1);
        assert_eq!(buf.get_clamped(7, 0), 3);
        assert_eq!(buf.get_clamped(1, -1), 2);
        assert_eq!(buf.get_clamped(1, 9), 5);
        assert_eq!(buf.get_clamped(2, 1), 6);
    }

    #[test]
    #[should_panic]
    fn out_of_range_access_panics() {
        let buf: Buffer2<f32> = Buffer2::new(4, 4);
        let _ = buf.get(4, 0);
    }

    #[test]
    fn row_mut_writes_one_row() {
        let mut buf: ImageF32 = Buffer2::new(2, 3);
        buf.row_mut(1).copy_from_slice(&[7.0, 8.0]);
        assert_eq!(buf.row(1), &[7.0, 8.0]);
        assert_eq!(buf.row(0), &[0.0, 0.0]);
        assert_eq!(buf.get(1, 1), 8.0);
        assert_eq!((buf.width(), buf.height()), (2, 3));
    }
}
