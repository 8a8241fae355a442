//! RGB → luminance conversion.
use super::buffer::ImageF32;
use super::traits::ImageViewMut;
use image::{Rgb, RgbImage};

/// Luminance weights for the red, green and blue channels (sum to 1).
pub const LUMA_WEIGHTS: [f32; 3] = [0.2125, 0.7154, 0.0721];

#[inline]
pub fn brightness(p: &Rgb<u8>) -> f32 {
    LUMA_WEIGHTS[0] * p[0] as f32 + LUMA_WEIGHTS[1] * p[1] as f32 + LUMA_WEIGHTS[2] * p[2] as f32
}

/// Convert an RGB image into a luminance plane on the 0–255 scale.
pub fn luminance(image: &RgbImage) -> ImageF32 {
    let w = image.width() as usize;
    let h = image.height() as usize;
    let mut out = ImageF32::new(w, h);
    for y in 0..h {
        let dst = out.row_mut(y);
        for (x, px) in dst.iter_mut().enumerate() {
            *px = brightness(image.get_pixel(x as u32, y as u32));
        }
    }
    out
}
