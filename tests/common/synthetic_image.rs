use image::{Rgb, RgbImage};
use std::path::Path;

const BACKGROUND: u8 = 90;
const FIGURE: u8 = 210;
const BAND: u8 = 40;

/// Flat background with an upright figure: a bright full-height bar spanning
/// `[figure_x0, figure_x1)` crossed by dark horizontal bands every 8 rows.
pub fn pedestrian_scene(width: u32, height: u32, figure_x0: u32, figure_x1: u32) -> RgbImage {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(
        figure_x0 < figure_x1 && figure_x1 <= width,
        "figure must lie inside the image"
    );
    RgbImage::from_fn(width, height, |x, y| {
        let v = if (figure_x0..figure_x1).contains(&x) {
            if y % 8 < 4 {
                FIGURE
            } else {
                BAND
            }
        } else {
            BACKGROUND
        };
        Rgb([v, v, v])
    })
}

/// Saves `image` as `<dir>/<id>.png`.
pub fn save_scene(dir: &Path, id: u64, image: &RgbImage) {
    image
        .save(dir.join(format!("{id}.png")))
        .expect("write synthetic image");
}
