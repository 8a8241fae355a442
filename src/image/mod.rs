pub mod buffer;
pub mod color;
pub mod io;
pub mod traits;

pub use self::buffer::{Buffer2, ImageF32};
pub use self::color::{brightness, luminance, LUMA_WEIGHTS};
pub use self::traits::{ImageView, ImageViewMut};
