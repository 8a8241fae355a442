//! Training data: description tables, image directories and sample mining.
pub mod builder;
pub mod description;
pub mod directory;
pub mod options;

pub use builder::{DatasetBuilder, ImageSamples, TrainingSet};
pub use description::{
    format_descriptions, group_by_id, parse_descriptions, read_descriptions, write_descriptions,
};
pub use directory::{list_images, ImageEntry};
pub use options::{HardNegativePolicy, MiningOptions, NegativeCrop, UnlabeledImagePolicy};
