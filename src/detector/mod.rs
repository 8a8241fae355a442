//! Sliding-window pedestrian detector.
//!
//! Overview
//! - Quantizes gradient orientations once per image.
//! - Slides a fixed window horizontally across the full image height and
//!   scores each position's descriptor with a trained classifier.
//! - Keeps windows whose score exceeds the threshold and collapses every
//!   cluster of overlapping hits into one detection by greedy non-maximum
//!   suppression.
//!
//! Modules
//! - [`options`] – scan step and decision threshold.
//! - [`scanner`] – window positions and per-window scoring.
//! - [`nms`] – greedy suppression over window positions.
//! - `pedestrian` – the [`PedestrianDetector`] tying the stages together.

pub mod nms;
pub mod options;
mod pedestrian;
pub mod scanner;

pub use nms::suppress_non_max;
pub use options::ScanOptions;
pub use pedestrian::PedestrianDetector;
pub use scanner::{check_window_fits, SlidingWindowScanner};
