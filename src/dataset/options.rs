use serde::{Deserialize, Serialize};

/// Whether a negative window is cut next to each labeled image's first
/// ground-truth region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HardNegativePolicy {
    #[default]
    Adjacent,
    Disabled,
}

/// What to do with images that have no ground-truth rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlabeledImagePolicy {
    #[default]
    Skip,
    /// Every window at `x = 0, stride, 2·stride, …` becomes a negative.
    SampleNegatives { stride: usize },
}

/// Placement chosen for the hard negative next to a ground-truth window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NegativeCrop {
    /// `[x0 + W + 1, x0 + 2W + 1)`.
    Right { x: usize },
    /// `[x0 − W − 1, x0 − 1)`.
    Left { x: usize },
    /// Neither side fits inside the image.
    NoFit,
}

impl NegativeCrop {
    /// Picks the crop beside a ground-truth window anchored at `gt_x0`,
    /// preferring the right side.
    pub fn beside(gt_x0: i64, window_width: usize, image_width: usize) -> Self {
        let (Ok(w), Ok(limit)) = (i64::try_from(window_width), i64::try_from(image_width)) else {
            return NegativeCrop::NoFit;
        };
        let fits = |x: i64| x >= 0 && x.checked_add(w).is_some_and(|end| end <= limit);

        if let Some(right) = gt_x0.checked_add(w).and_then(|x| x.checked_add(1)) {
            if fits(right) {
                return NegativeCrop::Right { x: right as usize };
            }
        }
        if let Some(left) = gt_x0.checked_sub(w).and_then(|x| x.checked_sub(1)) {
            if fits(left) {
                return NegativeCrop::Left { x: left as usize };
            }
        }
        NegativeCrop::NoFit
    }

    pub fn anchor(self) -> Option<usize> {
        match self {
            NegativeCrop::Right { x } | NegativeCrop::Left { x } => Some(x),
            NegativeCrop::NoFit => None,
        }
    }
}

/// Sample-mining settings for [`DatasetBuilder`](super::DatasetBuilder).
///
/// - `hard_negatives`: adjacent-crop policy for labeled images.
/// - `unlabeled`: handling of images without ground truth.
/// - `extensions`: accepted image file extensions (case-insensitive).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiningOptions {
    pub hard_negatives: HardNegativePolicy,
    pub unlabeled: UnlabeledImagePolicy,
    pub extensions: Vec<String>,
}

impl Default for MiningOptions {
    fn default() -> Self {
        Self {
            hard_negatives: HardNegativePolicy::Adjacent,
            unlabeled: UnlabeledImagePolicy::Skip,
            extensions: vec!["png".to_string()],
        }
    }
}
