use serde::{Deserialize, Serialize};

/// Feature vector produced by the descriptor stage.
pub type FeatureVector = Vec<f64>;

/// Fixed detector window in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: usize,
    pub height: usize,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 80,
            height: 200,
        }
    }
}

/// Half-open pixel rectangle `[x0, x1) × [y0, y1)` inside an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl PixelRect {
    pub fn new(x0: usize, y0: usize, x1: usize, y1: usize) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Full-height window of `window` width anchored at column `x`.
    pub fn window_at(x: usize, window: WindowSize) -> Self {
        Self::new(x, 0, x + window.width, window.height)
    }

    pub fn width(&self) -> usize {
        self.x1.saturating_sub(self.x0)
    }

    pub fn height(&self) -> usize {
        self.y1.saturating_sub(self.y0)
    }
}

/// Rectangle tagged with the id of the image it belongs to.
///
/// Used both for ground truth read from a description table and for the
/// detections written back to one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: u64,
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

impl Region {
    pub fn new(id: u64, x0: i64, y0: i64, x1: i64, y1: i64) -> Self {
        Self { id, x0, y0, x1, y1 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    Positive,
    Negative,
}

impl Label {
    /// Numeric class value used by the classifier: `+1` or `-1`.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Label::Positive => 1.0,
            Label::Negative => -1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabeledSample {
    pub features: FeatureVector,
    pub label: Label,
}

impl LabeledSample {
    pub fn positive(features: FeatureVector) -> Self {
        Self {
            features,
            label: Label::Positive,
        }
    }

    pub fn negative(features: FeatureVector) -> Self {
        Self {
            features,
            label: Label::Negative,
        }
    }
}

/// Window position whose score passed the decision threshold.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Candidate {
    pub x: usize,
    pub score: f64,
}

/// Surviving candidate after non-maximum suppression.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Detection {
    pub x: usize,
    pub score: f64,
}

impl Detection {
    /// Region covered by this detection on image `id`.
    pub fn to_region(&self, id: u64, window: WindowSize) -> Region {
        Region::new(
            id,
            self.x as i64,
            0,
            (self.x + window.width) as i64,
            window.height as i64,
        )
    }
}
