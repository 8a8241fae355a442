//! Crate-wide error type.
//!
//! I/O, model and classifier failures abort the current top-level operation.
//! Per-image data problems (undecodable file, wrong height) are reported
//! with these variants too, but the dataset and classification loops log
//! and skip them instead of propagating.
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("failed to decode image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("malformed description table {} (record {record}): {reason}", path.display())]
    Description {
        path: PathBuf,
        record: usize,
        reason: String,
    },

    #[error("image {width}x{height} does not fit a {window_width}x{window_height} window")]
    WindowMismatch {
        width: usize,
        height: usize,
        window_width: usize,
        window_height: usize,
    },

    #[error("classifier error: {0}")]
    Classifier(String),

    #[error("model file {}: {source}", path.display())]
    Model {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("training set is empty")]
    EmptyTrainingSet,
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Per-image data problems that loops over a directory log and skip.
    pub fn is_skippable(&self) -> bool {
        matches!(self, Error::Image { .. } | Error::WindowMismatch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_data_errors_are_skippable() {
        let mismatch = Error::WindowMismatch {
            width: 10,
            height: 10,
            window_width: 80,
            window_height: 200,
        };
        assert!(mismatch.is_skippable());
        let io = Error::io("1.png", std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        assert!(!io.is_skippable());
        assert!(!Error::EmptyTrainingSet.is_skippable());
    }
}
