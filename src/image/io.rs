//! I/O helpers for RGB images and JSON.
//!
//! - `load_rgb_image`: read a PNG/JPEG/BMP into an owned RGB8 buffer.
//! - `write_json_file`: pretty-print a serializable value to disk.
//! - `read_json_file`: parse a JSON document from disk.
use crate::error::{Error, Result};
use image::{ImageError, RgbImage};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk and convert to 8-bit RGB.
///
/// A file that cannot be read is an [`Error::Io`]; one that cannot be
/// decoded is an [`Error::Image`].
pub fn load_rgb_image(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|source| match source {
        ImageError::IoError(e) => Error::io(path, e),
        source => Error::Image {
            path: path.to_path_buf(),
            source,
        },
    })?;
    Ok(img.into_rgb8())
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|source| Error::Model {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|e| Error::io(path, e))
}

pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    serde_json::from_str(&data).map_err(|source| Error::Model {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_image_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_rgb_image(&dir.path().join("1.png")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }), "{err:?}");
    }

    #[test]
    fn garbage_image_is_a_decode_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("1.png");
        fs::write(&path, b"not a png").expect("write");
        let err = load_rgb_image(&path).unwrap_err();
        assert!(matches!(err, Error::Image { .. }), "{err:?}");
    }
}
