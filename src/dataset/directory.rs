use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Image file whose stem is its numeric id, e.g. `42.png`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageEntry {
    pub id: u64,
    pub path: PathBuf,
}

/// Lists `<id>.<ext>` files in `dir` with an accepted extension, sorted by
/// id. Other files are ignored.
pub fn list_images(dir: &Path, extensions: &[String]) -> Result<Vec<ImageEntry>> {
    if !dir.is_dir() {
        return Err(Error::MissingDirectory(dir.to_path_buf()));
    }
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let accepted = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| extensions.iter().any(|x| x.eq_ignore_ascii_case(ext)));
        if !accepted {
            continue;
        }
        let Some(id) = path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(|s| s.parse::<u64>().ok())
        else {
            continue;
        };
        entries.push(ImageEntry { id, path });
    }
    entries.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.path.cmp(&b.path)));
    Ok(entries)
}
