//! Description tables: whitespace-separated records `id y0 x0 y1 x1`.
//!
//! Ground truth and detections share the format. Records may be spread over
//! lines arbitrarily since only the token stream matters; a trailing group of
//! fewer than five tokens is dropped. Writers emit one record per line in
//! stable id order.
use crate::error::{Error, Result};
use crate::image::io::ensure_parent_dir;
use crate::types::Region;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const FIELDS: usize = 5;

pub fn parse_descriptions(text: &str, path: &Path) -> Result<Vec<Region>> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let complete = tokens.len() / FIELDS;
    let leftover = tokens.len() % FIELDS;
    if leftover != 0 {
        warn!(
            "{}: ignoring {} trailing token(s) of an incomplete record",
            path.display(),
            leftover
        );
    }

    let mut regions = Vec::with_capacity(complete);
    for (record, chunk) in tokens.chunks_exact(FIELDS).enumerate() {
        let bad = |reason: String| Error::Description {
            path: path.to_path_buf(),
            record,
            reason,
        };
        let id: u64 = chunk[0]
            .parse()
            .map_err(|_| bad(format!("id {:?} is not a non-negative integer", chunk[0])))?;
        let mut coords = [0i64; 4];
        for (slot, tok) in coords.iter_mut().zip(&chunk[1..]) {
            *slot = tok
                .parse()
                .map_err(|_| bad(format!("coordinate {tok:?} is not an integer")))?;
        }
        let [y0, x0, y1, x1] = coords;
        if x1 <= x0 {
            return Err(bad(format!("x1 = {x1} must exceed x0 = {x0}")));
        }
        regions.push(Region::new(id, x0, y0, x1, y1));
    }
    debug!("{}: parsed {} regions", path.display(), regions.len());
    Ok(regions)
}

pub fn read_descriptions(path: &Path) -> Result<Vec<Region>> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_descriptions(&text, path)
}

pub fn format_descriptions(regions: &[Region]) -> String {
    let mut sorted: Vec<&Region> = regions.iter().collect();
    sorted.sort_by_key(|r| r.id);
    let mut out = String::new();
    for r in sorted {
        let _ = writeln!(out, "{} {} {} {} {}", r.id, r.y0, r.x0, r.y1, r.x1);
    }
    out
}

pub fn write_descriptions(path: &Path, regions: &[Region]) -> Result<()> {
    ensure_parent_dir(path)?;
    fs::write(path, format_descriptions(regions)).map_err(|e| Error::io(path, e))
}

/// Groups regions by image id, keeping file order within each id.
pub fn group_by_id(regions: &[Region]) -> BTreeMap<u64, Vec<Region>> {
    let mut map: BTreeMap<u64, Vec<Region>> = BTreeMap::new();
    for r in regions {
        map.entry(r.id).or_default().push(*r);
    }
    map
}
