use std::path::Path;

use walkdir::WalkDir;

use crate::Result;

/// Splits `list` on `delim`, dropping empty pieces.
pub fn split(list: &str, delim: char) -> Vec<String> {
    list.split(delim)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Concatenates `times` copies of `items`.
pub fn repeat(items: &[String], times: usize) -> Vec<String> {
    let mut out = Vec::with_capacity(items.len() * times);
    for _ in 0..times {
        out.extend_from_slice(items);
    }
    out
}

/// Recursively lists files under `dir`, sorted by name within each directory.
///
/// `extensions` filters by file extension, ignoring case and a leading dot.
/// An empty filter accepts every file.
pub fn list_dir(dir: impl AsRef<Path>, extensions: &[String]) -> Result<Vec<String>> {
    let wanted: Vec<String> = extensions
        .iter()
        .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
        .collect();

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = wanted.is_empty()
            || entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| wanted.contains(&e.to_ascii_lowercase()));
        if matches {
            files.push(entry.path().display().to_string());
        }
    }
    Ok(files)
}
