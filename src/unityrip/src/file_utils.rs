//! File system utilities shared across pipeline stages

use std::path::{Path, PathBuf};

/// Format a byte count as a short human-readable string.
///
/// Matches the manifest format consumed by the frontend: `512 B`,
/// `3.2 KB`, `1.4 MB`.
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}

/// Collect files under `root` whose lowercase extension is in `extensions`,
/// up to `max_depth` directory levels.
///
/// Extensions should not include the dot (e.g. "png" not ".png").
/// Unreadable subtrees are skipped rather than aborting the walk.
pub fn collect_files_with_extension(
    root: &Path,
    extensions: &[&str],
    max_depth: usize,
) -> Vec<PathBuf> {
    walkdir::WalkDir::new(root)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|x| x.to_str())
                .map(|x| extensions.iter().any(|ext| x.eq_ignore_ascii_case(ext)))
                .unwrap_or(false)
        })
        .map(|e| e.into_path())
        .collect()
}

/// Lowercase extension of a path, or an empty string when there is none.
pub fn lowercase_ext(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default()
}
