//! Unity bundle scanning
//!
//! Enumerates the files in a directory tree that look like Unity serialized
//! data, by extension or by the well-known base names Unity assigns to its
//! split data files.

use std::path::{Path, PathBuf};

/// Recursion cap for the bundle scan; bounds pathological trees.
const MAX_SCAN_DEPTH: usize = 6;

/// Extensions Unity uses for serialized data files.
const BUNDLE_EXTENSIONS: &[&str] = &["assets", "bundle", "resource", "ress"];

/// Base-name prefixes of Unity's conventional split data files
/// (`globalgamemanagers.assets`, `sharedassets12.assets`, `level3`, ...).
const BUNDLE_PREFIXES: &[&str] = &["globalgamemanagers", "sharedassets", "level", "resources"];

/// True when `path` qualifies as a Unity bundle by extension or prefix.
pub fn is_bundle_file(path: &Path) -> bool {
    let ext = crate::file_utils::lowercase_ext(path);
    if BUNDLE_EXTENSIONS.contains(&ext.as_str()) {
        return true;
    }

    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|stem| {
            let stem = stem.to_ascii_lowercase();
            BUNDLE_PREFIXES.iter().any(|p| stem.starts_with(p))
        })
        .unwrap_or(false)
}

/// Recursively enumerate bundle files under `dir`, in traversal order.
///
/// Depth is capped at [`MAX_SCAN_DEPTH`]; subtrees that cannot be read are
/// skipped rather than aborting the scan.
pub fn scan_bundles(dir: &Path) -> Vec<PathBuf> {
    walkdir::WalkDir::new(dir)
        .max_depth(MAX_SCAN_DEPTH)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| is_bundle_file(e.path()))
        .map(|e| e.into_path())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_scan_matches_extensions_and_prefixes() {
        let temp_dir = tempfile::tempdir().unwrap();
        for name in ["sharedassets0.assets", "level0", "foo.bundle", "notes.txt"] {
            fs::write(temp_dir.path().join(name), b"x").unwrap();
        }

        let mut found: Vec<String> = scan_bundles(temp_dir.path())
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(String::from))
            .collect();
        found.sort();

        assert_eq!(found, vec!["foo.bundle", "level0", "sharedassets0.assets"]);
    }

    #[test]
    fn test_resource_and_ress_extensions() {
        assert!(is_bundle_file(Path::new("audio.resource")));
        assert!(is_bundle_file(Path::new("sharedassets0.assets.resS")));
        assert!(!is_bundle_file(Path::new("classes.dex")));
    }

    #[test]
    fn test_prefix_match_is_case_insensitive() {
        assert!(is_bundle_file(Path::new("GlobalGameManagers")));
        assert!(is_bundle_file(Path::new("Resources.arsc")));
    }

    #[test]
    fn test_scan_respects_depth_cap() {
        let temp_dir = tempfile::tempdir().unwrap();
        let deep = temp_dir.path().join("1/2/3/4/5/6/7");
        fs::create_dir_all(&deep).unwrap();
        fs::write(deep.join("level9"), b"x").unwrap();
        fs::write(temp_dir.path().join("level0"), b"x").unwrap();

        let found = scan_bundles(temp_dir.path());
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_scan_missing_dir_is_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let found = scan_bundles(&temp_dir.path().join("absent"));
        assert!(found.is_empty());
    }
}
