//! Unity data directory location
//!
//! Android Unity builds keep their serialized data under a handful of
//! conventional paths inside the APK. Checking those first keeps the common
//! case to a few directory reads; the full recursive search only runs when
//! every convention misses (heavily repacked or obfuscated builds).

use std::path::{Path, PathBuf};

/// Conventional locations of Unity data, relative to the decompiled root,
/// in priority order. The empty entry is the root itself.
const CANDIDATE_DIRS: &[&str] = &["assets/bin/Data", "assets/bin/data", "assets", ""];

/// True when `path` names a file that only Unity builds ship.
fn is_unity_signature(path: &Path) -> bool {
    let ext = crate::file_utils::lowercase_ext(path);
    if ext == "assets" || ext == "bundle" {
        return true;
    }

    matches!(
        path.file_name().and_then(|n| n.to_str()),
        Some("globalgamemanagers") | Some("sharedassets0.assets")
    )
}

/// True when `dir` has at least one immediate child file with a Unity
/// signature. Unreadable directories count as unsigned.
fn has_unity_signature(dir: &Path) -> bool {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return false;
    };

    entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .any(|p| p.is_file() && is_unity_signature(&p))
}

/// Find the directory under `root` most likely holding Unity serialized
/// data, or `None` when the tree shows no Unity signature at all.
///
/// Conventional candidate paths are tried in order; only when all of them
/// miss does a full recursive search for any `.assets` file run.
pub fn locate_unity_data(root: &Path) -> Option<PathBuf> {
    for candidate in CANDIDATE_DIRS {
        let dir = if candidate.is_empty() {
            root.to_path_buf()
        } else {
            root.join(candidate)
        };

        if dir.is_dir() && has_unity_signature(&dir) {
            return Some(dir);
        }
    }

    // Conventions all missed: take the first directory anywhere in the tree
    // that directly contains a .assets file.
    walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .find(|e| crate::file_utils::lowercase_ext(e.path()) == "assets")
        .and_then(|e| e.path().parent().map(Path::to_path_buf))
}
