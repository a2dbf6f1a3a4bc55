//! Catalog-everything tier
//!
//! Last resort when the scan found no bundles at all: walk the decompiled
//! tree and copy out every file whose extension is worth showing — images,
//! audio, meshes, text and config, fonts, scripts and shaders — preserving
//! relative paths. Files at the tree root land in a synthetic `root` bucket.

use std::path::Path;

use super::{ExtractError, ExtractedFile};

/// Recursion cap for the catalog-everything walk.
const MAX_WALK_DEPTH: usize = 8;

/// Extensions worth cataloging when no Unity bundles exist.
const INTERESTING_EXTENSIONS: &[&str] = &[
    // images
    "png", "jpg", "jpeg", "webp", "bmp", "tga", "gif", "psd",
    // audio
    "wav", "mp3", "ogg",
    // meshes
    "obj", "fbx", "mesh",
    // text and config
    "txt", "json", "xml", "yaml", "yml", "csv", "ini", "cfg", "bytes",
    // fonts
    "ttf", "otf",
    // scripts and shaders
    "cs", "js", "lua", "shader", "mat", "anim", "prefab",
];

pub(super) fn extract(data_dir: &Path, out_dir: &Path) -> Result<Vec<ExtractedFile>, ExtractError> {
    let candidates =
        crate::file_utils::collect_files_with_extension(data_dir, INTERESTING_EXTENSIONS, MAX_WALK_DEPTH);

    let mut extracted = Vec::new();
    for path in candidates {
        let rel = match path.strip_prefix(data_dir) {
            Ok(rel) => rel,
            Err(_) => continue,
        };

        let dest = out_dir.join(rel);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        if let Err(e) = std::fs::copy(&path, &dest) {
            log::warn!("failed to copy {}, skipping: {}", path.display(), e);
            continue;
        }

        let bucket = rel
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| "root".to_string());

        extracted.push(ExtractedFile {
            path: dest,
            bundle: bucket,
            raw: false,
        });
    }

    Ok(extracted)
}
