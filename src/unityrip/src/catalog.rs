//! Asset catalog construction
//!
//! Converts the flat list of extracted files into the typed records the
//! frontend renders: classified type, display glyph, human-readable size,
//! originating bundle. Field names match the manifest JSON shape.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::extract::ExtractedFile;
use crate::file_utils::{format_bytes, lowercase_ext};

/// One cataloged asset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
    pub id: String,
    /// Display name: filename minus extension.
    pub name: String,
    pub filename: String,
    pub ext: String,
    #[serde(rename = "type")]
    pub asset_type: String,
    pub emoji: String,
    pub size: String,
    pub size_bytes: u64,
    pub bundle: String,
    /// Path relative to the extraction root.
    pub relative_path: String,
    pub raw: bool,
}

/// Map a lowercase extension to its semantic type and display glyph.
pub fn classify(ext: &str) -> (&'static str, &'static str) {
    match ext {
        "png" | "jpg" | "jpeg" | "webp" | "bmp" | "tga" | "gif" | "psd" => ("texture", "🖼"),
        "wav" | "mp3" | "ogg" => ("audio", "🔊"),
        "obj" | "fbx" | "mesh" => ("mesh", "🧊"),
        "txt" | "json" | "xml" | "yaml" | "yml" | "csv" | "ini" | "cfg" | "bytes" => ("text", "📄"),
        "cs" | "js" | "lua" => ("script", "📜"),
        "ttf" | "otf" => ("font", "🔤"),
        "shader" => ("shader", "✨"),
        "mat" => ("material", "🎨"),
        "anim" => ("anim", "🎬"),
        "prefab" => ("prefab", "🧩"),
        _ => ("unknown", "❓"),
    }
}

/// Build one asset record per extracted file.
///
/// Ids are fresh UUIDs, unique within the job. Size is statted at catalog
/// time; a file that vanished since extraction records size 0 rather than
/// failing the run.
pub fn build_catalog(entries: &[ExtractedFile], extract_root: &Path) -> Vec<AssetRecord> {
    entries
        .iter()
        .map(|entry| {
            let ext = lowercase_ext(&entry.path);
            let (asset_type, emoji) = classify(&ext);

            let filename = entry
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let name = entry
                .path
                .file_stem()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| filename.clone());

            let size_bytes = std::fs::metadata(&entry.path).map(|m| m.len()).unwrap_or(0);

            let relative_path = entry
                .path
                .strip_prefix(extract_root)
                .unwrap_or(&entry.path)
                .to_string_lossy()
                .into_owned();

            AssetRecord {
                id: uuid::Uuid::new_v4().to_string(),
                name,
                filename,
                ext,
                asset_type: asset_type.to_string(),
                emoji: emoji.to_string(),
                size: format_bytes(size_bytes),
                size_bytes,
                bundle: entry.bundle.clone(),
                relative_path,
                raw: entry.raw,
            }
        })
        .collect()
}
