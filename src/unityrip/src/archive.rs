//! Generic archive extraction
//!
//! An APK is a ZIP archive; when no decompiler is installed the pipeline
//! falls back to unpacking every entry verbatim.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;

/// Errors from reading or unpacking an APK as a plain archive.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("malformed archive: {0}")]
    Malformed(#[from] zip::result::ZipError),

    #[error("i/o error while extracting: {0}")]
    Io(#[from] io::Error),
}

/// Extract every entry of the archive at `apk_path` into `out_dir`.
///
/// Entries with names that would escape `out_dir` are skipped. Returns the
/// number of files written.
pub fn extract_all(apk_path: &Path, out_dir: &Path) -> Result<usize, ArchiveError> {
    let file = File::open(apk_path).map_err(|source| ArchiveError::Open {
        path: apk_path.display().to_string(),
        source,
    })?;
    let mut archive = zip::ZipArchive::new(BufReader::new(file))?;

    fs::create_dir_all(out_dir)?;

    let mut written = 0;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;

        // zip-slip guard: enclosed_name rejects absolute and ../ names
        let out_path = match entry.enclosed_name() {
            Some(rel) => out_dir.join(rel),
            None => continue,
        };

        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
        } else {
            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut out_file = File::create(&out_path)?;
            io::copy(&mut entry, &mut out_file)?;
            written += 1;
        }
    }

    Ok(written)
}
