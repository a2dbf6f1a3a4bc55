//! Rich tier: per-bundle AssetRipper invocation
//!
//! Each bundle gets its own output folder and its own tool invocation with
//! an individual timeout. One bundle failing — bad data, tool crash,
//! timeout — is logged and skipped; it never aborts the remaining bundles.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::ToolConfig;
use crate::process::ToolCommand;

use super::{bundle_name, ExtractError, ExtractedFile};

/// Per-bundle unpacking timeout.
const UNPACK_TIMEOUT: Duration = Duration::from_secs(60);

pub(super) fn extract(
    config: &ToolConfig,
    bundles: &[PathBuf],
    out_dir: &Path,
) -> Result<Vec<ExtractedFile>, ExtractError> {
    let mut extracted = Vec::new();

    for bundle in bundles {
        let name = bundle_name(bundle);
        let bundle_out = out_dir.join(&name);
        std::fs::create_dir_all(&bundle_out)?;

        let result = ToolCommand::new(&config.asset_ripper_bin, UNPACK_TIMEOUT)
            .arg(bundle)
            .arg("-o")
            .arg(&bundle_out)
            .arg("-q")
            .run();

        match result {
            Ok(output) if output.success => {}
            Ok(output) => {
                log::warn!(
                    "AssetRipper failed on {} (exit {:?}), skipping: {}",
                    bundle.display(),
                    output.exit_code,
                    output.stderr.trim()
                );
                continue;
            }
            Err(e) => {
                log::warn!("AssetRipper error on {}, skipping: {}", bundle.display(), e);
                continue;
            }
        }

        // Collect whatever the tool wrote under this bundle's folder.
        for entry in walkdir::WalkDir::new(&bundle_out)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            extracted.push(ExtractedFile {
                path: entry.into_path(),
                bundle: name.clone(),
                raw: false,
            });
        }
    }

    Ok(extracted)
}
