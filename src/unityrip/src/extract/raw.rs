//! Raw tier: verbatim bundle copies
//!
//! Used when bundles were found but no unpacking tool is installed. Each
//! bundle is copied unmodified into a folder named after it, yielding
//! exactly one raw-flagged entry per bundle.

use std::path::{Path, PathBuf};

use super::{bundle_name, ExtractError, ExtractedFile};

pub(super) fn extract(
    bundles: &[PathBuf],
    out_dir: &Path,
) -> Result<Vec<ExtractedFile>, ExtractError> {
    let mut extracted = Vec::new();

    for bundle in bundles {
        let name = bundle_name(bundle);
        let bundle_out = out_dir.join(&name);
        std::fs::create_dir_all(&bundle_out)?;

        let file_name = bundle
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| name.clone().into());
        let dest = bundle_out.join(file_name);

        if let Err(e) = std::fs::copy(bundle, &dest) {
            log::warn!("failed to copy {}, skipping: {}", bundle.display(), e);
            continue;
        }

        extracted.push(ExtractedFile {
            path: dest,
            bundle: name,
            raw: true,
        });
    }

    Ok(extracted)
}
