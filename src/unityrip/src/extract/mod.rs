//! Tiered asset extraction
//!
//! Three mutually exclusive strategies, ordered from richest fidelity to
//! least: AssetRipper unpacking per bundle, verbatim bundle copies, and a
//! catalog-everything walk of the decompiled tree when no bundles were
//! found at all. Selection is a pure function of tool availability and the
//! bundle count, so it can be tested without touching any tool.

mod fallback;
mod raw;
mod rich;

use std::path::{Path, PathBuf};

use crate::config::ToolConfig;

/// One file produced by an extraction tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFile {
    /// Absolute path of the written file.
    pub path: PathBuf,
    /// Name of the bundle (or synthetic bucket such as `root`) it came from.
    pub bundle: String,
    /// Content was copied verbatim rather than decoded.
    pub raw: bool,
}

/// Errors from an extraction tier. Per-bundle tool failures are logged and
/// skipped inside the tier; only filesystem failures surface here.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("i/o error during extraction: {0}")]
    Io(#[from] std::io::Error),
}

/// The extraction tier chosen for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Unpack each bundle with AssetRipper.
    Rich,
    /// Copy each bundle verbatim into a per-bundle folder.
    Raw,
    /// No bundles found: copy everything interesting from the tree.
    Fallback,
}

impl Strategy {
    pub fn describe(self) -> &'static str {
        match self {
            Strategy::Rich => "unpacking bundles with AssetRipper",
            Strategy::Raw => "copying raw bundles (AssetRipper unavailable)",
            Strategy::Fallback => "cataloging all recognizable files",
        }
    }
}

/// Pick the extraction tier from tool availability and scan results.
pub fn select_strategy(tool_available: bool, bundle_count: usize) -> Strategy {
    if bundle_count == 0 {
        Strategy::Fallback
    } else if tool_available {
        Strategy::Rich
    } else {
        Strategy::Raw
    }
}

/// Run the chosen tier. `data_dir` is the decompiled tree root the fallback
/// tier walks; the bundle tiers only consume `bundles`.
pub fn run_strategy(
    strategy: Strategy,
    config: &ToolConfig,
    bundles: &[PathBuf],
    data_dir: &Path,
    out_dir: &Path,
) -> Result<Vec<ExtractedFile>, ExtractError> {
    std::fs::create_dir_all(out_dir)?;

    match strategy {
        Strategy::Rich => rich::extract(config, bundles, out_dir),
        Strategy::Raw => raw::extract(bundles, out_dir),
        Strategy::Fallback => fallback::extract(data_dir, out_dir),
    }
}

/// Base name of a bundle file, used to name its output folder and tag its
/// extracted files.
fn bundle_name(bundle: &Path) -> String {
    bundle
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("bundle")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_decision_table() {
        assert_eq!(select_strategy(true, 3), Strategy::Rich);
        assert_eq!(select_strategy(false, 3), Strategy::Raw);
        assert_eq!(select_strategy(true, 0), Strategy::Fallback);
        assert_eq!(select_strategy(false, 0), Strategy::Fallback);
    }

    #[test]
    fn test_bundle_name_strips_extension() {
        assert_eq!(bundle_name(Path::new("/x/sharedassets0.assets")), "sharedassets0");
        assert_eq!(bundle_name(Path::new("/x/level0")), "level0");
    }
}
