//! Decompiler adapter
//!
//! Produces a directory tree mirroring the APK's unpacked contents. When
//! apktool answers a short version probe it does the decompile; otherwise
//! the APK is unpacked as a plain ZIP archive.

use std::path::Path;
use std::time::Duration;

use crate::archive::{self, ArchiveError};
use crate::config::ToolConfig;
use crate::process::{ProcessError, ToolCommand};

/// Timeout for the `--version` capability probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout for a full apktool decompile.
const DECOMPILE_TIMEOUT: Duration = Duration::from_secs(120);

/// How the decompiled tree was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompileMethod {
    /// apktool produced a normalized unpacked tree.
    Apktool,
    /// apktool was unavailable; the APK was unpacked as a plain archive.
    ArchiveCopy,
}

impl DecompileMethod {
    pub fn describe(self) -> &'static str {
        match self {
            DecompileMethod::Apktool => "decompiled with apktool",
            DecompileMethod::ArchiveCopy => "unpacked as archive (apktool unavailable)",
        }
    }
}

/// Errors from the decompile stage. All of these are fatal for the run.
#[derive(Debug, thiserror::Error)]
pub enum DecompileError {
    #[error("apktool failed: {0}")]
    Tool(#[from] ProcessError),

    #[error("apktool exited with {code:?}: {stderr}")]
    ToolFailed { code: Option<i32>, stderr: String },

    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

/// True when apktool responds to a version probe within [`PROBE_TIMEOUT`].
pub fn apktool_available(config: &ToolConfig) -> bool {
    ToolCommand::new(&config.java_bin, PROBE_TIMEOUT)
        .arg("-jar")
        .arg(&config.apktool_jar)
        .arg("--version")
        .probe()
}

/// Unpack `apk_path` into `out_dir`, preferring apktool.
///
/// The probe gates the apktool invocation, so a failure after a successful
/// probe (including a timeout) propagates as a fatal error rather than
/// falling through to the archive path.
pub fn decompile_apk(
    config: &ToolConfig,
    apk_path: &Path,
    out_dir: &Path,
) -> Result<DecompileMethod, DecompileError> {
    if !apktool_available(config) {
        log::info!("apktool unavailable, extracting APK as plain archive");
        let written = archive::extract_all(apk_path, out_dir)?;
        log::debug!("archive fallback wrote {} files", written);
        return Ok(DecompileMethod::ArchiveCopy);
    }

    // -f: force overwrite of out_dir, -s: keep dex, skip source decompilation
    let output = ToolCommand::new(&config.java_bin, DECOMPILE_TIMEOUT)
        .arg("-jar")
        .arg(&config.apktool_jar)
        .arg("d")
        .arg(apk_path)
        .arg("-o")
        .arg(out_dir)
        .arg("-f")
        .arg("-s")
        .run()?;

    if !output.success {
        return Err(DecompileError::ToolFailed {
            code: output.exit_code,
            stderr: output.stderr.trim().to_string(),
        });
    }

    Ok(DecompileMethod::Apktool)
}
