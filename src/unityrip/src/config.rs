//! External tool configuration
//!
//! The pipeline shells out to two optional tools: apktool (APK decompilation,
//! run through a Java interpreter) and AssetRipper (Unity bundle unpacking).
//! Neither is required; every stage has a fallback when its tool is absent.

use std::path::PathBuf;

/// Paths to the external tools the pipeline probes for.
///
/// Each field resolves from an environment variable with a fixed default
/// matching the provisioning script's install locations:
///
/// | Field | Env var | Default |
/// |---|---|---|
/// | `java_bin` | `JAVA_BIN` | `java` (from `PATH`) |
/// | `apktool_jar` | `APKTOOL_JAR` | `/opt/apktool/apktool.jar` |
/// | `asset_ripper_bin` | `ASSET_RIPPER_PATH` | `/opt/assetripper/AssetRipper` |
#[derive(Debug, Clone)]
pub struct ToolConfig {
    pub java_bin: PathBuf,
    pub apktool_jar: PathBuf,
    pub asset_ripper_bin: PathBuf,
}

impl ToolConfig {
    /// Resolve tool paths from the environment, falling back to the
    /// documented defaults for unset variables.
    pub fn from_env() -> Self {
        Self {
            java_bin: env_path("JAVA_BIN", "java"),
            apktool_jar: env_path("APKTOOL_JAR", "/opt/apktool/apktool.jar"),
            asset_ripper_bin: env_path("ASSET_RIPPER_PATH", "/opt/assetripper/AssetRipper"),
        }
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

fn env_path(var: &str, default: &str) -> PathBuf {
    std::env::var_os(var)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}
