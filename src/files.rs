// ─── Data Layout ───
// On-disk layout shared by the resolvers:
//   <data>/mappings/<version>/fields.csv, methods.csv[, params.csv]
//   <data>/libs/<artifact>-<version>.jar, libs.txt

use std::path::PathBuf;

const APP_DIR_NAME: &str = ".remapkit";

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Root data directory, created on first use.
pub fn data_dir() -> PathBuf {
    let dir = home_dir().join(APP_DIR_NAME);
    if !dir.exists() {
        let _ = std::fs::create_dir_all(&dir);
    }
    dir
}

pub fn mappings_dir() -> PathBuf {
    data_dir().join("mappings")
}

pub fn libraries_dir() -> PathBuf {
    data_dir().join("libs")
}

/// Gradle's MCP artifact cache. Mappings unpacked there by old ForgeGradle
/// builds are picked up as an external source.
pub fn gradle_mcp_cache() -> PathBuf {
    home_dir()
        .join(".gradle")
        .join("caches")
        .join("minecraft")
        .join("de")
        .join("oceanlabs")
        .join("mcp")
}
