//! Filesystem locations shared by the CLI and TUI.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const APP_DIR: &str = "quill";

/// Gets the cross-platform data directory for this application.
///
/// Returns `{data_dir}/quill` where `data_dir` is:
/// - Linux: `~/.local/share`
/// - macOS: `~/Library/Application Support`
/// - Windows: `C:\Users\<user>\AppData\Roaming`
///
/// # Errors
///
/// Returns an error if the data directory cannot be determined.
pub fn get_data_directory() -> Result<PathBuf> {
    let data_dir =
        dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Failed to determine data directory"))?;

    Ok(data_dir.join(APP_DIR))
}

/// Gets the directory the JSON log is written to: `{data_dir}/quill/logs`.
pub fn get_log_directory() -> Result<PathBuf> {
    Ok(get_data_directory()?.join("logs"))
}

/// Gets the theme preference path: `{config_dir}/quill/theme`.
///
/// # Errors
///
/// Returns an error if the config directory cannot be determined.
pub fn get_theme_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Failed to determine config directory"))?;

    Ok(config_dir.join(APP_DIR).join("theme"))
}

/// Ensures the parent directory of `path` exists.
///
/// # Errors
///
/// Returns an error if directory creation fails.
pub fn ensure_parent_directory(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}
