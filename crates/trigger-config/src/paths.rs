//! Configuration and cache directory paths
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/pr-trigger/`, `~/.cache/pr-trigger/`
//! - macOS: `~/Library/Application Support/pr-trigger/`, `~/Library/Caches/pr-trigger/`
//! - Windows: `%APPDATA%\pr-trigger\`, `%LOCALAPPDATA%\pr-trigger\`

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "pr-trigger";

/// Get the application config directory
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the application cache directory (log files live here in release builds)
pub fn cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("Could not determine cache directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get path to the app config file inside the config directory
pub fn app_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}
