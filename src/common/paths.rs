use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Centralized path management for dailywall

/// Get the dailywall config directory
pub fn dailywall_config_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("Unable to determine user config directory")?
        .join("dailywall"))
}

/// Get the dailywall data directory
pub fn dailywall_data_dir() -> PathBuf {
    data_dir().join("dailywall")
}

/// Default directory holding the per-device usage records
pub fn default_storage_dir() -> PathBuf {
    dailywall_data_dir().join("used_images")
}

/// Default location of the composited wallpaper
pub fn default_output_path() -> PathBuf {
    data_dir().join("backgrounds").join("dailywall.jpg")
}

fn data_dir() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("~"));
        home.join(".local/share")
    })
}

/// Expand a leading `~` and environment variables in a configured path
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    match shellexpand::full(&raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => PathBuf::from(shellexpand::tilde(&raw).as_ref()),
    }
}
