use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

const BACKGROUND_SCHEMA: &str = "org.gnome.desktop.background";

pub fn apply_wallpaper(path: &Path) -> Result<()> {
    let abs_path = path
        .canonicalize()
        .context("Failed to resolve absolute path for wallpaper")?;

    let uri = format!("file://{}", abs_path.display());

    gsettings_set("picture-uri", &uri)?;
    gsettings_set("picture-uri-dark", &uri)?;
    // one image stretched over every monitor
    gsettings_set("picture-options", "spanned")?;

    Ok(())
}

fn gsettings_set(key: &str, value: &str) -> Result<()> {
    let output = Command::new("gsettings")
        .args(["set", BACKGROUND_SCHEMA, key, value])
        .output()
        .with_context(|| format!("Failed to set {} with gsettings", key))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("gsettings set {} failed: {}", key, stderr.trim());
    }
    Ok(())
}
