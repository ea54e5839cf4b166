use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::process::Command;

const APPLETS_RC: &str = "plasma-org.kde.plasma.desktop-appletsrc";

pub fn apply_wallpaper(path: &Path) -> Result<()> {
    let abs_path = path
        .canonicalize()
        .context("Failed to resolve absolute path for wallpaper")?;
    let path_str = abs_path.to_string_lossy();

    if which::which("plasma-apply-wallpaperimage").is_ok()
        && Command::new("plasma-apply-wallpaperimage")
            .arg(&*path_str)
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    {
        return Ok(());
    }

    let script = plasma_script(&path_str);
    if ["qdbus6", "qdbus", "qdbus-qt5"]
        .into_iter()
        .any(|qdbus| evaluate_in_plasmashell(qdbus, &script))
    {
        return Ok(());
    }

    // No running shell to talk to: edit the config plasma reads on startup
    let rc_path = dirs::config_dir()
        .context("Unable to determine user config directory")?
        .join(APPLETS_RC);
    rewrite_appletsrc(&rc_path, &abs_path).context(
        "Failed to set KDE wallpaper: plasma-apply-wallpaperimage, qdbus and appletsrc all failed",
    )
}

/// Plasma desktop script that sets `image` on every containment.
fn plasma_script(image: &str) -> String {
    let escaped = image.replace('\\', "\\\\").replace('"', "\\\"");
    let image_line = format!("  desktop.writeConfig(\"Image\", \"file://{}\");", escaped);
    [
        "for (const desktop of desktops()) {",
        "  desktop.wallpaperPlugin = \"org.kde.image\";",
        "  desktop.currentConfigGroup = [\"Wallpaper\", \"org.kde.image\", \"General\"];",
        image_line.as_str(),
        "}",
    ]
    .join("\n")
}

/// Run `script` in the live plasmashell through one of the qdbus front-ends.
fn evaluate_in_plasmashell(qdbus: &str, script: &str) -> bool {
    Command::new(qdbus)
        .arg("org.kde.plasmashell")
        .arg("/PlasmaShell")
        .arg("org.kde.PlasmaShell.evaluateScript")
        .arg(script)
        .output()
        .is_ok_and(|output| output.status.success())
}

/// Point every `Image=` entry of the applets config at `image`.
fn rewrite_appletsrc(rc_path: &Path, image: &Path) -> Result<()> {
    let contents = fs::read_to_string(rc_path)
        .with_context(|| format!("reading {}", rc_path.display()))?;

    let (updated, replaced) = replace_image_lines(&contents, image);
    if replaced == 0 {
        anyhow::bail!("no Image= entry in {}", rc_path.display());
    }

    fs::write(rc_path, updated).with_context(|| format!("writing {}", rc_path.display()))?;
    Ok(())
}

fn replace_image_lines(contents: &str, image: &Path) -> (String, usize) {
    let mut replaced = 0;
    let mut out = String::with_capacity(contents.len());
    for line in contents.lines() {
        if line.starts_with("Image=") {
            out.push_str(&format!("Image=file://{}", image.display()));
            replaced += 1;
        } else {
            out.push_str(line);
        }
        out.push('\n');
    }
    (out, replaced)
}
