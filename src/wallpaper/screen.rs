//! Screen geometry
//!
//! Monitor rectangles and total desktop size, probed through `xrandr` on X11
//! or `swaymsg` on Sway.

use anyhow::{Context, Result};
use regex::Regex;
use std::process::Command;

use crate::rotation::record::Orientation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

/// One monitor's rectangle inside the desktop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Screen {
    pub width: u32,
    pub height: u32,
    pub x_offset: u32,
    pub y_offset: u32,
}

impl Screen {
    pub fn orientation(&self) -> Orientation {
        Orientation::from_dimensions(self.width, self.height)
    }

    pub fn label(&self) -> String {
        format!(
            "{}x{}+{}+{}",
            self.width, self.height, self.x_offset, self.y_offset
        )
    }
}

/// Source of monitor layout information
pub trait DisplayGeometry {
    fn list_screens(&self) -> Result<Vec<Screen>>;
    fn desktop_resolution(&self) -> Result<Resolution>;
}

/// Which tool to ask for geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayBackend {
    Xrandr,
    Sway,
}

impl DisplayBackend {
    pub fn detect() -> Self {
        Self::from_env_values(
            std::env::var("SWAYSOCK").ok().as_deref(),
            std::env::var("XDG_CURRENT_DESKTOP").ok().as_deref(),
        )
    }

    pub fn from_env_values(swaysock: Option<&str>, current_desktop: Option<&str>) -> Self {
        let sway_desktop = current_desktop
            .map(|d| d.split(':').any(|part| part.eq_ignore_ascii_case("sway")))
            .unwrap_or(false);

        if swaysock.is_some_and(|s| !s.is_empty()) || sway_desktop {
            DisplayBackend::Sway
        } else {
            DisplayBackend::Xrandr
        }
    }

    pub fn provider(self) -> Box<dyn DisplayGeometry> {
        match self {
            DisplayBackend::Xrandr => Box::new(Xrandr),
            DisplayBackend::Sway => Box::new(SwayOutputs),
        }
    }
}

fn run_capture(program: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(program)
        .args(args)
        .output()
        .with_context(|| format!("Failed to execute {}", program))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("{} failed: {}", program, stderr.trim());
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// X11 geometry from `xrandr --query`
pub struct Xrandr;

impl Xrandr {
    /// Example: "HDMI-1 connected primary 1920x1080+0+0 (normal left ...) 527mm x 296mm"
    pub fn parse_screens(output: &str) -> Result<Vec<Screen>> {
        let re = Regex::new(r"^\S+ connected (?:primary )?(\d+)x(\d+)\+(\d+)\+(\d+)")?;
        let screens = output
            .lines()
            .filter_map(|line| re.captures(line))
            .filter_map(|caps| {
                Some(Screen {
                    width: caps[1].parse().ok()?,
                    height: caps[2].parse().ok()?,
                    x_offset: caps[3].parse().ok()?,
                    y_offset: caps[4].parse().ok()?,
                })
            })
            .collect();
        Ok(screens)
    }

    /// Example: "Screen 0: minimum 8 x 8, current 3000 x 1920, maximum 32767 x 32767"
    pub fn parse_desktop_resolution(output: &str) -> Result<Resolution> {
        let re = Regex::new(r"current (\d+) x (\d+)")?;
        let caps = re
            .captures(output)
            .context("xrandr output has no current screen size")?;
        Ok(Resolution {
            width: caps[1].parse()?,
            height: caps[2].parse()?,
        })
    }
}

impl DisplayGeometry for Xrandr {
    fn list_screens(&self) -> Result<Vec<Screen>> {
        Self::parse_screens(&run_capture("xrandr", &["--query"])?)
    }

    fn desktop_resolution(&self) -> Result<Resolution> {
        Self::parse_desktop_resolution(&run_capture("xrandr", &["--query"])?)
    }
}

/// Sway geometry from `swaymsg -t get_outputs`
pub struct SwayOutputs;

impl SwayOutputs {
    /// Sway layout coordinates may be negative; offsets are shifted so the
    /// top-left-most output starts at 0,0.
    pub fn parse_screens(json_str: &str) -> Result<Vec<Screen>> {
        let outputs: Vec<serde_json::Value> =
            serde_json::from_str(json_str).context("Failed to parse swaymsg output JSON")?;

        // (x, y, width, height) in layout coordinates
        let mut rects = Vec::new();
        for out in outputs {
            if !out["active"].as_bool().unwrap_or(false) {
                continue;
            }
            let rect = &out["rect"];
            let field = |name: &str| -> Result<i64> {
                rect[name]
                    .as_i64()
                    .with_context(|| format!("output rect is missing '{}'", name))
            };
            rects.push((field("x")?, field("y")?, field("width")?, field("height")?));
        }

        let min_x = rects.iter().map(|r| r.0).min().unwrap_or(0);
        let min_y = rects.iter().map(|r| r.1).min().unwrap_or(0);

        rects
            .into_iter()
            .map(|(x, y, width, height)| -> Result<Screen> {
                Ok(Screen {
                    width: u32::try_from(width).context("negative output width")?,
                    height: u32::try_from(height).context("negative output height")?,
                    x_offset: u32::try_from(x - min_x)?,
                    y_offset: u32::try_from(y - min_y)?,
                })
            })
            .collect()
    }

    /// Bounding box of all screens
    pub fn bounding_resolution(screens: &[Screen]) -> Resolution {
        Resolution {
            width: screens
                .iter()
                .map(|s| s.x_offset + s.width)
                .max()
                .unwrap_or(0),
            height: screens
                .iter()
                .map(|s| s.y_offset + s.height)
                .max()
                .unwrap_or(0),
        }
    }
}

impl DisplayGeometry for SwayOutputs {
    fn list_screens(&self) -> Result<Vec<Screen>> {
        Self::parse_screens(&run_capture("swaymsg", &["-t", "get_outputs"])?)
    }

    fn desktop_resolution(&self) -> Result<Resolution> {
        Ok(Self::bounding_resolution(&self.list_screens()?))
    }
}
