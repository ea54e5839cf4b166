use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::common::paths;
use crate::rotation::error::RotationError;
use crate::rotation::record::Orientation;

/// Contents of `config.toml`; every key is optional.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct RotationConfig {
    /// Directory holding the per-device usage records
    pub storage_dir: Option<PathBuf>,
    /// Where the composited wallpaper is written
    pub output_path: Option<PathBuf>,
    pub horizontal_dir: Option<PathBuf>,
    pub vertical_dir: Option<PathBuf>,
}

impl RotationConfig {
    pub fn config_file_path() -> Result<PathBuf, RotationError> {
        paths::dailywall_config_dir()
            .map(|dir| dir.join("config.toml"))
            .map_err(|e| RotationError::config(format!("{:#}", e)))
    }

    /// Load `explicit` if given (it must exist), otherwise the default file if present.
    pub fn load(explicit: Option<&Path>) -> Result<Self, RotationError> {
        let cfg_path = match explicit {
            Some(path) => {
                let path = paths::expand_path(path);
                if !path.is_file() {
                    return Err(RotationError::config(format!(
                        "config file {} does not exist",
                        path.display()
                    )));
                }
                path
            }
            None => {
                let path = Self::config_file_path()?;
                if !path.exists() {
                    return Ok(Self::default());
                }
                path
            }
        };

        let s = fs::read_to_string(&cfg_path).map_err(|e| {
            RotationError::config(format!("reading config {}: {}", cfg_path.display(), e))
        })?;
        toml::from_str(&s).map_err(|e| {
            RotationError::config(format!("parsing config {}: {}", cfg_path.display(), e))
        })
    }

    /// Apply command line overrides and fill in default locations.
    pub fn into_settings(self, horizontal: Option<PathBuf>, vertical: Option<PathBuf>) -> Settings {
        Settings {
            storage_dir: paths::expand_path(
                &self.storage_dir.unwrap_or_else(paths::default_storage_dir),
            ),
            output_path: paths::expand_path(
                &self.output_path.unwrap_or_else(paths::default_output_path),
            ),
            horizontal_dir: horizontal
                .or(self.horizontal_dir)
                .map(|p| paths::expand_path(&p)),
            vertical_dir: vertical
                .or(self.vertical_dir)
                .map(|p| paths::expand_path(&p)),
        }
    }
}

/// Effective settings for one invocation
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub storage_dir: PathBuf,
    pub output_path: PathBuf,
    pub horizontal_dir: Option<PathBuf>,
    pub vertical_dir: Option<PathBuf>,
}

impl Settings {
    /// Both source directories, checked to exist.
    pub fn sources(&self) -> Result<SourceDirs, RotationError> {
        Ok(SourceDirs {
            horizontal: existing_dir(self.horizontal_dir.as_deref(), Orientation::Horizontal)?,
            vertical: existing_dir(self.vertical_dir.as_deref(), Orientation::Vertical)?,
        })
    }

    pub fn source_for(&self, orientation: Orientation) -> Option<&Path> {
        match orientation {
            Orientation::Horizontal => self.horizontal_dir.as_deref(),
            Orientation::Vertical => self.vertical_dir.as_deref(),
        }
    }
}

fn existing_dir(dir: Option<&Path>, orientation: Orientation) -> Result<PathBuf, RotationError> {
    let dir = dir.ok_or_else(|| {
        RotationError::config(format!(
            "no {} image directory configured (use --{} or '{}_dir' in config.toml)",
            orientation, orientation, orientation
        ))
    })?;
    if !dir.is_dir() {
        return Err(RotationError::config(format!(
            "{} image directory {} does not exist",
            orientation,
            dir.display()
        )));
    }
    Ok(dir.to_path_buf())
}

/// Image source directory per orientation
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDirs {
    pub horizontal: PathBuf,
    pub vertical: PathBuf,
}

impl SourceDirs {
    pub fn dir_for(&self, orientation: Orientation) -> &Path {
        match orientation {
            Orientation::Horizontal => &self.horizontal,
            Orientation::Vertical => &self.vertical,
        }
    }
}
