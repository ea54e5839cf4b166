//! Desktop environment detection and the background-setting capability

use std::fmt;
use std::path::Path;
use thiserror::Error;

use super::{gnome, kwin};

#[derive(Error, Debug)]
pub enum DesktopError {
    #[error("Desktop environment '{0}' is not supported, background not applied")]
    Unsupported(String),

    #[error("Failed to apply background: {0}")]
    CommandFailed(String),
}

impl From<anyhow::Error> for DesktopError {
    fn from(e: anyhow::Error) -> Self {
        DesktopError::CommandFailed(format!("{:#}", e))
    }
}

/// Something that can make an image file the live desktop background
pub trait BackgroundSetter {
    fn apply(&self, image_path: &Path) -> Result<(), DesktopError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesktopEnvironment {
    Gnome,
    Kde,
    Unsupported(String),
}

impl DesktopEnvironment {
    pub fn detect() -> Self {
        Self::from_current_desktop(std::env::var("XDG_CURRENT_DESKTOP").ok().as_deref())
    }

    /// Classify an `XDG_CURRENT_DESKTOP` value such as `ubuntu:GNOME` or `KDE`.
    pub fn from_current_desktop(value: Option<&str>) -> Self {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return DesktopEnvironment::Unsupported("unknown".to_string());
        };

        let parts = || value.split(':').map(str::to_lowercase);
        if parts().any(|p| p == "gnome") {
            DesktopEnvironment::Gnome
        } else if parts().any(|p| p == "kde") {
            DesktopEnvironment::Kde
        } else {
            DesktopEnvironment::Unsupported(value.to_string())
        }
    }

    pub fn name(&self) -> String {
        match self {
            DesktopEnvironment::Gnome => "GNOME".to_string(),
            DesktopEnvironment::Kde => "KDE".to_string(),
            DesktopEnvironment::Unsupported(name) => name.clone(),
        }
    }
}

impl fmt::Display for DesktopEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl BackgroundSetter for DesktopEnvironment {
    fn apply(&self, image_path: &Path) -> Result<(), DesktopError> {
        match self {
            DesktopEnvironment::Gnome => Ok(gnome::apply_wallpaper(image_path)?),
            DesktopEnvironment::Kde => Ok(kwin::apply_wallpaper(image_path)?),
            DesktopEnvironment::Unsupported(name) => Err(DesktopError::Unsupported(name.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_detection() {
        assert_eq!(
            DesktopEnvironment::from_current_desktop(Some("ubuntu:GNOME")),
            DesktopEnvironment::Gnome
        );
        assert_eq!(
            DesktopEnvironment::from_current_desktop(Some("GNOME")),
            DesktopEnvironment::Gnome
        );
        assert_eq!(
            DesktopEnvironment::from_current_desktop(Some("KDE")),
            DesktopEnvironment::Kde
        );
        assert_eq!(
            DesktopEnvironment::from_current_desktop(Some("X-Cinnamon")),
            DesktopEnvironment::Unsupported("X-Cinnamon".to_string())
        );
        assert_eq!(
            DesktopEnvironment::from_current_desktop(None),
            DesktopEnvironment::Unsupported("unknown".to_string())
        );
        assert_eq!(
            DesktopEnvironment::from_current_desktop(Some("  ")),
            DesktopEnvironment::Unsupported("unknown".to_string())
        );
    }

    #[test]
    #[serial]
    fn test_detect_reads_current_desktop() {
        let previous = std::env::var("XDG_CURRENT_DESKTOP").ok();
        // SAFETY: env access is serialized across tests
        unsafe { std::env::set_var("XDG_CURRENT_DESKTOP", "KDE") };
        assert_eq!(DesktopEnvironment::detect(), DesktopEnvironment::Kde);
        unsafe { std::env::remove_var("XDG_CURRENT_DESKTOP") };
        assert_eq!(
            DesktopEnvironment::detect(),
            DesktopEnvironment::Unsupported("unknown".to_string())
        );
        if let Some(value) = previous {
            unsafe { std::env::set_var("XDG_CURRENT_DESKTOP", value) };
        }
    }

    #[test]
    fn test_unsupported_apply_is_an_error() {
        let env = DesktopEnvironment::Unsupported("Hyprland".to_string());
        let err = env.apply(Path::new("/tmp/wall.jpg")).unwrap_err();
        assert!(matches!(err, DesktopError::Unsupported(ref name) if name == "Hyprland"));
        assert!(err.to_string().contains("Hyprland"));
    }

    #[test]
    fn test_names() {
        assert_eq!(DesktopEnvironment::Gnome.name(), "GNOME");
        assert_eq!(DesktopEnvironment::Kde.to_string(), "KDE");
    }
}
