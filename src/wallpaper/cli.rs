use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand, Debug, Clone)]
pub enum WallpaperCommands {
    /// Rotate today's wallpaper (does nothing if it already ran today)
    Run(SourceArgs),
    /// Show the usage record and remaining unused images
    Status(SourceArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Directory with landscape wallpapers
    #[arg(short = 'o', long)]
    pub horizontal: Option<PathBuf>,
    /// Directory with portrait wallpapers
    #[arg(short = 'v', long)]
    pub vertical: Option<PathBuf>,
}

impl SourceArgs {
    /// Fill unset directories from `fallback`
    pub fn or(self, fallback: SourceArgs) -> SourceArgs {
        SourceArgs {
            horizontal: self.horizontal.or(fallback.horizontal),
            vertical: self.vertical.or(fallback.vertical),
        }
    }
}

impl WallpaperCommands {
    /// Apply directories given before the command name; the command's own flags win.
    pub fn with_sources(self, outer: SourceArgs) -> Self {
        match self {
            WallpaperCommands::Run(args) => WallpaperCommands::Run(args.or(outer)),
            WallpaperCommands::Status(args) => WallpaperCommands::Status(args.or(outer)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_flags_take_priority() {
        let outer = SourceArgs {
            horizontal: Some(PathBuf::from("/outer/h")),
            vertical: Some(PathBuf::from("/outer/v")),
        };
        let command = WallpaperCommands::Run(SourceArgs {
            horizontal: Some(PathBuf::from("/inner/h")),
            vertical: None,
        })
        .with_sources(outer);

        let WallpaperCommands::Run(args) = command else {
            panic!("expected run");
        };
        assert_eq!(args.horizontal, Some(PathBuf::from("/inner/h")));
        assert_eq!(args.vertical, Some(PathBuf::from("/outer/v")));
    }
}
