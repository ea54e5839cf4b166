mod common;
mod rotation;
mod ui;
mod wallpaper;

use clap::Parser;
use std::path::PathBuf;

use crate::rotation::RotationError;
use crate::ui::prelude::*;
use crate::wallpaper::cli::{SourceArgs, WallpaperCommands};

/// Rotates the desktop wallpaper once a day, one image per monitor, without repeats
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Activate debug mode
    #[arg(short, long, global = true)]
    debug: bool,

    /// Output format
    #[arg(long, value_enum, global = true, default_value = "text")]
    output: OutputFormat,

    /// Config file (default: ~/.config/dailywall/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Image directories; flags given after the command name take priority
    #[command(flatten)]
    sources: SourceArgs,

    #[command(subcommand)]
    command: Option<WallpaperCommands>,
}

fn main() {
    let cli = Cli::parse();

    ui::init(cli.output, colored::control::SHOULD_COLORIZE.should_colorize());
    ui::set_debug_mode(cli.debug);

    let command = cli
        .command
        .unwrap_or(WallpaperCommands::Run(SourceArgs::default()))
        .with_sources(cli.sources);

    if let Err(e) = wallpaper::commands::handle_wallpaper_command(command, cli.config.as_deref()) {
        let code = e
            .downcast_ref::<RotationError>()
            .map(RotationError::exit_code)
            .unwrap_or(1);
        emit(Level::Error, "error", &format!("Error: {:#}", e), None);
        std::process::exit(code);
    }
}
