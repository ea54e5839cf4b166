use anyhow::Result;
use colored::*;
use std::path::Path;

use crate::rotation::record::Orientation;
use crate::rotation::{RecordStore, Rotation, RunOutcome, gate, selection};
use crate::ui::prelude::*;
use crate::wallpaper::candidates;
use crate::wallpaper::cli::{SourceArgs, WallpaperCommands};
use crate::wallpaper::config::{RotationConfig, Settings};
use crate::wallpaper::desktop::DesktopEnvironment;
use crate::wallpaper::screen::DisplayBackend;

pub fn handle_wallpaper_command(command: WallpaperCommands, config: Option<&Path>) -> Result<()> {
    match command {
        WallpaperCommands::Run(args) => handle_run(load_settings(config, args)?),
        WallpaperCommands::Status(args) => handle_status(load_settings(config, args)?),
    }
}

fn load_settings(config: Option<&Path>, args: SourceArgs) -> Result<Settings> {
    Ok(RotationConfig::load(config)?.into_settings(args.horizontal, args.vertical))
}

fn handle_run(settings: Settings) -> Result<()> {
    // validate everything before touching any state
    let sources = settings.sources()?;

    let store = RecordStore::new(&settings.storage_dir);
    let device = store.resolve_device_identity()?;
    let today = gate::today_local();

    let environment = DesktopEnvironment::detect();
    let backend = DisplayBackend::detect();
    emit(
        Level::Debug,
        "rotation.environment",
        &format!(
            "Desktop {}, geometry from {:?}, record {}",
            environment,
            backend,
            store.record_path(&device).display()
        ),
        None,
    );
    let display = backend.provider();

    let rotation = Rotation {
        store: &store,
        sources: &sources,
        output_path: &settings.output_path,
        display: display.as_ref(),
        background: &environment,
    };

    match rotation.run(&device, &today, &mut rand::thread_rng())? {
        RunOutcome::AlreadyRan { last_update } => {
            emit(
                Level::Info,
                "rotation.noop",
                &format!("Wallpaper already rotated today ({})", last_update),
                None,
            );
        }
        RunOutcome::Rotated {
            picks,
            wallpaper,
            applied,
        } => {
            let verb = if applied { "applied" } else { "written" };
            emit(
                Level::Success,
                "rotation.done",
                &format!(
                    "New wallpaper for {} screen(s) {}: {}",
                    picks.len(),
                    verb,
                    wallpaper.display()
                ),
                Some(serde_json::json!({
                    "wallpaper": wallpaper.display().to_string(),
                    "applied": applied,
                    "images": picks.iter().map(|p| p.image.clone()).collect::<Vec<_>>(),
                })),
            );
        }
    }
    Ok(())
}

fn handle_status(settings: Settings) -> Result<()> {
    let store = RecordStore::new(&settings.storage_dir);
    let device = store.resolve_device_identity()?;
    let record = store.load(&device)?;
    let today = gate::today_local();
    let pending = gate::should_run(&record, &today);

    emit(
        Level::Info,
        "status.record",
        &format!(
            "Record: {}\nLast update: {} ({})",
            store.record_path(&device).display(),
            record.last_update,
            if pending {
                "rotation pending".yellow().to_string()
            } else {
                "done for today".green().to_string()
            }
        ),
        Some(serde_json::json!({
            "storage_dir": store.dir().display().to_string(),
            "record": store.record_path(&device).display().to_string(),
            "last_update": record.last_update,
            "pending": pending,
        })),
    );

    for orientation in [Orientation::Horizontal, Orientation::Vertical] {
        let used = record.images.for_orientation(orientation);
        let pool = match settings.source_for(orientation) {
            Some(dir) if dir.is_dir() => Some(candidates::list_images(dir)?),
            _ => None,
        };

        let message = match &pool {
            Some(all) => {
                let unused = all.iter().filter(|image| !used.contains(*image)).count();
                let offered = selection::available_for(&record, all, orientation).len();
                format!(
                    "{}: {} used, {} of {} unused, {} offered next",
                    orientation,
                    used.len(),
                    unused,
                    all.len(),
                    offered
                )
            }
            None => format!("{}: {} used, no image directory", orientation, used.len()),
        };

        emit(
            Level::Info,
            "status.orientation",
            &message,
            Some(serde_json::json!({
                "orientation": orientation.name(),
                "used": used.len(),
                "pool": pool.as_ref().map(|p| p.len()),
            })),
        );
    }
    Ok(())
}
