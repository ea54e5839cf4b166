//! One complete rotation: pick a fresh image per screen, compose the desktop
//! wallpaper, apply it, and remember what was used.

use rand::Rng;
use std::path::{Path, PathBuf};

use super::error::RotationError;
use super::record::{DefaultsReason, Orientation, StoredRecord};
use super::store::{DeviceId, RecordStore};
use super::{gate, selection};
use crate::ui::prelude::*;
use crate::wallpaper::candidates;
use crate::wallpaper::canvas::Canvas;
use crate::wallpaper::config::SourceDirs;
use crate::wallpaper::desktop::BackgroundSetter;
use crate::wallpaper::screen::{DisplayGeometry, Screen};

/// Image chosen for one screen
#[derive(Debug, Clone, PartialEq)]
pub struct Pick {
    pub screen: Screen,
    pub orientation: Orientation,
    pub image: String,
}

#[derive(Debug, PartialEq)]
pub enum RunOutcome {
    /// Today's rotation had already happened; nothing was touched
    AlreadyRan { last_update: String },
    Rotated {
        picks: Vec<Pick>,
        wallpaper: PathBuf,
        applied: bool,
    },
}

pub struct Rotation<'a> {
    pub store: &'a RecordStore,
    pub sources: &'a SourceDirs,
    pub output_path: &'a Path,
    pub display: &'a dyn DisplayGeometry,
    pub background: &'a dyn BackgroundSetter,
}

impl Rotation<'_> {
    pub fn run<R: Rng + ?Sized>(
        &self,
        device: &DeviceId,
        today: &str,
        rng: &mut R,
    ) -> Result<RunOutcome, RotationError> {
        let stored = self.store.load_stored(device)?;
        if let StoredRecord::Defaults(reason @ DefaultsReason::Corrupt(_)) = &stored {
            emit(
                Level::Warn,
                "rotation.record.reset",
                &format!("Starting from a fresh record: {}", reason),
                None,
            );
        }
        let mut record = stored.into_record();

        if !gate::should_run(&record, today) {
            return Ok(RunOutcome::AlreadyRan {
                last_update: record.last_update,
            });
        }

        let screens = self
            .display
            .list_screens()
            .map_err(|e| RotationError::Display(format!("{:#}", e)))?;
        if screens.is_empty() {
            return Err(RotationError::Display("no connected screens reported".to_string()));
        }
        let desktop = self
            .display
            .desktop_resolution()
            .map_err(|e| RotationError::Display(format!("{:#}", e)))?;
        if desktop.width == 0 || desktop.height == 0 {
            return Err(RotationError::Display(format!(
                "desktop resolution {}x{} is empty",
                desktop.width, desktop.height
            )));
        }

        emit(
            Level::Debug,
            "rotation.desktop",
            &format!(
                "Desktop {}x{} with {} screen(s)",
                desktop.width,
                desktop.height,
                screens.len()
            ),
            None,
        );

        let mut canvas = Canvas::new(desktop);
        let mut picks = Vec::with_capacity(screens.len());

        for screen in screens {
            if screen.width == 0 || screen.height == 0 {
                return Err(RotationError::Display(format!(
                    "screen {} has no area",
                    screen.label()
                )));
            }

            let orientation = screen.orientation();
            let dir = self.sources.dir_for(orientation);
            let all_images = candidates::list_images(dir)?;
            let pool = selection::available_for(&record, &all_images, orientation);
            let image = selection::pick(&pool, rng).ok_or_else(|| RotationError::EmptyPool {
                orientation,
                dir: dir.to_path_buf(),
            })?;

            canvas.paint(Path::new(&image), &screen)?;
            selection::mark_used(&mut record, &image, orientation);

            emit(
                Level::Info,
                "rotation.screen.picked",
                &format!("{} ({}): {}", screen.label(), orientation, image),
                Some(serde_json::json!({
                    "screen": screen.label(),
                    "orientation": orientation.name(),
                    "image": image,
                    "unused_before": pool.len(),
                    "pool": all_images.len(),
                })),
            );

            picks.push(Pick {
                screen,
                orientation,
                image,
            });
        }

        canvas.save(self.output_path)?;

        let applied = match self.background.apply(self.output_path) {
            Ok(()) => true,
            Err(e) => {
                emit(Level::Warn, "rotation.apply.failed", &e.to_string(), None);
                false
            }
        };

        gate::mark_ran(&mut record, today);
        self.store.save(&record, device)?;

        Ok(RunOutcome::Rotated {
            picks,
            wallpaper: self.output_path.to_path_buf(),
            applied,
        })
    }
}
