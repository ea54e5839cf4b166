//! Full-desktop wallpaper canvas
//!
//! One RGB image the size of the whole desktop; each screen's pick is
//! stretched to exactly cover that screen's rectangle.

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use std::fs;
use std::path::Path;

use super::screen::{Resolution, Screen};
use crate::rotation::error::RotationError;

pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    pub fn new(resolution: Resolution) -> Self {
        Self {
            image: RgbImage::from_pixel(resolution.width, resolution.height, Rgb([0, 0, 0])),
        }
    }

    /// Stretch the image at `image_path` over `screen`, ignoring aspect ratio.
    /// Parts of the screen outside the canvas are clipped.
    pub fn paint(&mut self, image_path: &Path, screen: &Screen) -> Result<(), RotationError> {
        let source = image::open(image_path).map_err(|source| RotationError::Image {
            path: image_path.to_path_buf(),
            source,
        })?;

        let resized = source
            .resize_exact(screen.width, screen.height, FilterType::Triangle)
            .to_rgb8();
        imageops::replace(
            &mut self.image,
            &resized,
            i64::from(screen.x_offset),
            i64::from(screen.y_offset),
        );
        Ok(())
    }

    /// Write the canvas; the format follows the file extension.
    pub fn save(&self, path: &Path) -> Result<(), RotationError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| RotationError::storage(parent, e))?;
        }
        self.image.save(path).map_err(|source| RotationError::Image {
            path: path.to_path_buf(),
            source,
        })
    }

    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.image.get_pixel(x, y).0
    }
}
