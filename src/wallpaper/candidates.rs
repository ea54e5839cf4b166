use std::collections::BTreeSet;
use std::path::Path;
use walkdir::WalkDir;

use crate::rotation::error::RotationError;

/// File extensions considered wallpaper images
pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Image files directly inside `dir`, as full path strings.
pub fn list_images(dir: &Path) -> Result<BTreeSet<String>, RotationError> {
    let mut images = BTreeSet::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            RotationError::storage(path, std::io::Error::other(e.to_string()))
        })?;
        if entry.file_type().is_file() && is_image_file(entry.path()) {
            images.insert(entry.path().to_string_lossy().to_string());
        }
    }
    Ok(images)
}
