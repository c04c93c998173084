use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use exif::{In, Reader, Tag, Value};
use tracing::{debug, warn};

use crate::error::{CarouselError, Result};

/// A heavy slide asset that has been brought into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedAsset {
    pub path: PathBuf,
    pub byte_len: usize,
    /// EXIF orientation tag, 1 when absent.
    pub orientation: u16,
}

impl LoadedAsset {
    /// Clockwise rotation the presentation layer applies to show the image
    /// upright. Flipped orientations are drawn unrotated.
    pub fn rotation_degrees(&self) -> f32 {
        match self.orientation {
            3 => 180.0,
            6 => 90.0,
            8 => 270.0,
            _ => 0.0,
        }
    }
}

/// Source of slide assets for lazily loading sliders.
pub trait AssetLoader {
    fn load(&mut self, path: &Path) -> Result<LoadedAsset>;
}

/// Reads assets from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileAssetLoader;

impl AssetLoader for FileAssetLoader {
    fn load(&mut self, path: &Path) -> Result<LoadedAsset> {
        let file_bytes = fs::read(path).map_err(|e| CarouselError::Asset {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        if file_bytes.is_empty() {
            return Err(CarouselError::Asset {
                path: path.to_path_buf(),
                reason: "file is empty".to_string(),
            });
        }

        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();
        let orientation = if extension == "jpg" || extension == "jpeg" {
            read_orientation(path, &file_bytes)
        } else {
            1
        };

        debug!(?path, bytes = file_bytes.len(), orientation, "asset loaded");
        Ok(LoadedAsset {
            path: path.to_path_buf(),
            byte_len: file_bytes.len(),
            orientation,
        })
    }
}

// EXIF is only reliable for JPEG; any read failure means "upright".
fn read_orientation(path: &Path, file_bytes: &[u8]) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(file_bytes)) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| match &field.value {
                Value::Short(values) => values.first().copied(),
                _ => None,
            })
            .unwrap_or(1),
        Err(e) => {
            warn!(?path, error = %e, "could not read EXIF data");
            1
        }
    }
}

/// Image files directly inside `dir_path`, sorted by file name.
pub fn load_sorted_image_paths(dir_path: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir_path).map_err(|source| CarouselError::Io {
        path: dir_path.to_path_buf(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| CarouselError::Io {
            path: dir_path.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(ext) = path.extension().and_then(|s| s.to_str()) {
            match ext.to_lowercase().as_str() {
                "png" | "jpg" | "jpeg" | "bmp" | "gif" | "webp" => paths.push(path),
                _ => {}
            }
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}
