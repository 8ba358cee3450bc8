use std::path::{Path, PathBuf};

use image::{ImageReader, RgbaImage};

use crate::error::SlicerError;

pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// Decode an image file into RGBA pixels
pub fn load_image(path: &Path) -> Result<RgbaImage, SlicerError> {
    let img = ImageReader::open(path)
        .map_err(|e| SlicerError::ImageLoad {
            path: path.to_path_buf(),
            source: e.into(),
        })?
        .with_guessed_format()
        .map_err(|e| SlicerError::ImageLoad {
            path: path.to_path_buf(),
            source: e.into(),
        })?
        .decode()
        .map_err(|e| SlicerError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })?
        .into_rgba8();

    Ok(img)
}

/// Decode an encoded image held in memory, guessing the format from its header
pub fn load_image_from_bytes(bytes: &[u8]) -> Result<RgbaImage, SlicerError> {
    image::load_from_memory(bytes)
        .map(|img| img.into_rgba8())
        .map_err(SlicerError::ImageDecode)
}

/// Expand input paths into sheet files; directories are searched recursively
pub fn collect_sheet_paths(inputs: &[impl AsRef<Path>]) -> Result<Vec<PathBuf>, SlicerError> {
    let mut paths = Vec::new();

    for input in inputs {
        let path = input.as_ref();
        if !path.exists() {
            return Err(SlicerError::InputNotFound(path.to_path_buf()));
        }

        if path.is_file() {
            if is_supported_image(path) {
                paths.push(path.to_path_buf());
            }
        } else if path.is_dir() {
            collect_from_directory(path, &mut paths)?;
        }
    }

    if paths.is_empty() {
        return Err(SlicerError::NoImages);
    }

    Ok(paths)
}

fn collect_from_directory(dir: &Path, paths: &mut Vec<PathBuf>) -> Result<(), SlicerError> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Err(SlicerError::InputNotFound(dir.to_path_buf()));
    };

    let mut found: Vec<PathBuf> = entries.flatten().map(|entry| entry.path()).collect();
    found.sort();

    for path in found {
        if path.is_file() && is_supported_image(&path) {
            paths.push(path);
        } else if path.is_dir() {
            collect_from_directory(&path, paths)?;
        }
    }

    Ok(())
}

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_is_supported_image() {
        assert!(is_supported_image(Path::new("hero.png")));
        assert!(is_supported_image(Path::new("sheets/hero.PNG")));
        assert!(is_supported_image(Path::new("walk.webp")));
        assert!(!is_supported_image(Path::new("hero.txt")));
        assert!(!is_supported_image(Path::new("hero")));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_image(Path::new("does/not/exist.png"));
        assert!(matches!(result, Err(SlicerError::ImageLoad { .. })));
    }

    #[test]
    fn test_load_round_trips_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.png");
        let img = RgbaImage::from_pixel(3, 2, Rgba([255, 255, 0, 255]));
        img.save(&path).unwrap();

        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded, img);
    }

    #[test]
    fn test_load_undecodable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        assert!(matches!(
            load_image(&path),
            Err(SlicerError::ImageLoad { .. })
        ));
    }

    #[test]
    fn test_collect_sheet_paths_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("b.png"), b"").unwrap();
        std::fs::write(dir.path().join("a.png"), b"").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"").unwrap();
        std::fs::write(dir.path().join("nested").join("c.png"), b"").unwrap();

        let paths = collect_sheet_paths(&[dir.path()]).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.png", "b.png", "c.png"]);
    }

    #[test]
    fn test_collect_sheet_paths_errors() {
        assert!(matches!(
            collect_sheet_paths(&[Path::new("no/such/dir")]),
            Err(SlicerError::InputNotFound(_))
        ));

        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            collect_sheet_paths(&[dir.path()]),
            Err(SlicerError::NoImages)
        ));
    }
}
