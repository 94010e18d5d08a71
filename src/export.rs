use anyhow::{Context, Result};
use image::RgbaImage;
use std::path::{Path, PathBuf};

pub const EXPORT_EXTENSION: &str = "png";

/// Append the `.png` extension when the picked path lacks it. An existing
/// extension of any case is accepted as-is.
pub fn ensure_png_extension(path: PathBuf) -> PathBuf {
    match path.extension() {
        Some(ext) if ext.eq_ignore_ascii_case(EXPORT_EXTENSION) => path,
        _ => {
            let mut raw = path.into_os_string();
            raw.push(".");
            raw.push(EXPORT_EXTENSION);
            PathBuf::from(raw)
        }
    }
}

/// Write the canvas buffer to `path` as PNG, creating missing parent
/// directories first.
pub fn write_png(image: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create export folder {}", parent.display()))?;
        }
    }
    image
        .save(path)
        .with_context(|| format!("write image to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_extension_is_appended() {
        assert_eq!(
            ensure_png_extension(PathBuf::from("/tmp/out/drawing")),
            PathBuf::from("/tmp/out/drawing.png")
        );
    }

    #[test]
    fn existing_png_extension_is_kept() {
        assert_eq!(
            ensure_png_extension(PathBuf::from("/tmp/out/drawing.png")),
            PathBuf::from("/tmp/out/drawing.png")
        );
        assert_eq!(
            ensure_png_extension(PathBuf::from("/tmp/out/DRAWING.PNG")),
            PathBuf::from("/tmp/out/DRAWING.PNG")
        );
    }

    #[test]
    fn other_extensions_get_png_appended() {
        assert_eq!(
            ensure_png_extension(PathBuf::from("shot.jpeg")),
            PathBuf::from("shot.jpeg.png")
        );
    }

    #[test]
    fn write_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/exports/out.png");
        let image = RgbaImage::from_pixel(4, 4, image::Rgba([1, 2, 3, 255]));

        write_png(&image, &path).unwrap();

        let reloaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(reloaded.dimensions(), (4, 4));
        assert_eq!(reloaded.get_pixel(2, 2).0, [1, 2, 3, 255]);
    }
}
