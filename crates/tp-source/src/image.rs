use std::path::Path;

use anyhow::{Context, Result};
use image::{DynamicImage, RgbaImage};
use tp_core::frame::Bitmap;

/// Charge une image depuis le disque, convertie en RGBA.
///
/// Les images RGB8 sont étendues directement ; les autres formats passent
/// par la conversion RGBA8 de `image`.
///
/// # Errors
/// Returns an error if the image cannot be opened or decoded.
///
/// # Example
/// ```no_run
/// use tp_source::image::load_image;
/// use std::path::Path;
/// let bitmap = load_image(Path::new("photo.png")).unwrap();
/// ```
pub fn load_image(path: &Path) -> Result<Bitmap> {
    let img = image::open(path)
        .with_context(|| format!("Impossible de charger {}", path.display()))?;
    let bitmap = match img {
        DynamicImage::ImageRgb8(rgb) => {
            let (width, height) = rgb.dimensions();
            Bitmap::from_rgb(width, height, rgb.as_raw())?
        }
        other => {
            let rgba = other.into_rgba8();
            let (width, height) = rgba.dimensions();
            Bitmap::from_rgba(width, height, rgba.into_raw())?
        }
    };
    log::debug!("image {} : {}×{}", path.display(), bitmap.width, bitmap.height);
    Ok(bitmap)
}

/// Enregistre un bitmap ; le format est déduit de l'extension.
///
/// JPEG n'a pas de canal alpha : l'image est aplatie en RGB.
///
/// # Errors
/// Returns an error if the bitmap is empty or the encoder fails.
pub fn save_image(bitmap: &Bitmap, path: &Path) -> Result<()> {
    let rgba = RgbaImage::from_raw(bitmap.width, bitmap.height, bitmap.data.clone())
        .context("Buffer incohérent avec les dimensions")?;

    let is_jpeg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| matches!(e.to_ascii_lowercase().as_str(), "jpg" | "jpeg"));

    let result = if is_jpeg {
        DynamicImage::ImageRgba8(rgba).to_rgb8().save(path)
    } else {
        rgba.save(path)
    };
    result.with_context(|| format!("Impossible d'écrire {}", path.display()))?;
    log::info!(
        "image enregistrée : {} ({}×{})",
        path.display(),
        bitmap.width,
        bitmap.height
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_roundtrip_preserves_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let mut bm = Bitmap::filled(3, 2, (10, 20, 30, 255));
        bm.put_pixel(2, 1, (200, 100, 50, 128));

        save_image(&bm, &path).unwrap();
        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded, bm);
    }

    #[test]
    fn jpeg_output_is_flattened() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        save_image(&Bitmap::filled(8, 8, (0, 0, 0, 255)), &path).unwrap();
        let loaded = load_image(&path).unwrap();
        assert_eq!((loaded.width, loaded.height), (8, 8));
        assert!(loaded.pixels().all(|(_, _, _, a)| a == 255));
    }

    #[test]
    fn rgb_images_load_opaque() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgb.png");
        let mut rgb = image::RgbImage::new(2, 2);
        rgb.put_pixel(0, 0, image::Rgb([255, 0, 0]));
        rgb.put_pixel(1, 1, image::Rgb([1, 2, 3]));
        rgb.save(&path).unwrap();

        let loaded = load_image(&path).unwrap();
        assert_eq!((loaded.width, loaded.height), (2, 2));
        assert_eq!(loaded.pixel(0, 0), (255, 0, 0, 255));
        assert_eq!(loaded.pixel(1, 0), (0, 0, 0, 255));
        assert_eq!(loaded.pixel(1, 1), (1, 2, 3, 255));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_image(Path::new("/nonexistent/image.png")).is_err());
    }
}
