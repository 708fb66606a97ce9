//! Модуль подготовки логотипа
//!
//! Этот модуль масштабирует логотип под размер кадра с сохранением пропорций.

use std::path::Path;
use image::imageops;

use crate::error::{Result, Script2VideoError};
use crate::utils::temp::TempFileManager;

/// Минимальная ширина логотипа в пикселях
const MIN_LOGO_WIDTH: u32 = 64;

/// Доля ширины кадра, отводимая логотипу
const LOGO_WIDTH_FRACTION: f64 = 0.12;

/// Подготовить логотип: загрузить, отмасштабировать и сохранить во временный PNG
///
/// Возвращает путь к подготовленному файлу.
pub fn prepare_logo(
    logo_path: &Path,
    frame_width: u32,
    temp: &mut TempFileManager,
) -> Result<std::path::PathBuf> {
    if !logo_path.exists() {
        return Err(Script2VideoError::FileNotFound(format!(
            "Logo file not found: {}",
            logo_path.display()
        )));
    }

    let logo = image::open(logo_path)?.to_rgba8();
    let (src_w, src_h) = logo.dimensions();
    if src_w == 0 || src_h == 0 {
        return Err(Script2VideoError::FrameComposition(
            "Logo image has zero dimensions".to_string(),
        ));
    }

    let target_w = ((frame_width as f64 * LOGO_WIDTH_FRACTION) as u32).max(MIN_LOGO_WIDTH);
    let ratio = target_w as f64 / src_w as f64;
    let target_h = ((src_h as f64 * ratio) as u32).max(1);

    let resized = imageops::resize(&logo, target_w, target_h, imageops::FilterType::Lanczos3);

    let output = temp.create_temp_file("logo", "png")?;
    resized.save_with_format(&output, image::ImageFormat::Png)?;

    log::debug!(
        "Prepared logo {} ({}x{} -> {}x{})",
        output.display(),
        src_w,
        src_h,
        target_w,
        target_h
    );
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_prepare_logo_scales_to_frame_width() {
        let dir = tempfile::tempdir().unwrap();
        let logo_path = dir.path().join("logo.png");

        let src = RgbaImage::from_pixel(200, 100, Rgba([255, 0, 0, 128]));
        src.save_with_format(&logo_path, image::ImageFormat::Png).unwrap();

        let mut temp = TempFileManager::new(true).unwrap();
        let prepared = prepare_logo(&logo_path, 1920, &mut temp).unwrap();

        let result = image::open(&prepared).unwrap().to_rgba8();
        // 12% от 1920 = 230, высота сохраняет пропорции 2:1
        assert_eq!(result.dimensions(), (230, 115));
    }

    #[test]
    fn test_prepare_logo_enforces_minimum_width() {
        let dir = tempfile::tempdir().unwrap();
        let logo_path = dir.path().join("logo.png");

        let src = RgbaImage::from_pixel(100, 100, Rgba([0, 255, 0, 255]));
        src.save_with_format(&logo_path, image::ImageFormat::Png).unwrap();

        let mut temp = TempFileManager::new(true).unwrap();
        let prepared = prepare_logo(&logo_path, 320, &mut temp).unwrap();

        let result = image::open(&prepared).unwrap().to_rgba8();
        // 12% от 320 = 38, но действует минимум 64
        assert_eq!(result.dimensions(), (64, 64));
    }

    #[test]
    fn test_prepare_logo_missing_file() {
        let mut temp = TempFileManager::new(true).unwrap();
        let result = prepare_logo(Path::new("/nonexistent/logo.png"), 1920, &mut temp);
        assert!(result.is_err());
    }
}
