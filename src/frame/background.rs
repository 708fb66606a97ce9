//! Модуль отрисовки фоновых изображений
//!
//! Этот модуль содержит генерацию градиентного фона и загрузку
//! пользовательских фоновых изображений.

use std::path::Path;
use image::{imageops, Rgb, RgbImage};

use crate::config::Theme;
use crate::error::Result;

/// Создать вертикальный градиентный фон для темы
pub fn gradient_background(width: u32, height: u32, theme: Theme) -> RgbImage {
    let (c1, c2) = theme.gradient_stops();
    let mut img = RgbImage::new(width, height);

    let denom = height.saturating_sub(1).max(1) as f64;
    for y in 0..height {
        let t = y as f64 / denom;
        let r = (c1[0] as f64 * (1.0 - t) + c2[0] as f64 * t) as u8;
        let g = (c1[1] as f64 * (1.0 - t) + c2[1] as f64 * t) as u8;
        let b = (c1[2] as f64 * (1.0 - t) + c2[2] as f64 * t) as u8;
        let pixel = Rgb([r, g, b]);

        for x in 0..width {
            img.put_pixel(x, y, pixel);
        }
    }

    img
}

/// Загрузить пользовательское фоновое изображение и привести к размеру кадра
pub fn load_background(path: &Path, width: u32, height: u32) -> Result<RgbImage> {
    let img = image::open(path)?.to_rgb8();
    Ok(imageops::resize(&img, width, height, imageops::FilterType::Lanczos3))
}

/// Получить фон сцены: пользовательское изображение или градиент темы
///
/// При ошибке чтения пользовательского файла выполняется откат на градиент.
pub fn scene_background(
    bg_image: Option<&Path>,
    width: u32,
    height: u32,
    theme: Theme,
) -> RgbImage {
    if let Some(path) = bg_image {
        match load_background(path, width, height) {
            Ok(img) => return img,
            Err(e) => {
                log::warn!(
                    "Failed to load background image {}, falling back to gradient: {}",
                    path.display(),
                    e
                );
            }
        }
    }

    gradient_background(width, height, theme)
}

/// Сохранить кадр в PNG
pub fn save_png(img: &RgbImage, path: &Path) -> Result<()> {
    img.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_dimensions_and_stops() {
        let img = gradient_background(32, 64, Theme::Dark);
        assert_eq!(img.dimensions(), (32, 64));

        let (c1, c2) = Theme::Dark.gradient_stops();
        assert_eq!(img.get_pixel(0, 0).0, c1);
        assert_eq!(img.get_pixel(31, 63).0, c2);
    }

    #[test]
    fn test_gradient_is_monotonic() {
        let img = gradient_background(4, 100, Theme::Earth);
        // Зеленая компонента темы Earth растет сверху вниз
        let top = img.get_pixel(0, 0).0[1];
        let mid = img.get_pixel(0, 50).0[1];
        let bottom = img.get_pixel(0, 99).0[1];
        assert!(top <= mid && mid <= bottom);
    }

    #[test]
    fn test_scene_background_falls_back_on_missing_file() {
        let missing = Path::new("/nonexistent/background.png");
        let img = scene_background(Some(missing), 16, 16, Theme::Sunset);
        assert_eq!(img.dimensions(), (16, 16));

        let (c1, _) = Theme::Sunset.gradient_stops();
        assert_eq!(img.get_pixel(0, 0).0, c1);
    }

    #[test]
    fn test_load_background_resizes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bg.png");

        let src = RgbImage::from_pixel(8, 8, Rgb([200, 10, 10]));
        save_png(&src, &path).unwrap();

        let loaded = load_background(&path, 20, 10).unwrap();
        assert_eq!(loaded.dimensions(), (20, 10));
    }
}
