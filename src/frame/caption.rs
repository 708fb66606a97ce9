//! Модуль отрисовки подписей
//!
//! Этот модуль выполняет перенос текста, расчет текстового блока и
//! наложение подписи на фоновый кадр через фильтры FFmpeg (drawbox/drawtext).

use std::path::{Path, PathBuf};

use crate::config::Script2VideoConfig;
use crate::error::Result;
use crate::utils::ffmpeg::run_ffmpeg_command;
use crate::utils::temp::TempFileManager;

/// Минимальный размер шрифта в пикселях
const MIN_FONT_SIZE: u32 = 18;

/// Минимальное количество символов в строке
const MIN_CHARS_PER_LINE: usize = 10;

/// Оценка средней ширины глифа как доли размера шрифта
const AVG_CHAR_WIDTH_FACTOR: f64 = 0.56;

/// Известные пути системных шрифтов
const FONT_CANDIDATES: [&str; 5] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:/Windows/Fonts/arial.ttf",
];

/// Найти файл шрифта: явный путь либо один из системных кандидатов
pub fn find_font(custom_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = custom_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
        log::warn!("Custom font {} not found, probing system fonts", path.display());
    }

    for candidate in FONT_CANDIDATES {
        let path = Path::new(candidate);
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    None
}

/// Жадный перенос слов по максимальному количеству символов в строке
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Раскладка текстового блока подписи
#[derive(Debug, Clone)]
pub struct CaptionLayout {
    /// Строки текста после переноса
    pub lines: Vec<String>,
    /// Размер шрифта в пикселях
    pub font_size: u32,
    /// Высота строки в пикселях
    pub line_height: u32,
    /// Координата X подложки
    pub box_x: u32,
    /// Координата Y подложки
    pub box_y: u32,
    /// Ширина подложки
    pub box_width: u32,
    /// Высота подложки
    pub box_height: u32,
    /// Координата Y первой строки текста
    pub text_y: u32,
}

/// Рассчитать раскладку подписи для кадра заданного размера
pub fn layout_caption(text: &str, width: u32, height: u32, config: &Script2VideoConfig) -> CaptionLayout {
    let padding = config.padding_px;

    let font_size = ((height as f64 * config.font_size_pct) as u32).max(MIN_FONT_SIZE);
    let avg_char_width = font_size as f64 * AVG_CHAR_WIDTH_FACTOR;

    let usable_width = width.saturating_sub(2 * padding).max(1);
    let max_chars = ((usable_width as f64 / avg_char_width) as usize).max(MIN_CHARS_PER_LINE);

    let lines = wrap_text(text, max_chars);
    let line_height = (font_size as f64 * config.line_spacing) as u32;

    let longest_line = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let text_width = ((longest_line as f64 * avg_char_width) as u32).min(usable_width);
    let text_height = lines.len() as u32 * line_height;

    let box_width = (text_width + 2 * padding).min(width);
    let box_height = (text_height + 2 * padding).min(height);
    let box_x = (width - box_width) / 2;
    let box_y = (height - box_height) / 2;
    let text_y = box_y + padding;

    CaptionLayout {
        lines,
        font_size,
        line_height,
        box_x,
        box_y,
        box_width,
        box_height,
        text_y,
    }
}

/// Экранировать значение опции внутри строки фильтра FFmpeg
///
/// Двоеточия, запятые и кавычки являются разделителями в графе фильтров.
pub fn escape_filter_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' | ':' | ',' | ';' | '[' | ']' | '\'' | '=' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Построить строку видеофильтра для подложки и строк подписи
///
/// Текст передается через временные textfile, чтобы не экранировать его содержимое.
fn build_caption_filter(
    layout: &CaptionLayout,
    line_files: &[PathBuf],
    font_path: Option<&Path>,
    opacity: u8,
) -> String {
    let mut filters = Vec::with_capacity(layout.lines.len() + 1);

    filters.push(format!(
        "drawbox=x={}:y={}:w={}:h={}:color=black@{:.2}:t=fill",
        layout.box_x,
        layout.box_y,
        layout.box_width,
        layout.box_height,
        opacity as f64 / 255.0,
    ));

    let font_option = font_path
        .map(|p| format!(":fontfile={}", escape_filter_value(&p.to_string_lossy())))
        .unwrap_or_default();

    for (i, file) in line_files.iter().enumerate() {
        let y = layout.text_y + i as u32 * layout.line_height;
        filters.push(format!(
            "drawtext=textfile={}{}:fontsize={}:fontcolor=white:x=(w-text_w)/2:y={}",
            escape_filter_value(&file.to_string_lossy()),
            font_option,
            layout.font_size,
            y,
        ));
    }

    filters.join(",")
}

/// Наложить подпись на фоновый кадр
///
/// Запускает FFmpeg с фильтрами drawbox/drawtext и записывает итоговый PNG.
pub fn compose_caption(
    background_png: &Path,
    layout: &CaptionLayout,
    config: &Script2VideoConfig,
    temp: &mut TempFileManager,
    output_png: &Path,
) -> Result<()> {
    let font_path = find_font(config.font_path.as_deref());
    if font_path.is_none() {
        log::warn!("No font file found, drawtext will use the fontconfig default");
    }

    // Каждая строка уходит в свой textfile
    let mut line_files = Vec::with_capacity(layout.lines.len());
    for line in &layout.lines {
        let file = temp.write_temp_file("caption_line", "txt", line.as_bytes())?;
        line_files.push(file);
    }

    let filter = build_caption_filter(layout, &line_files, font_path.as_deref(), config.text_box_opacity);

    let background = background_png.to_string_lossy().to_string();
    let output = output_png.to_string_lossy().to_string();
    let args = vec![
        "-i", background.as_str(),
        "-vf", filter.as_str(),
        "-frames:v", "1",
        "-update", "1",
        "-y", output.as_str(),
    ];

    run_ffmpeg_command(&args)?;
    log::debug!("Composed caption frame: {}", output_png.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_respects_width() {
        let lines = wrap_text("a quick brown fox jumps over the lazy dog", 12);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.chars().count() <= 12);
        }
        // Переносы не теряют слова
        assert_eq!(lines.join(" "), "a quick brown fox jumps over the lazy dog");
    }

    #[test]
    fn test_wrap_text_long_word_stands_alone() {
        let lines = wrap_text("hi pneumonoultramicroscopic hi", 10);
        assert_eq!(lines[0], "hi");
        assert_eq!(lines[1], "pneumonoultramicroscopic");
        assert_eq!(lines[2], "hi");
    }

    #[test]
    fn test_layout_is_centered() {
        let config = Script2VideoConfig::default();
        let layout = layout_caption("Hello world", 1920, 1080, &config);

        assert!(!layout.lines.is_empty());
        assert!(layout.font_size >= MIN_FONT_SIZE);
        // Подложка симметрична по горизонтали (с точностью до пикселя округления)
        let right_margin = 1920 - layout.box_x - layout.box_width;
        assert!(layout.box_x.abs_diff(right_margin) <= 1);
        assert!(layout.box_y + layout.box_height <= 1080);
        assert_eq!(layout.text_y, layout.box_y + config.padding_px);
    }

    #[test]
    fn test_layout_small_frame_enforces_minimums() {
        let config = Script2VideoConfig::default();
        let layout = layout_caption("tiny", 120, 90, &config);
        assert_eq!(layout.font_size, MIN_FONT_SIZE);
        assert!(layout.box_width <= 120);
        assert!(layout.box_height <= 90);
    }

    #[test]
    fn test_escape_filter_value() {
        assert_eq!(
            escape_filter_value("C:/Windows/Fonts/arial.ttf"),
            "C\\:/Windows/Fonts/arial.ttf"
        );
        assert_eq!(escape_filter_value("a,b;c"), "a\\,b\\;c");
        assert_eq!(escape_filter_value("plain/path.txt"), "plain/path.txt");
    }

    #[test]
    fn test_caption_filter_contains_all_lines() {
        let config = Script2VideoConfig::default();
        let layout = layout_caption(
            "first words of a rather long caption that needs wrapping across lines",
            640,
            480,
            &config,
        );
        let files: Vec<PathBuf> = (0..layout.lines.len())
            .map(|i| PathBuf::from(format!("/tmp/line_{}.txt", i)))
            .collect();

        let filter = build_caption_filter(&layout, &files, None, config.text_box_opacity);

        assert!(filter.starts_with("drawbox="));
        assert_eq!(filter.matches("drawtext=").count(), layout.lines.len());
        assert!(filter.contains("x=(w-text_w)/2"));
        assert!(!filter.contains("fontfile"));

        let with_font = build_caption_filter(
            &layout,
            &files,
            Some(Path::new("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf")),
            config.text_box_opacity,
        );
        assert!(with_font.contains("fontfile=/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"));
    }
}
