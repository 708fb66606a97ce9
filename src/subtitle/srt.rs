//! Модуль генерации SRT-субтитров
//!
//! Этот модуль накапливает длительности сцен в таймкоды и сериализует
//! записи в стандартный формат SRT.

use std::path::Path;

use crate::error::Result;
use crate::Scene;

/// Форматировать время в секундах как таймкод SRT (HH:MM:SS,mmm)
pub fn format_timestamp(seconds: f64) -> String {
    let mut ms = (seconds * 1000.0).round() as u64;

    let hours = ms / 3_600_000;
    ms -= hours * 3_600_000;
    let minutes = ms / 60_000;
    ms -= minutes * 60_000;
    let secs = ms / 1000;
    ms -= secs * 1000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, ms)
}

/// Сериализовать сцены в текст SRT
///
/// Таймкоды накапливаются от нуля по длительностям сцен; переводы строк
/// внутри текста сцены заменяются пробелами.
pub fn render_srt(scenes: &[Scene]) -> String {
    let mut t = 0.0;
    let mut entries = Vec::with_capacity(scenes.len());

    for (idx, scene) in scenes.iter().enumerate() {
        let start = format_timestamp(t);
        let end = format_timestamp(t + scene.duration);
        let text = scene.text.trim().replace('\n', " ");

        entries.push(format!("{}\n{} --> {}\n{}\n", idx + 1, start, end, text));
        t += scene.duration;
    }

    entries.join("\n")
}

/// Записать SRT-файл для списка сцен
pub fn write_srt(scenes: &[Scene], srt_path: &Path) -> Result<()> {
    let content = render_srt(scenes);
    std::fs::write(srt_path, content)?;

    log::info!("Saved subtitles: {}", srt_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scene(text: &str, duration: f64) -> Scene {
        Scene {
            text: text.to_string(),
            frame_path: PathBuf::from("/tmp/frame.png"),
            audio_path: PathBuf::from("/tmp/audio.wav"),
            duration,
        }
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "00:00:00,000");
        assert_eq!(format_timestamp(1.5), "00:00:01,500");
        assert_eq!(format_timestamp(61.25), "00:01:01,250");
        assert_eq!(format_timestamp(3661.007), "01:01:01,007");
    }

    #[test]
    fn test_format_timestamp_rounds_milliseconds() {
        // 59.9995 округляется вверх до полной минуты
        assert_eq!(format_timestamp(59.9995), "00:01:00,000");
        assert_eq!(format_timestamp(0.0004), "00:00:00,000");
    }

    #[test]
    fn test_render_srt_accumulates_durations() {
        let scenes = vec![
            scene("First scene", 2.5),
            scene("Second scene", 3.0),
            scene("Third scene", 1.25),
        ];

        let srt = render_srt(&scenes);
        let expected = "1\n00:00:00,000 --> 00:00:02,500\nFirst scene\n\n\
                        2\n00:00:02,500 --> 00:00:05,500\nSecond scene\n\n\
                        3\n00:00:05,500 --> 00:00:06,750\nThird scene\n";
        assert_eq!(srt, expected);
    }

    #[test]
    fn test_render_srt_flattens_newlines() {
        let scenes = vec![scene("line one\nline two", 1.0)];
        let srt = render_srt(&scenes);
        assert!(srt.contains("line one line two"));
        assert!(!srt.contains("one\nline"));
    }

    #[test]
    fn test_write_srt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("captions.srt");

        write_srt(&[scene("Hello", 1.0)], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("1\n00:00:00,000 --> 00:00:01,000\nHello"));
    }

    #[test]
    fn test_render_srt_empty() {
        assert_eq!(render_srt(&[]), "");
    }
}
