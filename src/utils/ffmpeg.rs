//! Модуль для работы с FFmpeg
//!
//! Этот модуль содержит функции для запуска FFmpeg и FFprobe.

use std::process::Command;
use crate::error::{Result, Script2VideoError};

/// Проверка наличия FFmpeg
pub fn check_ffmpeg_installed() -> bool {
    let output = Command::new("ffmpeg")
        .arg("-version")
        .output();

    match output {
        Ok(out) => out.status.success(),
        Err(_) => false,
    }
}

/// Получение версии FFmpeg
pub fn get_ffmpeg_version() -> Result<String> {
    let output = Command::new("ffmpeg")
        .arg("-version")
        .output()?;

    if !output.status.success() {
        return Err(Script2VideoError::Ffmpeg(
            "Failed to get FFmpeg version".to_string(),
        ));
    }

    let version_str = String::from_utf8_lossy(&output.stdout);
    let first_line = version_str.lines().next().unwrap_or("");

    Ok(first_line.to_string())
}

/// Запуск команды FFmpeg
///
/// Вывод stderr захватывается и включается в ошибку при неуспешном завершении.
pub fn run_ffmpeg_command(args: &[&str]) -> Result<()> {
    log::debug!("Running ffmpeg {}", args.join(" "));

    let output = Command::new("ffmpeg")
        .args(args)
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let tail = last_lines(&stderr, 5);
        return Err(Script2VideoError::Ffmpeg(format!(
            "FFmpeg command failed with status {}: {}",
            output.status, tail
        )));
    }

    Ok(())
}

/// Запуск команды FFprobe
pub fn run_ffprobe_command(args: &[&str]) -> Result<String> {
    log::debug!("Running ffprobe {}", args.join(" "));

    let output = Command::new("ffprobe")
        .args(args)
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let tail = last_lines(&stderr, 5);
        return Err(Script2VideoError::Ffmpeg(format!(
            "FFprobe command failed with status {}: {}",
            output.status, tail
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Последние строки вывода для диагностики
fn last_lines(text: &str, count: usize) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(count);
    lines[start..].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_lines() {
        let text = "one\ntwo\nthree\nfour";
        assert_eq!(last_lines(text, 2), "three\nfour");
        assert_eq!(last_lines(text, 10), text);
        assert_eq!(last_lines("", 3), "");
    }
}
