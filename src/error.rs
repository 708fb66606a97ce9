//! Модуль обработки ошибок библиотеки script2video
//!
//! Этот модуль содержит типы ошибок, которые могут возникнуть при работе библиотеки.

use thiserror::Error;

/// Ошибки библиотеки script2video
#[derive(Debug, Error)]
pub enum Script2VideoError {
    /// Ошибка HTTP запроса
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Ошибка ввода-вывода
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Ошибка сериализации/десериализации JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Ошибка обработки изображений
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Ошибка WAV-кодирования
    #[error("WAV encoding error: {0}")]
    WavEncoding(#[from] hound::Error),

    /// Ошибка WAV-декодирования
    #[error("WAV decoding error: {0}")]
    WavDecoding(hound::Error),

    /// Ошибка разбиения сценария
    #[error("Script splitting error: {0}")]
    ScriptSplitting(String),

    /// Ошибка генерации TTS
    #[error("TTS generation error: {0}")]
    TtsGeneration(String),

    /// Ошибка обработки аудио
    #[error("Audio processing error: {0}")]
    AudioProcessing(String),

    /// Ошибка time-stretching
    #[error("Time stretching error: {0}")]
    TimeStretching(String),

    /// Ошибка композиции кадра
    #[error("Frame composition error: {0}")]
    FrameComposition(String),

    /// Ошибка сборки видео
    #[error("Video assembly error: {0}")]
    VideoAssembly(String),

    /// Ошибка генерации субтитров
    #[error("Subtitle generation error: {0}")]
    SubtitleGeneration(String),

    /// Ошибка выполнения FFmpeg
    #[error("FFmpeg error: {0}")]
    Ffmpeg(String),

    /// Ошибка конфигурации
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Файл не найден
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Другая ошибка
    #[error("Other error: {0}")]
    Other(String),
}

impl From<&str> for Script2VideoError {
    fn from(s: &str) -> Self {
        Script2VideoError::Other(s.to_string())
    }
}

impl From<String> for Script2VideoError {
    fn from(s: String) -> Self {
        Script2VideoError::Other(s)
    }
}

/// Тип Result для библиотеки script2video
pub type Result<T> = std::result::Result<T, Script2VideoError>;
