//! Модуль конфигурации библиотеки script2video
//!
//! Этот модуль содержит структуры и перечисления для настройки библиотеки.

use std::path::PathBuf;
use serde::{Deserialize, Serialize};

/// Модель TTS для использования с OpenAI API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum TtsModel {
    /// Стандартная модель
    Standard,
    /// Модель высокого качества
    HighDefinition,
}

impl Default for TtsModel {
    fn default() -> Self {
        Self::Standard
    }
}

impl TtsModel {
    /// Получить строковое представление модели
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "tts-1",
            Self::HighDefinition => "tts-1-hd",
        }
    }

    /// Получить модель по имени
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "standard" | "tts-1" => Some(Self::Standard),
            "hd" | "tts-1-hd" => Some(Self::HighDefinition),
            _ => None,
        }
    }
}

/// Голос для использования с OpenAI API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum TtsVoice {
    /// Голос Alloy
    Alloy,
    /// Голос Echo
    Echo,
    /// Голос Fable
    Fable,
    /// Голос Onyx
    Onyx,
    /// Голос Nova
    Nova,
    /// Голос Shimmer
    Shimmer,
}

impl Default for TtsVoice {
    fn default() -> Self {
        Self::Nova
    }
}

impl TtsVoice {
    /// Получить строковое представление голоса
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alloy => "alloy",
            Self::Echo => "echo",
            Self::Fable => "fable",
            Self::Onyx => "onyx",
            Self::Nova => "nova",
            Self::Shimmer => "shimmer",
        }
    }

    /// Получить голос по имени
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "alloy" => Some(Self::Alloy),
            "echo" => Some(Self::Echo),
            "fable" => Some(Self::Fable),
            "onyx" => Some(Self::Onyx),
            "nova" => Some(Self::Nova),
            "shimmer" => Some(Self::Shimmer),
            _ => None,
        }
    }
}

/// Цветовая тема градиентного фона
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Theme {
    /// Тёмная тема
    Dark,
    /// Светлая тема
    Light,
    /// Земляные тона
    Earth,
    /// Фиолетовая тема
    Purple,
    /// Закат
    Sunset,
}

impl Default for Theme {
    fn default() -> Self {
        Self::Dark
    }
}

impl Theme {
    /// Получить строковое представление темы
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::Earth => "earth",
            Self::Purple => "purple",
            Self::Sunset => "sunset",
        }
    }

    /// Получить тему по имени
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            "earth" => Some(Self::Earth),
            "purple" => Some(Self::Purple),
            "sunset" => Some(Self::Sunset),
            _ => None,
        }
    }

    /// Получить пару опорных цветов вертикального градиента (верх, низ)
    pub fn gradient_stops(&self) -> ([u8; 3], [u8; 3]) {
        match self {
            Self::Dark => ([15, 23, 42], [30, 41, 59]),
            Self::Light => ([245, 246, 248], [225, 229, 235]),
            Self::Earth => ([39, 57, 47], [98, 125, 103]),
            Self::Purple => ([45, 23, 66], [109, 74, 147]),
            Self::Sunset => ([255, 94, 98], [255, 195, 113]),
        }
    }
}

/// Формат кадра итогового видео
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AspectRatio {
    /// Горизонтальный формат 16:9 (1920x1080)
    Landscape,
    /// Вертикальный формат 9:16 (1080x1920)
    Portrait,
    /// Квадратный формат 1:1 (1080x1080)
    Square,
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::Landscape
    }
}

impl AspectRatio {
    /// Получить строковое представление формата
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Landscape => "16:9",
            Self::Portrait => "9:16",
            Self::Square => "1:1",
        }
    }

    /// Получить формат по имени
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "16:9" | "landscape" => Some(Self::Landscape),
            "9:16" | "portrait" => Some(Self::Portrait),
            "1:1" | "square" => Some(Self::Square),
            _ => None,
        }
    }

    /// Получить размеры кадра в пикселях (ширина, высота)
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Landscape => (1920, 1080),
            Self::Portrait => (1080, 1920),
            Self::Square => (1080, 1080),
        }
    }
}

/// Конфигурация библиотеки
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script2VideoConfig {
    /// API ключ для OpenAI
    pub openai_api_key: String,
    /// Модель TTS
    pub tts_model: TtsModel,
    /// Голос TTS
    pub tts_voice: TtsVoice,
    /// Скорость речи (наивный time-stretch через ресемплинг)
    pub speech_speed: f64,
    /// Тема градиентного фона
    pub theme: Theme,
    /// Формат кадра
    pub aspect_ratio: AspectRatio,
    /// Отступ текстового блока в пикселях
    pub padding_px: u32,
    /// Путь к файлу шрифта (.ttf); при None используются системные шрифты
    pub font_path: Option<PathBuf>,
    /// Размер шрифта как доля высоты кадра
    pub font_size_pct: f64,
    /// Непрозрачность подложки текста (0-255)
    pub text_box_opacity: u8,
    /// Межстрочный интервал (множитель размера шрифта)
    pub line_spacing: f64,
    /// Частота кадров итогового видео
    pub fps: u32,
    /// Битрейт видео для кодирования
    pub video_bitrate: String,
    /// Длительность плавного перехода между сценами в секундах
    pub fade_duration: f64,
    /// Фоновые изображения, назначаемые сценам по порядку
    pub background_images: Vec<PathBuf>,
    /// Путь к логотипу (PNG с прозрачностью)
    pub logo_path: Option<PathBuf>,
    /// Генерировать SRT-субтитры
    pub generate_srt: bool,
    /// Использовать кэширование TTS
    pub use_caching: bool,
    /// Директория для кэша
    pub cache_dir: Option<String>,
    /// Максимальный размер кэша в байтах
    pub max_cache_size: Option<u64>,
    /// Удалять временные файлы после завершения
    pub cleanup_temp_files: bool,
}

impl Default for Script2VideoConfig {
    fn default() -> Self {
        Self {
            openai_api_key: String::new(),
            tts_model: TtsModel::default(),
            tts_voice: TtsVoice::default(),
            speech_speed: 1.0,
            theme: Theme::default(),
            aspect_ratio: AspectRatio::default(),
            padding_px: 40,
            font_path: None,
            font_size_pct: 0.065,
            text_box_opacity: 140,
            line_spacing: 1.2,
            fps: 30,
            video_bitrate: "4000k".to_string(),
            fade_duration: 0.4,
            background_images: Vec::new(),
            logo_path: None,
            generate_srt: true,
            use_caching: true,
            cache_dir: None,
            max_cache_size: Some(1024 * 1024 * 1024), // 1 GB
            cleanup_temp_files: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_and_voice_names() {
        assert_eq!(TtsModel::Standard.as_str(), "tts-1");
        assert_eq!(TtsModel::from_name("hd"), Some(TtsModel::HighDefinition));
        assert_eq!(TtsVoice::from_name("ONYX"), Some(TtsVoice::Onyx));
        assert_eq!(TtsVoice::from_name("unknown"), None);
    }

    #[test]
    fn test_aspect_dimensions() {
        assert_eq!(AspectRatio::Landscape.dimensions(), (1920, 1080));
        assert_eq!(AspectRatio::Portrait.dimensions(), (1080, 1920));
        assert_eq!(AspectRatio::from_name("1:1"), Some(AspectRatio::Square));
    }

    #[test]
    fn test_theme_stops() {
        let (top, bottom) = Theme::Dark.gradient_stops();
        assert_eq!(top, [15, 23, 42]);
        assert_eq!(bottom, [30, 41, 59]);
        assert_eq!(Theme::from_name("sunset"), Some(Theme::Sunset));
    }
}
