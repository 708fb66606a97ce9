//! Модуль для кэширования результатов TTS
//!
//! Этот модуль содержит функции для кэширования результатов генерации речи.

use std::fs;
use std::path::{Path, PathBuf};
use crate::config::Script2VideoConfig;
use crate::error::Result;

/// Структура для управления кэшем
pub struct TtsCache {
    /// Директория для кэша
    cache_dir: PathBuf,
    /// Максимальный размер кэша в байтах
    max_size: Option<u64>,
}

impl TtsCache {
    /// Создать новый экземпляр TtsCache
    pub fn new(config: &Script2VideoConfig) -> Result<Self> {
        let cache_dir = if let Some(dir) = &config.cache_dir {
            PathBuf::from(dir)
        } else {
            std::env::temp_dir().join("script2video-cache")
        };

        if !cache_dir.exists() {
            fs::create_dir_all(&cache_dir)?;
        }

        Ok(Self {
            cache_dir,
            max_size: config.max_cache_size,
        })
    }

    /// Получить путь к кэшированному файлу, если он существует
    pub fn get_cached_file(&self, text: &str, model: &str, voice: &str) -> Option<PathBuf> {
        let path = self.cached_path(text, model, voice);
        if path.exists() {
            log::debug!("TTS cache hit: {}", path.display());
            Some(path)
        } else {
            None
        }
    }

    /// Добавить файл в кэш
    pub fn add_to_cache(&self, text: &str, model: &str, voice: &str, file_path: &Path) -> Result<PathBuf> {
        let cache_file = self.cached_path(text, model, voice);
        fs::copy(file_path, &cache_file)?;

        self.check_cache_size()?;

        Ok(cache_file)
    }

    /// Очистить кэш
    pub fn clear_cache(&self) -> Result<()> {
        for file in fs::read_dir(&self.cache_dir)? {
            let file = file?;
            if file.file_type()?.is_file() {
                fs::remove_file(file.path())?;
            }
        }

        Ok(())
    }

    /// Путь к файлу кэша для заданных параметров генерации
    fn cached_path(&self, text: &str, model: &str, voice: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.mp3", generate_cache_key(text, model, voice)))
    }

    /// Проверить размер кэша и удалить старые файлы при превышении
    fn check_cache_size(&self) -> Result<()> {
        if let Some(max_size) = self.max_size {
            let mut total_size = 0;
            let mut files = Vec::new();

            for entry in fs::read_dir(&self.cache_dir)? {
                let entry = entry?;
                if entry.file_type()?.is_file() {
                    let metadata = entry.metadata()?;
                    total_size += metadata.len();
                    files.push((entry.path(), metadata.modified()?));
                }
            }

            if total_size > max_size {
                // Удаляем файлы от старых к новым, пока размер не уложится в лимит
                files.sort_by(|a, b| a.1.cmp(&b.1));

                for (path, _) in files {
                    if total_size <= max_size {
                        break;
                    }

                    if let Ok(metadata) = fs::metadata(&path) {
                        total_size -= metadata.len();
                        fs::remove_file(path)?;
                    }
                }
            }
        }

        Ok(())
    }
}

/// Генерировать ключ кэша из текста и параметров голоса
fn generate_cache_key(text: &str, model: &str, voice: &str) -> String {
    let mut hasher = md5::Context::new();
    hasher.consume(text.as_bytes());
    hasher.consume(model.as_bytes());
    hasher.consume(voice.as_bytes());

    format!("{:x}", hasher.compute())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(cache_dir: &Path) -> Script2VideoConfig {
        Script2VideoConfig {
            cache_dir: Some(cache_dir.to_string_lossy().to_string()),
            ..Script2VideoConfig::default()
        }
    }

    #[test]
    fn test_cache_key_depends_on_all_parts() {
        let a = generate_cache_key("hello", "tts-1", "nova");
        let b = generate_cache_key("hello", "tts-1", "onyx");
        let c = generate_cache_key("hello", "tts-1-hd", "nova");
        let d = generate_cache_key("hello!", "tts-1", "nova");
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
        assert_eq!(a, generate_cache_key("hello", "tts-1", "nova"));
    }

    #[test]
    fn test_cache_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = TtsCache::new(&test_config(dir.path())).unwrap();

        assert!(cache.get_cached_file("text", "tts-1", "nova").is_none());

        let source = dir.path().join("source.mp3");
        fs::write(&source, b"fake mp3 data").unwrap();

        let cached = cache.add_to_cache("text", "tts-1", "nova", &source).unwrap();
        assert!(cached.exists());

        let hit = cache.get_cached_file("text", "tts-1", "nova").unwrap();
        assert_eq!(hit, cached);
        assert_eq!(fs::read(&hit).unwrap(), b"fake mp3 data");
    }

    #[test]
    fn test_cache_eviction_keeps_size_bounded() {
        let cache_dir = tempfile::tempdir().unwrap();
        let source_dir = tempfile::tempdir().unwrap();
        let mut config = test_config(cache_dir.path());
        config.max_cache_size = Some(16);

        let cache = TtsCache::new(&config).unwrap();

        let source = source_dir.path().join("source.mp3");
        fs::write(&source, vec![0u8; 10]).unwrap();

        cache.add_to_cache("one", "tts-1", "nova", &source).unwrap();
        cache.add_to_cache("two", "tts-1", "nova", &source).unwrap();
        cache.add_to_cache("three", "tts-1", "nova", &source).unwrap();

        let total: u64 = fs::read_dir(cache.cache_dir.clone())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter_map(|e| e.metadata().ok())
            .filter(|m| m.is_file())
            .map(|m| m.len())
            .sum();
        assert!(total <= 16);
    }
}
