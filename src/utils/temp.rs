//! Модуль для работы с временными файлами
//!
//! Этот модуль содержит менеджер временных файлов рабочей сессии.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use crate::error::Result;

/// Менеджер временных файлов
pub struct TempFileManager {
    /// Временная директория сессии
    temp_dir: TempDir,
    /// Список созданных файлов
    files: Vec<PathBuf>,
    /// Нужно ли удалять файлы при завершении
    cleanup: bool,
}

impl TempFileManager {
    /// Создать новый экземпляр TempFileManager
    pub fn new(cleanup: bool) -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;

        Ok(Self {
            temp_dir,
            files: Vec::new(),
            cleanup,
        })
    }

    /// Создать временный файл с уникальным именем
    pub fn create_temp_file(&mut self, prefix: &str, extension: &str) -> Result<PathBuf> {
        let file_name = format!("{}_{}.{}", prefix, uuid::Uuid::new_v4().simple(), extension);
        let file_path = self.temp_dir.path().join(file_name);

        fs::File::create(&file_path)?;

        self.files.push(file_path.clone());

        Ok(file_path)
    }

    /// Создать временный файл и записать в него данные
    pub fn write_temp_file(&mut self, prefix: &str, extension: &str, data: &[u8]) -> Result<PathBuf> {
        let file_path = self.create_temp_file(prefix, extension)?;
        fs::write(&file_path, data)?;
        Ok(file_path)
    }

    /// Получить путь к временной директории
    pub fn temp_dir_path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Очистить временные файлы
    pub fn cleanup(&mut self) -> Result<()> {
        if self.cleanup {
            for file in &self.files {
                if file.exists() {
                    fs::remove_file(file)?;
                }
            }

            self.files.clear();
        }

        Ok(())
    }
}

impl Drop for TempFileManager {
    fn drop(&mut self) {
        // Пытаемся очистить файлы при уничтожении объекта
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_temp_file() {
        let mut manager = TempFileManager::new(true).unwrap();
        let file = manager.create_temp_file("frame", "png").unwrap();

        assert!(file.exists());
        assert!(file.starts_with(manager.temp_dir_path()));
        assert_eq!(file.extension().and_then(|e| e.to_str()), Some("png"));
    }

    #[test]
    fn test_write_temp_file() {
        let mut manager = TempFileManager::new(true).unwrap();
        let file = manager.write_temp_file("caption_line", "txt", b"Hello").unwrap();

        assert_eq!(fs::read(&file).unwrap(), b"Hello");
    }

    #[test]
    fn test_cleanup_removes_files() {
        let mut manager = TempFileManager::new(true).unwrap();
        let file = manager.create_temp_file("scene_audio", "wav").unwrap();
        assert!(file.exists());

        manager.cleanup().unwrap();
        assert!(!file.exists());
    }

    #[test]
    fn test_cleanup_disabled_keeps_files() {
        let mut manager = TempFileManager::new(false).unwrap();
        let file = manager.create_temp_file("clip", "mp4").unwrap();

        manager.cleanup().unwrap();
        assert!(file.exists());
    }
}
