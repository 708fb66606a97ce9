//! Вспомогательные модули
//!
//! Этот модуль содержит обертки над FFmpeg и работу с временными файлами.

pub mod ffmpeg;
pub mod temp;
