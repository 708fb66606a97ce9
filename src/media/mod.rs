//! Модуль сборки видео
//!
//! Этот модуль содержит функции для сборки и кодирования итогового видео.

pub mod video;
