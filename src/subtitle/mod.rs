//! Модуль субтитров
//!
//! Этот модуль содержит генерацию SRT-субтитров по длительностям сцен.

pub mod srt;
