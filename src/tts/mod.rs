//! Модуль генерации речи
//!
//! Этот модуль содержит интеграцию с OpenAI API и кэширование результатов TTS.

pub mod openai;
pub mod cache;
