//! Модуль обработки аудио
//!
//! Этот модуль содержит декодирование/кодирование аудио и наивный time-stretch.

pub mod format;
pub mod stretch;
