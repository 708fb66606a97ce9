//! Модуль композиции кадров
//!
//! Этот модуль содержит отрисовку фонов, подписей и подготовку логотипа.

pub mod background;
pub mod caption;
pub mod logo;
