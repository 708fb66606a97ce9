//! Модуль для интеграции с OpenAI API
//!
//! Этот модуль содержит функции для генерации речи с использованием OpenAI API.

use std::path::Path;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Client;
use crate::config::Script2VideoConfig;
use crate::error::{Result, Script2VideoError};

lazy_static! {
    static ref HTML_TAG_REGEX: Regex = Regex::new(r"<[^>]*>").unwrap();
}

/// Подготовка текста сцены для TTS
///
/// Удаляет HTML-теги, декодирует распространенные сущности и нормализует пробелы.
pub fn prepare_text_for_tts(text: &str) -> String {
    let text = HTML_TAG_REGEX.replace_all(text, "");

    let text = text
        .to_string()
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&apos;", "'");

    text.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Проверка API ключа тестовым запросом к OpenAI
pub async fn validate_api_key(client: &Client, api_key: &str) -> Result<()> {
    if api_key.trim().is_empty() {
        log::error!("OpenAI API key is empty");
        return Err(Script2VideoError::Configuration(
            "OpenAI API key is required for TTS generation".to_string(),
        ));
    }

    log::debug!("Making test request to OpenAI API to validate key...");
    let response = client
        .get("https://api.openai.com/v1/models")
        .header("Authorization", format!("Bearer {}", api_key))
        .send()
        .await;

    match response {
        Ok(response) if !response.status().is_success() => {
            let status = response.status();
            let error_text = match response.text().await {
                Ok(text) => text,
                Err(e) => format!("Failed to read error response: {}", e),
            };
            log::error!("OpenAI API key validation failed (status {}): {}", status, error_text);
            Err(Script2VideoError::Configuration(format!(
                "Invalid OpenAI API key: {} (status {})",
                error_text, status
            )))
        }
        Err(e) => {
            log::error!("Failed to validate OpenAI API key: {}", e);
            Err(Script2VideoError::Configuration(format!(
                "Failed to validate OpenAI API key: {}",
                e
            )))
        }
        Ok(_) => {
            log::info!("OpenAI API key validated successfully");
            Ok(())
        }
    }
}

/// Генерация речи для одного блока сцены
///
/// Отправляет запрос к OpenAI API и сохраняет полученный mp3 в указанный файл.
/// Скорость всегда 1.0: изменение темпа выполняется локально через ресемплинг.
pub async fn synthesize_block(
    client: &Client,
    text: &str,
    config: &Script2VideoConfig,
    output_path: &Path,
) -> Result<()> {
    log::info!("Sending TTS request to OpenAI API ({} chars)", text.len());

    let response = client
        .post("https://api.openai.com/v1/audio/speech")
        .header("Authorization", format!("Bearer {}", config.openai_api_key))
        .header("Content-Type", "application/json")
        .json(&serde_json::json!({
            "model": config.tts_model.as_str(),
            "voice": config.tts_voice.as_str(),
            "input": text,
            "response_format": "mp3",
            "speed": 1.0
        }))
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = match response.text().await {
            Ok(text) => text,
            Err(e) => format!("Failed to read error response: {}", e),
        };
        log::error!("OpenAI API error (status {}): {}", status, error_text);
        return Err(Script2VideoError::TtsGeneration(format!(
            "OpenAI API error (status {}): {}",
            status, error_text
        )));
    }

    let bytes = response.bytes().await?;
    if bytes.is_empty() {
        log::error!("Received empty TTS response");
        return Err(Script2VideoError::TtsGeneration(
            "Received empty response from OpenAI API".to_string(),
        ));
    }

    tokio::fs::write(output_path, &bytes).await?;
    log::info!("Saved TTS audio to {}", output_path.display());

    Ok(())
}
