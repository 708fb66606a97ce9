//! Основной файл библиотеки script2video с поддержкой системы прогресса
//!
//! Эта библиотека превращает текстовый сценарий в озвученное слайдшоу-видео:
//! каждый абзац становится сценой с синтезированной речью, фоновым кадром,
//! центрированной подписью и плавными переходами между сценами.

pub mod progress;
pub mod notification;
pub mod config;
pub mod error;
pub mod script;
pub mod tts;
pub mod audio;
pub mod frame;
pub mod media;
pub mod subtitle;
pub mod utils;

use std::path::{Path, PathBuf};

pub use crate::config::{AspectRatio, Script2VideoConfig, Theme, TtsModel, TtsVoice};
pub use crate::error::{Result, Script2VideoError};
use crate::progress::{ProcessStep, ProgressObserver, ProgressReporter, ProgressTracker};
use crate::tts::cache::TtsCache;
use crate::utils::temp::TempFileManager;

/// Одна сцена: текст, кадр, аудиодорожка и длительность
#[derive(Debug, Clone)]
pub struct Scene {
    /// Текст сцены
    pub text: String,
    /// Путь к скомпонованному кадру
    pub frame_path: PathBuf,
    /// Путь к аудиофайлу сцены (WAV)
    pub audio_path: PathBuf,
    /// Длительность сцены в секундах
    pub duration: f64,
}

/// Результат рендеринга видео
#[derive(Debug, Clone)]
pub struct RenderedVideo {
    /// Путь к итоговому видеофайлу
    pub video_path: PathBuf,
    /// Путь к SRT-файлу, если субтитры генерировались
    pub srt_path: Option<PathBuf>,
    /// Количество сцен
    pub scene_count: usize,
    /// Суммарная длительность сцен в секундах
    pub total_duration: f64,
}

/// Основная структура для работы с библиотекой
pub struct Script2Video {
    /// Конфигурация библиотеки
    config: Script2VideoConfig,
    /// Трекер прогресса
    progress_tracker: Option<ProgressTracker>,
}

impl Script2Video {
    /// Создать новый экземпляр Script2Video с указанной конфигурацией
    pub fn new(config: Script2VideoConfig) -> Self {
        Self {
            config,
            progress_tracker: None,
        }
    }

    /// Создать новый экземпляр Script2Video с репортером прогресса
    pub fn with_progress_reporter(config: Script2VideoConfig, reporter: Box<dyn ProgressReporter>) -> Self {
        let mut tracker = ProgressTracker::new();
        tracker.set_reporter(reporter);

        Self {
            config,
            progress_tracker: Some(tracker),
        }
    }

    /// Установить репортер прогресса
    pub fn set_progress_reporter(&mut self, reporter: Box<dyn ProgressReporter>) {
        if let Some(tracker) = &mut self.progress_tracker {
            tracker.set_reporter(reporter);
        } else {
            let mut tracker = ProgressTracker::new();
            tracker.set_reporter(reporter);
            self.progress_tracker = Some(tracker);
        }
    }

    /// Добавить наблюдателя прогресса
    pub fn add_observer(&mut self, observer: Box<dyn ProgressObserver>) -> Result<usize> {
        if let Some(tracker) = &mut self.progress_tracker {
            Ok(tracker.add_observer(observer).unwrap_or(0))
        } else {
            let mut tracker = ProgressTracker::new();
            let id = tracker.add_observer(observer).unwrap_or(0);
            self.progress_tracker = Some(tracker);
            Ok(id)
        }
    }

    /// Основной метод: рендеринг видео из текстового сценария
    ///
    /// Возвращает пути к итоговому видео и SRT-файлу.
    pub async fn render(&self, script: &str, output_dir: &Path) -> Result<RenderedVideo> {
        log::info!("Starting script-to-video rendering");

        if !utils::ffmpeg::check_ffmpeg_installed() {
            return Err(Script2VideoError::Configuration(
                "FFmpeg is required but was not found on PATH".to_string(),
            ));
        }

        let tracker_ref = self.progress_tracker.as_ref();

        // 1. Разбиение сценария на сцены
        if let Some(t) = tracker_ref {
            t.set_step(ProcessStep::ScriptSplitting);
            t.update_step_progress(0.0, Some("Разбиение сценария".to_string()));
        }

        let blocks = script::split_script(script);
        if blocks.is_empty() {
            log::error!("Script is empty after splitting");
            return Err(Script2VideoError::ScriptSplitting(
                "Script contains no scenes".to_string(),
            ));
        }
        log::info!("Script split into {} scenes", blocks.len());

        if let Some(t) = tracker_ref {
            t.update_step_progress(100.0, Some(format!("Сцен: {}", blocks.len())));
        }

        let mut temp = TempFileManager::new(self.config.cleanup_temp_files)?;

        // 2. Генерация речи
        if let Some(t) = tracker_ref {
            t.set_step(ProcessStep::SpeechGeneration);
        }

        let scene_audio = self
            .generate_speech(&blocks, &mut temp, tracker_ref)
            .await?;

        // 3. Композиция кадров
        if let Some(t) = tracker_ref {
            t.set_step(ProcessStep::FrameComposition);
        }

        let scenes = self.compose_frames(&blocks, scene_audio, &mut temp, tracker_ref)?;

        // 4. Сборка видео
        if let Some(t) = tracker_ref {
            t.set_step(ProcessStep::VideoAssembly);
        }

        std::fs::create_dir_all(output_dir)?;
        let video_name = format!("script2video_{}.mp4", uuid::Uuid::new_v4().simple());
        let video_path = output_dir.join(&video_name);

        media::video::assemble_slideshow(&scenes, &self.config, &mut temp, tracker_ref, &video_path)
            .map_err(|e| {
                log::error!("Video assembly failed: {}", e);
                e
            })?;

        // 5. Генерация субтитров
        if let Some(t) = tracker_ref {
            t.set_step(ProcessStep::SubtitleGeneration);
        }

        let srt_path = if self.config.generate_srt {
            let path = video_path.with_extension("srt");
            subtitle::srt::write_srt(&scenes, &path).map_err(|e| {
                log::error!("Subtitle generation failed: {}", e);
                Script2VideoError::SubtitleGeneration(e.to_string())
            })?;
            Some(path)
        } else {
            None
        };

        if let Some(t) = tracker_ref {
            t.update_step_progress(100.0, None);
            t.complete();
        }

        let total_duration = scenes.iter().map(|s| s.duration).sum();
        log::info!(
            "Rendering completed: {} ({} scenes, {:.1}s)",
            video_path.display(),
            scenes.len(),
            total_duration
        );

        Ok(RenderedVideo {
            video_path,
            srt_path,
            scene_count: scenes.len(),
            total_duration,
        })
    }

    /// Синтезировать аудио первой сцены сценария
    ///
    /// Возвращает путь к mp3 и его длительность в секундах. Используется для
    /// быстрой проверки голоса без рендеринга всего видео.
    pub async fn preview_scene_audio(&self, script: &str) -> Result<(PathBuf, f64)> {
        let blocks = script::split_script(script);
        let first = blocks.first().ok_or_else(|| {
            Script2VideoError::ScriptSplitting("Script contains no scenes".to_string())
        })?;

        let client = reqwest::Client::new();
        tts::openai::validate_api_key(&client, &self.config.openai_api_key).await?;

        let text = tts::openai::prepare_text_for_tts(first);
        let output = std::env::temp_dir().join(format!(
            "script2video_preview_{}.mp3",
            uuid::Uuid::new_v4().simple()
        ));
        tts::openai::synthesize_block(&client, &text, &self.config, &output).await?;

        let (samples, sample_rate) = audio::format::decode_audio_file(&output)?;
        let duration = audio::format::duration_in_seconds(samples.len(), sample_rate);

        Ok((output, duration))
    }

    /// Генерация речи для всех блоков сценария
    ///
    /// Возвращает пути к WAV-файлам сцен и их длительности.
    async fn generate_speech(
        &self,
        blocks: &[String],
        temp: &mut TempFileManager,
        tracker: Option<&ProgressTracker>,
    ) -> Result<Vec<(PathBuf, f64)>> {
        let client = reqwest::Client::new();
        tts::openai::validate_api_key(&client, &self.config.openai_api_key).await?;

        log::info!("TTS configuration:");
        log::info!("  Model: {}", self.config.tts_model.as_str());
        log::info!("  Voice: {}", self.config.tts_voice.as_str());
        log::info!("  Speech speed: {:.2}", self.config.speech_speed);

        let cache = if self.config.use_caching {
            Some(TtsCache::new(&self.config)?)
        } else {
            None
        };

        let model = self.config.tts_model.as_str();
        let voice = self.config.tts_voice.as_str();
        let total = blocks.len();
        let mut results = Vec::with_capacity(total);

        for (i, block) in blocks.iter().enumerate() {
            let text = tts::openai::prepare_text_for_tts(block);

            // Берем mp3 из кэша либо синтезируем заново
            let mp3_path = match cache.as_ref().and_then(|c| c.get_cached_file(&text, model, voice)) {
                Some(cached) => cached,
                None => {
                    let path = temp.create_temp_file(&format!("tts_{}", i), "mp3")?;
                    tts::openai::synthesize_block(&client, &text, &self.config, &path)
                        .await
                        .map_err(|e| {
                            log::error!("TTS generation failed for scene {}: {}", i, e);
                            e
                        })?;

                    if let Some(c) = &cache {
                        if let Err(e) = c.add_to_cache(&text, model, voice, &path) {
                            log::warn!("Failed to cache TTS result for scene {}: {}", i, e);
                        }
                    }
                    path
                }
            };

            // Декодируем, применяем изменение скорости и измеряем длительность
            let (samples, sample_rate) = audio::format::decode_audio_file(&mp3_path)?;
            let samples = audio::stretch::change_speed(&samples, sample_rate, self.config.speech_speed)?;
            let duration = audio::format::duration_in_seconds(samples.len(), sample_rate);

            let wav_path = temp.create_temp_file(&format!("scene_audio_{}", i), "wav")?;
            audio::format::encode_wav(&samples, sample_rate, &wav_path)?;

            log::debug!("Scene {} audio ready: {:.2}s", i, duration);
            results.push((wav_path, duration));

            if let Some(t) = tracker {
                let progress = ((i + 1) as f32 / total as f32) * 100.0;
                t.update_step_progress(
                    progress,
                    Some(format!("Генерация речи: {}/{} сцен", i + 1, total)),
                );
            }
        }

        Ok(results)
    }

    /// Композиция кадров всех сцен
    fn compose_frames(
        &self,
        blocks: &[String],
        scene_audio: Vec<(PathBuf, f64)>,
        temp: &mut TempFileManager,
        tracker: Option<&ProgressTracker>,
    ) -> Result<Vec<Scene>> {
        let (width, height) = self.config.aspect_ratio.dimensions();
        let total = blocks.len();
        let mut scenes = Vec::with_capacity(total);

        for (i, (block, (audio_path, duration))) in blocks.iter().zip(scene_audio).enumerate() {
            let bg_image = self.config.background_images.get(i).map(PathBuf::as_path);
            let base = frame::background::scene_background(bg_image, width, height, self.config.theme);

            let background_png = temp.create_temp_file(&format!("bg_{}", i), "png")?;
            frame::background::save_png(&base, &background_png)?;

            let layout = frame::caption::layout_caption(block, width, height, &self.config);
            let frame_png = temp.create_temp_file(&format!("frame_{}", i), "png")?;
            frame::caption::compose_caption(&background_png, &layout, &self.config, temp, &frame_png)
                .map_err(|e| {
                    log::error!("Frame composition failed for scene {}: {}", i, e);
                    Script2VideoError::FrameComposition(e.to_string())
                })?;

            scenes.push(Scene {
                text: block.clone(),
                frame_path: frame_png,
                audio_path,
                duration,
            });

            if let Some(t) = tracker {
                let progress = ((i + 1) as f32 / total as f32) * 100.0;
                t.update_step_progress(
                    progress,
                    Some(format!("Композиция кадров: {}/{}", i + 1, total)),
                );
            }
        }

        Ok(scenes)
    }
}

/// Публичный API для удобного использования
pub async fn render_video(
    script: &str,
    output_dir: &Path,
    openai_api_key: &str,
) -> Result<RenderedVideo> {
    let config = Script2VideoConfig {
        openai_api_key: openai_api_key.to_string(),
        ..Script2VideoConfig::default()
    };

    let renderer = Script2Video::new(config);
    renderer.render(script, output_dir).await
}

/// Публичный API с поддержкой отслеживания прогресса
pub async fn render_video_with_progress(
    script: &str,
    output_dir: &Path,
    openai_api_key: &str,
    reporter: Box<dyn ProgressReporter>,
) -> Result<RenderedVideo> {
    let config = Script2VideoConfig {
        openai_api_key: openai_api_key.to_string(),
        ..Script2VideoConfig::default()
    };

    let renderer = Script2Video::with_progress_reporter(config, reporter);
    renderer.render(script, output_dir).await
}
