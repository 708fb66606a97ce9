//! Модуль для сборки видео
//!
//! Этот модуль собирает сцены в клипы, склеивает их и накладывает логотип.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::Script2VideoConfig;
use crate::error::{Result, Script2VideoError};
use crate::frame::logo::prepare_logo;
use crate::progress::ProgressTracker;
use crate::utils::ffmpeg::{run_ffmpeg_command, run_ffprobe_command};
use crate::utils::temp::TempFileManager;
use crate::Scene;

/// Создание клипа одной сцены из кадра и аудиодорожки
///
/// Кадр зацикливается на длительность сцены, поверх применяются плавные
/// появление и затухание, аудио кодируется в AAC.
pub fn create_scene_clip(
    scene: &Scene,
    fade_in: bool,
    fade_out: bool,
    config: &Script2VideoConfig,
    output_path: &Path,
) -> Result<()> {
    let filter = scene_filter(scene.duration, fade_in, fade_out, config.fade_duration);

    let framerate = config.fps.to_string();
    let duration = format!("{:.3}", scene.duration);
    let frame = scene.frame_path.to_string_lossy().to_string();
    let audio = scene.audio_path.to_string_lossy().to_string();
    let output = output_path.to_string_lossy().to_string();

    let args = vec![
        "-loop", "1",
        "-framerate", framerate.as_str(),
        "-i", frame.as_str(),
        "-i", audio.as_str(),
        "-t", duration.as_str(),
        "-vf", filter.as_str(),
        "-c:v", "libx264",
        "-preset", "medium",
        "-b:v", config.video_bitrate.as_str(),
        "-c:a", "aac",
        "-y", output.as_str(),
    ];

    run_ffmpeg_command(&args).map_err(|e| {
        Script2VideoError::VideoAssembly(format!(
            "Failed to encode scene clip {}: {}",
            output_path.display(),
            e
        ))
    })
}

/// Построить строку видеофильтра клипа с переходами
///
/// Переходы не применяются, если сцена короче их длительности.
fn scene_filter(duration: f64, fade_in: bool, fade_out: bool, fade: f64) -> String {
    let mut video_filters = Vec::new();

    if fade_in && duration > fade {
        video_filters.push(format!("fade=t=in:st=0:d={:.2}", fade));
    }
    if fade_out && duration > fade {
        video_filters.push(format!("fade=t=out:st={:.3}:d={:.2}", duration - fade, fade));
    }
    video_filters.push("format=yuv420p".to_string());

    video_filters.join(",")
}

/// Склейка клипов через concat demuxer без перекодирования
pub fn concat_clips(clips: &[PathBuf], temp: &mut TempFileManager, output_path: &Path) -> Result<()> {
    if clips.is_empty() {
        return Err(Script2VideoError::VideoAssembly(
            "No clips to concatenate".to_string(),
        ));
    }

    // Создаем файл со списком клипов для FFmpeg
    let concat_list_path = temp.create_temp_file("concat_list", "txt")?;
    let mut concat_list = std::fs::File::create(&concat_list_path)?;

    for clip in clips {
        writeln!(concat_list, "file '{}'", clip.display())?;
    }

    drop(concat_list);

    let list = concat_list_path.to_string_lossy().to_string();
    let output = output_path.to_string_lossy().to_string();
    let args = vec![
        "-f", "concat",
        "-safe", "0",
        "-i", list.as_str(),
        "-c", "copy",
        "-y", output.as_str(),
    ];

    run_ffmpeg_command(&args).map_err(|e| {
        Script2VideoError::VideoAssembly(format!("Failed to concatenate clips: {}", e))
    })
}

/// Наложение логотипа в правом верхнем углу видео
pub fn overlay_logo(
    video_path: &Path,
    logo_png: &Path,
    config: &Script2VideoConfig,
    output_path: &Path,
) -> Result<()> {
    let video = video_path.to_string_lossy().to_string();
    let logo = logo_png.to_string_lossy().to_string();
    let output = output_path.to_string_lossy().to_string();

    let args = vec![
        "-i", video.as_str(),
        "-i", logo.as_str(),
        "-filter_complex", "[0:v][1:v]overlay=main_w-overlay_w-20:20",
        "-c:v", "libx264",
        "-preset", "medium",
        "-b:v", config.video_bitrate.as_str(),
        "-c:a", "copy",
        "-y", output.as_str(),
    ];

    run_ffmpeg_command(&args).map_err(|e| {
        Script2VideoError::VideoAssembly(format!("Failed to overlay logo: {}", e))
    })
}

/// Сборка итогового слайдшоу из сцен
///
/// Каждая сцена кодируется в клип с переходами, клипы склеиваются,
/// при наличии логотипа выполняется дополнительный проход наложения.
pub fn assemble_slideshow(
    scenes: &[Scene],
    config: &Script2VideoConfig,
    temp: &mut TempFileManager,
    tracker: Option<&ProgressTracker>,
    output_path: &Path,
) -> Result<()> {
    let total = scenes.len();
    let mut clips = Vec::with_capacity(total);

    for (i, scene) in scenes.iter().enumerate() {
        let clip_path = temp.create_temp_file(&format!("clip_{}", i), "mp4")?;

        // Первый клип без появления, последний без затухания
        let fade_in = i > 0;
        let fade_out = i < total - 1;
        create_scene_clip(scene, fade_in, fade_out, config, &clip_path)?;

        clips.push(clip_path);

        if let Some(t) = tracker {
            let progress = ((i + 1) as f32 / total as f32) * 90.0;
            t.update_step_progress(
                progress,
                Some(format!("Кодирование клипов: {}/{}", i + 1, total)),
            );
        }
    }

    if let Some(logo_path) = &config.logo_path {
        let prepared_logo = prepare_logo(logo_path, config.aspect_ratio.dimensions().0, temp)?;

        let concatenated = temp.create_temp_file("concatenated", "mp4")?;
        concat_clips(&clips, temp, &concatenated)?;

        if let Some(t) = tracker {
            t.update_step_progress(95.0, Some("Наложение логотипа".to_string()));
        }
        overlay_logo(&concatenated, &prepared_logo, config, output_path)?;
    } else {
        concat_clips(&clips, temp, output_path)?;
    }

    if let Some(t) = tracker {
        t.update_step_progress(100.0, Some("Сборка видео завершена".to_string()));
    }

    match get_video_duration(output_path) {
        Ok(duration) => log::info!(
            "Assembled slideshow video: {} ({:.1}s)",
            output_path.display(),
            duration
        ),
        Err(e) => log::warn!("Failed to probe assembled video duration: {}", e),
    }
    Ok(())
}

/// Получение длительности видеофайла через FFprobe
pub fn get_video_duration(video_path: &Path) -> Result<f64> {
    let path = video_path.to_string_lossy().to_string();
    let output = run_ffprobe_command(&[
        "-v", "error",
        "-show_entries", "format=duration",
        "-of", "default=noprint_wrappers=1:nokey=1",
        path.as_str(),
    ])?;

    output.trim().parse::<f64>().map_err(|_| {
        Script2VideoError::VideoAssembly(format!("Failed to parse video duration: {}", output))
    })
}
