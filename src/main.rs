//! CLI для библиотеки script2video

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use script2video::notification::ProgressBarObserver;
use script2video::progress::{DefaultProgressReporter, ProgressReporter};
use script2video::{AspectRatio, Script2Video, Script2VideoConfig, Theme, TtsModel, TtsVoice};

#[derive(Parser, Debug)]
#[command(name = "script2video", version, about = "Превращает текстовый сценарий в озвученное слайдшоу-видео")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Отрендерить видео из сценария
    Render(RenderArgs),
    /// Синтезировать аудио первой сцены для проверки голоса
    Preview(PreviewArgs),
    /// Проверить наличие FFmpeg
    Check,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Файл сценария (пустая строка = новая сцена)
    script: PathBuf,

    /// Директория для результата
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Формат кадра: 16:9, 9:16 или 1:1
    #[arg(long, default_value = "16:9")]
    aspect: String,

    /// Тема градиентного фона: dark, light, earth, purple, sunset
    #[arg(long, default_value = "dark")]
    theme: String,

    /// Голос TTS: alloy, echo, fable, onyx, nova, shimmer
    #[arg(long, default_value = "nova")]
    voice: String,

    /// Модель TTS: standard или hd
    #[arg(long, default_value = "standard")]
    model: String,

    /// Скорость речи (0.7 - 1.5)
    #[arg(long, default_value_t = 1.0)]
    speed: f64,

    /// Размер шрифта как доля высоты кадра
    #[arg(long, default_value_t = 0.065)]
    font_size: f64,

    /// Межстрочный интервал
    #[arg(long, default_value_t = 1.2)]
    line_spacing: f64,

    /// Отступ текстового блока в пикселях
    #[arg(long, default_value_t = 40)]
    padding: u32,

    /// Непрозрачность подложки текста (0-255)
    #[arg(long, default_value_t = 140)]
    box_opacity: u8,

    /// Путь к файлу шрифта (.ttf)
    #[arg(long)]
    font: Option<PathBuf>,

    /// Фоновое изображение сцены (повторяемый флаг, по порядку сцен)
    #[arg(long = "background")]
    backgrounds: Vec<PathBuf>,

    /// Логотип (PNG с прозрачностью) для правого верхнего угла
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Не генерировать SRT-субтитры
    #[arg(long)]
    no_srt: bool,

    /// Не использовать кэш TTS
    #[arg(long)]
    no_cache: bool,

    /// API ключ OpenAI (по умолчанию из OPENAI_API_KEY)
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: String,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Файл сценария
    script: PathBuf,

    /// Голос TTS
    #[arg(long, default_value = "nova")]
    voice: String,

    /// Модель TTS
    #[arg(long, default_value = "standard")]
    model: String,

    /// API ключ OpenAI (по умолчанию из OPENAI_API_KEY)
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args).await,
        Command::Preview(args) => cmd_preview(args).await,
        Command::Check => cmd_check(),
    }
}

async fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let script = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Не удалось прочитать сценарий {}", args.script.display()))?;

    let config = Script2VideoConfig {
        openai_api_key: args.api_key,
        tts_model: parse_option("model", &args.model, TtsModel::from_name)?,
        tts_voice: parse_option("voice", &args.voice, TtsVoice::from_name)?,
        speech_speed: args.speed,
        theme: parse_option("theme", &args.theme, Theme::from_name)?,
        aspect_ratio: parse_option("aspect", &args.aspect, AspectRatio::from_name)?,
        padding_px: args.padding,
        font_path: args.font,
        font_size_pct: args.font_size,
        text_box_opacity: args.box_opacity,
        line_spacing: args.line_spacing,
        background_images: args.backgrounds,
        logo_path: args.logo,
        generate_srt: !args.no_srt,
        use_caching: !args.no_cache,
        ..Script2VideoConfig::default()
    };

    let mut reporter = DefaultProgressReporter::new();
    reporter.add_observer(Box::new(ProgressBarObserver::default()));

    let renderer = Script2Video::with_progress_reporter(config, Box::new(reporter));
    let rendered = renderer.render(&script, &args.output_dir).await?;

    println!("Готово! Сцен: {}, длительность: {:.1}с", rendered.scene_count, rendered.total_duration);
    println!("Видео: {}", rendered.video_path.display());
    if let Some(srt) = rendered.srt_path {
        println!("Субтитры: {}", srt.display());
    }

    Ok(())
}

async fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let script = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Не удалось прочитать сценарий {}", args.script.display()))?;

    let config = Script2VideoConfig {
        openai_api_key: args.api_key,
        tts_model: parse_option("model", &args.model, TtsModel::from_name)?,
        tts_voice: parse_option("voice", &args.voice, TtsVoice::from_name)?,
        ..Script2VideoConfig::default()
    };

    let renderer = Script2Video::new(config);
    let (audio_path, duration) = renderer.preview_scene_audio(&script).await?;

    println!("Аудио первой сцены: {}", audio_path.display());
    println!("Длительность: {:.1}с", duration);

    Ok(())
}

fn cmd_check() -> anyhow::Result<()> {
    let version = script2video::utils::ffmpeg::get_ffmpeg_version()
        .context("FFmpeg не найден. Установите его и проверьте PATH (ffmpeg -version)")?;
    println!("{}", version);
    Ok(())
}

/// Разбор строкового значения опции CLI в значение конфигурации
fn parse_option<T>(name: &str, value: &str, parser: fn(&str) -> Option<T>) -> anyhow::Result<T> {
    match parser(value) {
        Some(parsed) => Ok(parsed),
        None => bail!("Недопустимое значение --{}: {}", name, value),
    }
}
