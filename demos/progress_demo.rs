//! Пример использования системы прогресса
//!
//! Этот пример демонстрирует, как использовать систему прогресса
//! при рендеринге видео библиотекой script2video.

use std::path::Path;

use script2video::notification::{
    CompositeProgressObserver, ConsoleProgressObserver, FileProgressObserver, ProgressBarObserver,
};
use script2video::progress::{DefaultProgressReporter, ProgressReporter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Инициализируем логирование
    env_logger::init();

    // Получаем API ключ из переменной окружения
    let api_key = std::env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY must be set");

    let script = "Intro: in this video we explain what a heat pump is.\n\n\
                  How it works: a heat pump moves heat from the air or ground into your home.\n\n\
                  Benefits: lower energy use and less CO2.\n\n\
                  Outro: subscribe for more energy tips!";

    // Создаем репортер прогресса
    let mut reporter = DefaultProgressReporter::new();

    // Создаем комбинированный наблюдатель
    let mut composite_observer = CompositeProgressObserver::new();

    // Добавляем наблюдатель для вывода в консоль
    composite_observer.add_observer(Box::new(ConsoleProgressObserver::new()));

    // Добавляем наблюдатель для отображения прогресс-бара
    composite_observer.add_observer(Box::new(ProgressBarObserver::new(50)));

    // Добавляем наблюдатель для записи в файл
    composite_observer.add_observer(Box::new(FileProgressObserver::new("progress.log")));

    // Добавляем комбинированный наблюдатель к репортеру
    reporter.add_observer(Box::new(composite_observer));

    // Рендерим видео с поддержкой прогресса
    let rendered = script2video::render_video_with_progress(
        script,
        Path::new("output"),
        &api_key,
        Box::new(reporter),
    )
    .await?;

    println!("Видео: {}", rendered.video_path.display());
    if let Some(srt) = &rendered.srt_path {
        println!("Субтитры: {}", srt.display());
    }
    println!("Сцен: {}, длительность: {:.1}с", rendered.scene_count, rendered.total_duration);

    Ok(())
}
