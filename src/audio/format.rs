//! # Audio Format Handling
//!
//! Модуль для кодирования и декодирования аудио форматов.
//!
//! ## Основные возможности
//!
//! - Декодирование аудиофайлов (WAV через hound, MP3/AAC/FLAC через Symphonia)
//! - Кодирование PCM данных в WAV формат
//! - Обработка многоканального аудио с конвертацией в моно
//! - Вычисление длительности по количеству семплов

use std::fs::File;
use std::io::Read;
use std::path::Path;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::probe::Hint;

use crate::error::{Result, Script2VideoError};

/// Вычисляет длительность аудио в секундах
///
/// # Аргументы
///
/// * `sample_count` - Количество семплов в аудио
/// * `sample_rate` - Частота дискретизации аудио в Гц
pub fn duration_in_seconds(sample_count: usize, sample_rate: u32) -> f64 {
    sample_count as f64 / sample_rate as f64
}

/// Декодирует аудиофайл в моно PCM семплы.
///
/// WAV декодируется специализированным декодером hound; остальные форматы
/// (mp3, m4a, aac, flac, ogg) - универсальным декодером Symphonia.
/// Многоканальное аудио микшируется в моно.
///
/// # Возвращает
///
/// Кортеж из вектора PCM семплов (f32) и частоты дискретизации (u32)
pub fn decode_audio_file<P: AsRef<Path>>(file_path: P) -> Result<(Vec<f32>, u32)> {
    let file_path = file_path.as_ref();
    let extension = file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "wav" => decode_wav_file(file_path),

        "mp3" | "m4a" | "aac" | "flac" | "ogg" => {
            // Читаем весь файл в память
            let mut file = File::open(file_path)?;
            let mut buffer = Vec::new();
            file.read_to_end(&mut buffer)?;

            let cursor = std::io::Cursor::new(buffer);
            let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

            let mut hint = Hint::new();
            hint.with_extension(&extension);

            let format_opts = FormatOptions {
                enable_gapless: false,
                ..Default::default()
            };

            let probed = symphonia::default::get_probe()
                .format(&hint, mss, &format_opts, &Default::default())
                .map_err(|e| Script2VideoError::AudioProcessing(format!("Failed to probe audio format: {}", e)))?;

            let mut format = probed.format;
            let track = format
                .tracks()
                .iter()
                .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
                .ok_or_else(|| Script2VideoError::AudioProcessing("No audio track found".to_string()))?;

            let mut decoder = symphonia::default::get_codecs()
                .make(&track.codec_params, &DecoderOptions::default())
                .map_err(|e| Script2VideoError::AudioProcessing(format!("Failed to create decoder: {}", e)))?;

            let track_id = track.id;
            let sample_rate = track.codec_params.sample_rate.unwrap_or(44100);
            let channels = track.codec_params.channels.map(|c| c.count()).unwrap_or(1);

            let mut pcm_data = Vec::new();

            // Декодируем пакеты
            while let Ok(packet) = format.next_packet() {
                if packet.track_id() != track_id {
                    continue;
                }

                match decoder.decode(&packet) {
                    Ok(decoded) => {
                        let mut sample_buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, *decoded.spec());
                        sample_buf.copy_interleaved_ref(decoded);
                        let samples = sample_buf.samples();

                        // Микшируем каналы в моно, если их больше одного
                        if channels > 1 {
                            for frame in samples.chunks(channels) {
                                let sum: f32 = frame.iter().sum();
                                pcm_data.push(sum / channels as f32);
                            }
                        } else {
                            pcm_data.extend_from_slice(samples);
                        }
                    }
                    Err(e) => {
                        log::warn!("Failed to decode audio packet: {}", e);
                        continue;
                    }
                }
            }

            if pcm_data.is_empty() {
                return Err(Script2VideoError::AudioProcessing(format!(
                    "No samples decoded from {}",
                    file_path.display()
                )));
            }

            log::debug!(
                "Decoded {} samples from {} at {} Hz",
                pcm_data.len(),
                file_path.display(),
                sample_rate
            );
            Ok((pcm_data, sample_rate))
        }

        _ => Err(Script2VideoError::AudioProcessing(format!(
            "Unsupported audio format: {}",
            extension
        ))),
    }
}

/// Декодирует WAV-файл в моно PCM семплы
pub fn decode_wav_file<P: AsRef<Path>>(file_path: P) -> Result<(Vec<f32>, u32)> {
    let mut reader = WavReader::open(file_path.as_ref())
        .map_err(Script2VideoError::WavDecoding)?;

    let spec = reader.spec();
    let sample_rate = spec.sample_rate;

    // Читаем данные в зависимости от формата
    let pcm_data: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .map(|s| s.map_err(Script2VideoError::WavDecoding))
            .collect::<Result<Vec<i16>>>()?
            .into_iter()
            .map(|s| s as f32 / 32768.0)
            .collect(),
        (SampleFormat::Int, 24) => reader
            .samples::<i32>()
            .map(|s| s.map_err(Script2VideoError::WavDecoding))
            .collect::<Result<Vec<i32>>>()?
            .into_iter()
            .map(|s| s as f32 / 8388608.0)
            .collect(),
        (SampleFormat::Int, 32) => reader
            .samples::<i32>()
            .map(|s| s.map_err(Script2VideoError::WavDecoding))
            .collect::<Result<Vec<i32>>>()?
            .into_iter()
            .map(|s| s as f32 / 2147483648.0)
            .collect(),
        (SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .map(|s| s.map_err(Script2VideoError::WavDecoding))
            .collect::<Result<Vec<f32>>>()?,
        _ => {
            return Err(Script2VideoError::AudioProcessing(format!(
                "Unsupported WAV format: {:?}, {} bits",
                spec.sample_format, spec.bits_per_sample
            )));
        }
    };

    // Если больше одного канала, сводим к моно
    let channels = spec.channels as usize;
    if channels > 1 {
        let mut mono_data = Vec::with_capacity(pcm_data.len() / channels);
        for chunk in pcm_data.chunks(channels) {
            let sample = chunk.iter().sum::<f32>() / channels as f32;
            mono_data.push(sample);
        }
        Ok((mono_data, sample_rate))
    } else {
        Ok((pcm_data, sample_rate))
    }
}

/// Кодирует PCM семплы в WAV-файл (моно, 32 бита с плавающей точкой)
pub fn encode_wav<P: AsRef<Path>>(pcm_data: &[f32], sample_rate: u32, output_path: P) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(output_path.as_ref(), spec)?;

    for &sample in pcm_data {
        writer.write_sample(sample)?;
    }

    writer.finalize()?;

    log::debug!(
        "Saved WAV file: {} ({} samples, {} Hz)",
        output_path.as_ref().display(),
        pcm_data.len(),
        sample_rate
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_duration_calculation() {
        assert_eq!(duration_in_seconds(44100, 44100), 1.0);
        assert_eq!(duration_in_seconds(22050, 44100), 0.5);
        assert_eq!(duration_in_seconds(0, 44100), 0.0);
    }

    #[test]
    fn test_wav_encode_decode() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.wav");

        // Генерируем тестовые данные (синусоида 440 Гц)
        let sample_rate = 44100;
        let duration = 0.1; // 100 ms
        let num_samples = (sample_rate as f64 * duration) as usize;
        let mut samples = Vec::with_capacity(num_samples);

        for i in 0..num_samples {
            let time = i as f32 / sample_rate as f32;
            let sample = (time * 440.0 * 2.0 * std::f32::consts::PI).sin() * 0.5;
            samples.push(sample);
        }

        encode_wav(&samples, sample_rate, &file_path).unwrap();

        let (decoded, decoded_rate) = decode_wav_file(&file_path).unwrap();

        assert_eq!(decoded_rate, sample_rate);
        assert_eq!(decoded.len(), samples.len());

        // Сравниваем семплы с некоторой погрешностью
        for (a, b) in samples.iter().zip(decoded.iter()) {
            assert!((a - b).abs() < 0.0001);
        }
    }

    #[test]
    fn test_decode_audio_file_dispatches_wav() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("tone.wav");

        let samples = vec![0.25f32; 4410];
        encode_wav(&samples, 44100, &file_path).unwrap();

        let (decoded, rate) = decode_audio_file(&file_path).unwrap();
        assert_eq!(rate, 44100);
        assert_eq!(decoded.len(), 4410);
        assert!((duration_in_seconds(decoded.len(), rate) - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_unsupported_format_is_rejected() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("audio.xyz");
        std::fs::write(&file_path, b"not audio").unwrap();

        assert!(decode_audio_file(&file_path).is_err());
    }
}
