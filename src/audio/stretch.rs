//! Модуль наивного изменения скорости речи
//!
//! Этот модуль реализует наивный time-stretch через ресемплинг: семплы
//! пересчитываются с коэффициентом 1/speed при неизменной заявленной частоте
//! дискретизации, поэтому вместе с темпом немного смещается высота тона.

use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};

use crate::error::{Result, Script2VideoError};

/// Порог, ниже которого изменение скорости не применяется
const SPEED_EPSILON: f64 = 1e-3;

/// Изменить скорость воспроизведения PCM семплов
///
/// При `speed > 1.0` аудио укорачивается, при `speed < 1.0` - удлиняется.
/// Возвращает новые семплы; длительность равна `len / sample_rate`.
pub fn change_speed(input: &[f32], sample_rate: u32, speed: f64) -> Result<Vec<f32>> {
    if (speed - 1.0).abs() < SPEED_EPSILON {
        return Ok(input.to_vec());
    }

    if speed <= 0.0 || !speed.is_finite() {
        return Err(Script2VideoError::TimeStretching(format!(
            "Invalid speech speed: {}",
            speed
        )));
    }

    if input.is_empty() {
        return Ok(Vec::new());
    }

    let ratio = 1.0 / speed;
    log::debug!(
        "Resampling {} samples at {} Hz with ratio {:.3}",
        input.len(),
        sample_rate,
        ratio
    );

    resample(input, sample_rate, ratio)
}

/// Ресемплинг семплов с заданным коэффициентом длительности
fn resample(input: &[f32], sample_rate: u32, ratio: f64) -> Result<Vec<f32>> {
    // Размер блока подбирается по длительности фрагмента
    let duration_seconds = input.len() as f64 / sample_rate as f64;
    let block_size = if duration_seconds < 0.1 {
        64
    } else if duration_seconds < 0.5 {
        128
    } else if duration_seconds < 2.0 {
        256
    } else {
        512
    };

    // Параметры sinc-интерполяции для высокого качества
    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let mut resampler = SincFixedIn::<f32>::new(ratio, 1.0, params, block_size, 1)
        .map_err(|e| Script2VideoError::TimeStretching(format!("Failed to create resampler: {}", e)))?;

    let expected_len = (input.len() as f64 * ratio).round() as usize;
    let mut output = Vec::with_capacity(expected_len + block_size * 2);

    // Обработка блоками фиксированного размера; последний блок дополняется нулями
    let mut idx = 0;
    while idx < input.len() {
        let end = (idx + block_size).min(input.len());
        let mut chunk = input[idx..end].to_vec();
        chunk.resize(block_size, 0.0);

        let processed = resampler
            .process(&[chunk], None)
            .map_err(|e| Script2VideoError::TimeStretching(format!("Resampling failed: {}", e)))?;

        output.extend_from_slice(&processed[0]);
        idx = end;
    }

    // Обрезаем до ожидаемой длины (дополненный хвост дает лишние семплы)
    if output.len() > expected_len {
        output.truncate(expected_len);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(sample_rate: u32, seconds: f64) -> Vec<f32> {
        let num_samples = (sample_rate as f64 * seconds) as usize;
        (0..num_samples)
            .map(|i| {
                let t = i as f32 / sample_rate as f32;
                (t * 440.0 * 2.0 * std::f32::consts::PI).sin() * 0.5
            })
            .collect()
    }

    #[test]
    fn test_unit_speed_is_identity() {
        let input = sine(44100, 0.25);
        let output = change_speed(&input, 44100, 1.0).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn test_faster_speech_is_shorter() {
        let input = sine(44100, 1.0);
        let output = change_speed(&input, 44100, 1.5).unwrap();
        // Ожидаемая длина: len / 1.5, с запасом на блочную обработку
        let expected = (input.len() as f64 / 1.5) as usize;
        assert!(output.len() <= expected);
        assert!(output.len() > expected / 2);
    }

    #[test]
    fn test_slower_speech_is_longer() {
        let input = sine(44100, 0.5);
        let output = change_speed(&input, 44100, 0.8).unwrap();
        assert!(output.len() > input.len());
    }

    #[test]
    fn test_invalid_speed_is_rejected() {
        let input = sine(44100, 0.1);
        assert!(change_speed(&input, 44100, 0.0).is_err());
        assert!(change_speed(&input, 44100, -1.0).is_err());
        assert!(change_speed(&input, 44100, f64::NAN).is_err());
    }

    #[test]
    fn test_empty_input() {
        assert!(change_speed(&[], 44100, 1.3).unwrap().is_empty());
    }
}
