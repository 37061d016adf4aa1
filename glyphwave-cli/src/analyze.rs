//! Offline look at how a track would drive the visualizer.

use crate::error::MediaError;
use glyphwave_core::analyser::SoftwareAnalyser;
use glyphwave_core::response::ScaleFactors;
use glyphwave_core::{BandEnergy, FrequencyBuffer, VisualizerConfig};
use std::path::Path;

#[derive(Clone, Copy, Debug)]
pub struct FrameReport {
    pub time_secs: f64,
    pub bands: BandEnergy,
    pub scale: ScaleFactors,
}

/// Decode a WAV file to mono f32.
pub fn read_mono(path: &Path) -> Result<(Vec<f32>, u32), MediaError> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
        hound::SampleFormat::Int => {
            let full_scale = (1i64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / full_scale))
                .collect::<Result<_, _>>()?
        }
    };

    let mono = interleaved
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect();
    Ok((mono, spec.sample_rate))
}

/// Step through `samples` at `fps` frames per second, sampling the spectrum
/// the way the page does once per display frame.
pub fn analyze_samples(
    samples: &[f32],
    sample_rate: u32,
    fps: f64,
    config: &VisualizerConfig,
) -> Result<Vec<FrameReport>, MediaError> {
    let mut analyser = SoftwareAnalyser::from_config(config)?;
    let mut spectrum = FrequencyBuffer::new(config.bin_count());
    let hop = ((sample_rate as f64 / fps.max(1.0)).round() as usize).max(1);

    let mut reports = Vec::with_capacity(samples.len() / hop + 1);
    for (i, chunk) in samples.chunks(hop).enumerate() {
        analyser.push_samples(chunk);
        spectrum.refresh(&mut analyser);
        let bands = spectrum.bands();
        reports.push(FrameReport {
            time_secs: ((i + 1) * hop).min(samples.len()) as f64 / sample_rate.max(1) as f64,
            bands,
            scale: ScaleFactors::from_bands(bands, config),
        });
    }
    Ok(reports)
}

pub fn analyze_wav(path: &Path, fps: f64, config: &VisualizerConfig) -> Result<Vec<FrameReport>, MediaError> {
    let (samples, sample_rate) = read_mono(path)?;
    log::info!(
        "{}: {} samples at {} Hz ({:.2}s)",
        path.display(),
        samples.len(),
        sample_rate,
        samples.len() as f64 / sample_rate.max(1) as f64
    );
    analyze_samples(&samples, sample_rate, fps, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::TempDir;
    use std::f32::consts::PI;

    fn tone(freq: f32, sample_rate: u32, secs: f32) -> Vec<f32> {
        let n = (sample_rate as f32 * secs) as usize;
        (0..n)
            .map(|i| 0.8 * (2.0 * PI * freq * i as f32 / sample_rate as f32).sin())
            .collect()
    }

    #[test]
    fn test_frame_count_and_timing() {
        let config = VisualizerConfig::default();
        let samples = vec![0.0f32; 44_100];
        let reports = analyze_samples(&samples, 44_100, 60.0, &config).unwrap();
        assert_eq!(reports.len(), 60); // 735-sample hops
        assert!((reports.last().unwrap().time_secs - 1.0).abs() < 1e-9);
        assert!(reports.iter().all(|r| r.bands.bass == 0.0 && r.scale.x == 0.0));
    }

    #[test]
    fn test_bass_tone_stretches_horizontally() {
        let config = VisualizerConfig::default();
        let samples = tone(120.0, 44_100, 0.5);
        let reports = analyze_samples(&samples, 44_100, 30.0, &config).unwrap();
        let last = reports.last().unwrap();
        assert!(last.bands.bass > last.bands.treble);
        assert!(last.scale.x > 0.0);
    }

    #[test]
    fn test_reads_stereo_int_wav() {
        let dir = TempDir::new("wav");
        let path = dir.path().join("t.wav");
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for _ in 0..100 {
            writer.write_sample(16384i16).unwrap();
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();

        let (mono, sr) = read_mono(&path).unwrap();
        assert_eq!(sr, 8000);
        assert_eq!(mono.len(), 100);
        assert!(mono.iter().all(|&s| (s - 0.25).abs() < 1e-6));
    }

    #[test]
    fn test_bad_config_is_reported() {
        let config = VisualizerConfig {
            fft_size: 100,
            ..VisualizerConfig::default()
        };
        assert!(matches!(
            analyze_samples(&[0.0; 10], 44_100, 60.0, &config),
            Err(MediaError::Analyser(_))
        ));
    }
}
