//! Native stand-in for the browser's `AnalyserNode`.
//!
//! Follows the Web Audio byte-frequency pipeline: Blackman window over the
//! latest `fft_size` samples, magnitude scaled by 1/N, exponential smoothing
//! across calls, conversion to dB, then a linear map of
//! `[min_db, max_db]` onto `0..=255`.

use crate::config::VisualizerConfig;
use crate::spectrum::SpectrumSource;
use realfft::num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum AnalyserError {
    InvalidFftSize(usize),
    InvalidSmoothing(f64),
    InvalidDbRange { min_db: f64, max_db: f64 },
}

impl fmt::Display for AnalyserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyserError::InvalidFftSize(n) => {
                write!(f, "FFT size {n} is not a power of two in 32..=32768")
            }
            AnalyserError::InvalidSmoothing(s) => write!(f, "smoothing {s} is outside [0, 1)"),
            AnalyserError::InvalidDbRange { min_db, max_db } => {
                write!(f, "dB range {min_db}..{max_db} is empty")
            }
        }
    }
}

impl std::error::Error for AnalyserError {}

fn blackman_window(size: usize) -> Vec<f32> {
    const ALPHA: f64 = 0.16;
    let a0 = (1.0 - ALPHA) / 2.0;
    let a1 = 0.5;
    let a2 = ALPHA / 2.0;
    let n = size as f64;
    (0..size)
        .map(|i| {
            let x = 2.0 * std::f64::consts::PI * i as f64 / n;
            (a0 - a1 * x.cos() + a2 * (2.0 * x).cos()) as f32
        })
        .collect()
}

pub struct SoftwareAnalyser {
    fft: Arc<dyn RealToComplex<f32>>,
    fft_size: usize,
    window: Vec<f32>,
    /// Most recent `fft_size` samples, oldest first.
    history: Vec<f32>,
    smoothed: Vec<f64>,
    smoothing: f64,
    min_db: f64,
    max_db: f64,
    input: Vec<f32>,
    output: Vec<Complex<f32>>,
}

impl SoftwareAnalyser {
    pub fn new(fft_size: usize, smoothing: f64, min_db: f64, max_db: f64) -> Result<Self, AnalyserError> {
        if !fft_size.is_power_of_two() || !(32..=32768).contains(&fft_size) {
            return Err(AnalyserError::InvalidFftSize(fft_size));
        }
        if !(0.0..1.0).contains(&smoothing) {
            return Err(AnalyserError::InvalidSmoothing(smoothing));
        }
        if min_db >= max_db {
            return Err(AnalyserError::InvalidDbRange { min_db, max_db });
        }

        let mut planner = RealFftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(fft_size);
        let input = fft.make_input_vec();
        let output = fft.make_output_vec();

        Ok(Self {
            fft,
            fft_size,
            window: blackman_window(fft_size),
            history: vec![0.0; fft_size],
            smoothed: vec![0.0; fft_size / 2],
            smoothing,
            min_db,
            max_db,
            input,
            output,
        })
    }

    pub fn from_config(config: &VisualizerConfig) -> Result<Self, AnalyserError> {
        Self::new(
            config.fft_size as usize,
            config.smoothing,
            config.min_db,
            config.max_db,
        )
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Append mono samples; only the latest `fft_size` are kept.
    pub fn push_samples(&mut self, samples: &[f32]) {
        let n = self.fft_size;
        if samples.len() >= n {
            self.history.copy_from_slice(&samples[samples.len() - n..]);
        } else {
            self.history.rotate_left(samples.len());
            self.history[n - samples.len()..].copy_from_slice(samples);
        }
    }

    /// Run the FFT and fold the new magnitudes into the smoothed spectrum.
    fn update_smoothed(&mut self) {
        for ((inp, &s), &w) in self.input.iter_mut().zip(self.history.iter()).zip(self.window.iter()) {
            *inp = s * w;
        }
        if let Err(e) = self.fft.process(&mut self.input, &mut self.output) {
            log::warn!("Analyser FFT failed: {e}");
            return;
        }
        let scale = 1.0 / self.fft_size as f64;
        let tau = self.smoothing;
        for (smoothed, bin) in self.smoothed.iter_mut().zip(self.output.iter()) {
            let mag = bin.norm() as f64 * scale;
            *smoothed = tau * *smoothed + (1.0 - tau) * mag;
        }
    }

    fn magnitude_to_byte(&self, mag: f64) -> u8 {
        if mag <= 0.0 {
            return 0;
        }
        let db = 20.0 * mag.log10();
        let scaled = 255.0 / (self.max_db - self.min_db) * (db - self.min_db);
        scaled.floor().clamp(0.0, 255.0) as u8
    }
}

impl SpectrumSource for SoftwareAnalyser {
    fn bin_count(&self) -> usize {
        self.fft_size / 2
    }

    fn fill_bytes(&mut self, out: &mut [u8]) {
        self.update_smoothed();
        let bins = self.smoothed.len().min(out.len());
        for k in 0..bins {
            out[k] = self.magnitude_to_byte(self.smoothed[k]);
        }
        out[bins..].fill(0);
    }
}
