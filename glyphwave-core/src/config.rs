use serde::{Deserialize, Serialize};
use std::fmt;

/// Every tunable constant of the visualizer.
///
/// Missing fields fall back to [`Default`], so a page can override just the
/// heading or the audio source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    pub heading: String,
    pub title: String,
    pub title_marker_left: String,
    pub title_marker_right: String,
    pub title_flash_ms: u32,

    pub images_url: String,
    pub audio_src: String,

    /// AnalyserNode FFT size. Bins = fft_size / 2.
    pub fft_size: u32,
    /// Smoothing time constant of the analyser, in [0, 1).
    pub smoothing: f64,
    pub min_db: f64,
    pub max_db: f64,

    pub min_images: usize,
    pub images_per_row: usize,
    /// Tile width / tile height.
    pub tile_aspect: f64,
    /// How many viewport heights the grid must cover.
    pub viewport_cover: f64,

    pub hue_step_deg: f64,
    pub saturation: f64,
    pub lightness: f64,

    pub wave_amplitude_px: f64,
    /// Radians per millisecond.
    pub wave_speed: f64,
    /// Radians between neighbouring character positions.
    pub wave_phase_step: f64,

    pub band_gain: f64,
    pub scale_x_weight: f64,
    pub scale_y_weight: f64,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            heading: "FEEL THE BASS".to_string(),
            title: "glyphwave".to_string(),
            title_marker_left: "[ ".to_string(),
            title_marker_right: " ]".to_string(),
            title_flash_ms: 100,
            images_url: "static/images.json".to_string(),
            audio_src: "static/track.mp3".to_string(),
            fft_size: 256,
            smoothing: 0.8,
            min_db: -100.0,
            max_db: -30.0,
            min_images: 64,
            images_per_row: 8,
            tile_aspect: 1.0,
            viewport_cover: 2.0,
            hue_step_deg: 2.0,
            saturation: 100.0,
            lightness: 50.0,
            wave_amplitude_px: 30.0,
            wave_speed: 0.003,
            wave_phase_step: 0.5,
            band_gain: 3.0,
            scale_x_weight: 0.2,
            scale_y_weight: 1.0,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "config is not valid JSON: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl VisualizerConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: VisualizerConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // Same bounds the Web Audio AnalyserNode enforces.
        if !self.fft_size.is_power_of_two() || !(32..=32768).contains(&self.fft_size) {
            return Err(ConfigError::Invalid(format!(
                "fft_size must be a power of two in 32..=32768, got {}",
                self.fft_size
            )));
        }
        if !(0.0..1.0).contains(&self.smoothing) {
            return Err(ConfigError::Invalid(format!(
                "smoothing must be in [0, 1), got {}",
                self.smoothing
            )));
        }
        if self.min_db >= self.max_db {
            return Err(ConfigError::Invalid(format!(
                "min_db ({}) must be below max_db ({})",
                self.min_db, self.max_db
            )));
        }
        if self.images_per_row == 0 {
            return Err(ConfigError::Invalid("images_per_row must be at least 1".into()));
        }
        if !(self.tile_aspect > 0.0 && self.tile_aspect.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "tile_aspect must be positive, got {}",
                self.tile_aspect
            )));
        }
        if self.title_flash_ms == 0 {
            return Err(ConfigError::Invalid("title_flash_ms must be non-zero".into()));
        }
        Ok(())
    }

    /// Number of frequency bins the analyser produces.
    pub fn bin_count(&self) -> usize {
        (self.fft_size / 2) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = VisualizerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bin_count(), 128);
        assert_eq!(config.min_images, 64);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = VisualizerConfig::from_json(r#"{ "heading": "HELLO" }"#).unwrap();
        assert_eq!(config.heading, "HELLO");
        assert_eq!(config.fft_size, 256);
        assert_eq!(config.title_flash_ms, 100);
    }

    #[test]
    fn test_rejects_bad_fft_size() {
        let err = VisualizerConfig::from_json(r#"{ "fft_size": 300 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let err = VisualizerConfig::from_json(r#"{ "fft_size": 16 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_zero_row() {
        let err = VisualizerConfig::from_json(r#"{ "images_per_row": 0 }"#).unwrap_err();
        assert!(err.to_string().contains("images_per_row"));
    }

    #[test]
    fn test_rejects_inverted_db_range() {
        let err = VisualizerConfig::from_json(r#"{ "min_db": -20, "max_db": -30 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = VisualizerConfig::from_json("{ heading: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
