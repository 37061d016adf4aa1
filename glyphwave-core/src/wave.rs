use crate::config::VisualizerConfig;

/// Vertical offset in pixels of the traveling sine wave at character
/// `position` and time `now_ms`. Independent of the audio.
pub fn wave_offset(position: usize, now_ms: f64, config: &VisualizerConfig) -> f64 {
    let phase = now_ms * config.wave_speed + position as f64 * config.wave_phase_step;
    phase.sin() * config.wave_amplitude_px
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_amplitude_bound() {
        let config = VisualizerConfig::default();
        for pos in 0..40 {
            for t in (0..5000).step_by(37) {
                let y = wave_offset(pos, t as f64, &config);
                assert!(y.abs() <= 30.0 + 1e-9);
            }
        }
    }

    #[test]
    fn test_origin_is_zero() {
        let config = VisualizerConfig::default();
        assert!(wave_offset(0, 0.0, &config).abs() < 1e-12);
    }

    #[test]
    fn test_phase_travels_across_positions() {
        let config = VisualizerConfig::default();
        // Position 1 at t=0 equals position 0 half a radian later
        let t = 0.5 / config.wave_speed;
        let a = wave_offset(1, 0.0, &config);
        let b = wave_offset(0, t, &config);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn test_peak() {
        let config = VisualizerConfig::default();
        let t = (PI / 2.0) / config.wave_speed;
        assert!((wave_offset(0, t, &config) - 30.0).abs() < 1e-9);
    }
}
