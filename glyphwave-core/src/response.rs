use crate::config::VisualizerConfig;
use crate::spectrum::BandEnergy;

/// Quadratic energy response: `(energy * gain)^2 * weight`.
///
/// Loud passages grow disproportionately. There is no upper clamp.
pub fn scale_response(energy: f64, gain: f64, weight: f64) -> f64 {
    let x = energy * gain;
    x * x * weight
}

/// Non-uniform 2-D scale applied to the text block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleFactors {
    pub x: f64,
    pub y: f64,
}

impl ScaleFactors {
    pub const IDENTITY: ScaleFactors = ScaleFactors { x: 1.0, y: 1.0 };

    /// Bass drives horizontal stretch, treble vertical.
    pub fn from_bands(bands: BandEnergy, config: &VisualizerConfig) -> Self {
        Self {
            x: scale_response(bands.bass, config.band_gain, config.scale_x_weight),
            y: scale_response(bands.treble, config.band_gain, config.scale_y_weight),
        }
    }
}
