/// Wrap any angle into [0, 360).
pub fn normalize_hue(deg: f64) -> f64 {
    if !deg.is_finite() {
        return 0.0;
    }
    let h = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

/// Hue for a character position along the heading, shifted by `offset` degrees.
pub fn position_hue(position: usize, total_len: usize, offset: f64) -> f64 {
    if total_len == 0 {
        return normalize_hue(offset);
    }
    normalize_hue(position as f64 / total_len as f64 * 360.0 + offset)
}

/// An HSL color with saturation and lightness in percent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsl {
    pub fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self {
            hue: normalize_hue(hue),
            saturation,
            lightness,
        }
    }

    /// CSS `hsl()` notation.
    pub fn to_css(&self) -> String {
        format!(
            "hsl({:.1}, {:.0}%, {:.0}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}
