//! CSS values written to the DOM every frame.

use glyphwave_core::color::Hsl;
use glyphwave_core::grid::row_height;
use glyphwave_core::response::ScaleFactors;
use glyphwave_core::VisualizerConfig;

/// `transform` value for the text block.
pub fn scale_transform(scale: ScaleFactors) -> String {
    format!("scale({:.4}, {:.4})", finite_or_zero(scale.x), finite_or_zero(scale.y))
}

/// `transform` value for one character cell.
pub fn offset_transform(offset_y: f64) -> String {
    format!("translateY({:.2}px)", finite_or_zero(offset_y))
}

pub fn cell_color(hue: f64, saturation: f64, lightness: f64) -> String {
    Hsl::new(hue, saturation, lightness).to_css()
}

/// `grid-template-columns` for the image grid.
pub fn grid_columns(config: &VisualizerConfig) -> String {
    format!("repeat({}, 1fr)", config.images_per_row.max(1))
}

/// `grid-auto-rows` for the image grid, the same row height the image count
/// is computed from, in viewport-width units.
pub fn grid_row_height(config: &VisualizerConfig) -> String {
    format!("{:.4}vw", finite_or_zero(row_height(100.0, config)))
}

// CSS drops a whole declaration on NaN/inf, which would freeze the element
fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}
