//! Writing animator output onto the heading's DOM nodes.

use crate::render::style::{cell_color, offset_transform, scale_transform};
use crate::types::GlyphCell;
use glyphwave_core::color::position_hue;
use glyphwave_core::{FrameStyle, VisualizerConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

pub const CELL_CLASS: &str = "glyph";
pub const POSITION_ATTR: &str = "data-pos";

/// Gather the character cells under `text_block` in display order.
pub fn collect_cells(text_block: &HtmlElement) -> Result<Vec<GlyphCell>, JsValue> {
    let nodes = text_block.query_selector_all(&format!(".{}", CELL_CLASS))?;
    let mut cells = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        let Some(node) = nodes.item(i) else { continue };
        let Ok(element) = node.dyn_into::<HtmlElement>() else { continue };
        let position = element
            .get_attribute(POSITION_ATTR)
            .and_then(|p| p.parse().ok())
            .unwrap_or(i as usize);
        cells.push(GlyphCell { element, position });
    }
    Ok(cells)
}

/// Paint one frame. Style writes that fail are skipped; the frame loop must
/// keep running.
pub fn apply_frame(
    text_block: &HtmlElement,
    cells: &[GlyphCell],
    frame: &FrameStyle<'_>,
    config: &VisualizerConfig,
) {
    let _ = text_block
        .style()
        .set_property("transform", &scale_transform(frame.scale));

    for (cell, style) in cells.iter().zip(frame.cells) {
        let css = cell.element.style();
        let _ = css.set_property(
            "color",
            &cell_color(style.hue, config.saturation, config.lightness),
        );
        let _ = css.set_property("transform", &offset_transform(style.offset_y));
    }
}

/// Put the heading back to its static rainbow.
pub fn reset(text_block: &HtmlElement, cells: &[GlyphCell], total_len: usize, config: &VisualizerConfig) {
    let _ = text_block.style().remove_property("transform");
    for cell in cells {
        let css = cell.element.style();
        let _ = css.remove_property("transform");
        let _ = css.set_property(
            "color",
            &cell_color(
                position_hue(cell.position, total_len, 0.0),
                config.saturation,
                config.lightness,
            ),
        );
    }
}
