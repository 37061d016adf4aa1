use crate::state::AppState;
use glyphwave_core::grid::{self, Viewport};
use glyphwave_core::random::RandomSource;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

/// Browser `Math.random()`.
pub struct MathRandom;

impl RandomSource for MathRandom {
    fn next_unit(&mut self) -> f64 {
        js_sys::Math::random()
    }
}

/// The image list is a plain JSON array of path strings.
pub fn parse_image_list(text: &str) -> Result<Vec<String>, serde_json::Error> {
    serde_json::from_str(text)
}

async fn fetch_image_list(url: &str) -> Result<Vec<String>, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let resp: Response = JsFuture::from(window.fetch_with_str(url)).await?.dyn_into()?;
    if !resp.ok() {
        return Err(JsValue::from_str(&format!("HTTP {}", resp.status())));
    }
    let body = JsFuture::from(resp.text()?).await?;
    let text = body
        .as_string()
        .ok_or_else(|| JsValue::from_str("response body is not text"))?;
    parse_image_list(&text).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn current_viewport() -> Viewport {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    match web_sys::window() {
        Some(w) => Viewport {
            width: dim(w.inner_width()),
            height: dim(w.inner_height()),
        },
        None => Viewport {
            width: 0.0,
            height: 0.0,
        },
    }
}

/// Fetch the image list once and fill the background grid. Failures leave the
/// grid empty.
pub fn load_grid(state: AppState) {
    let config = state.config.get_value();
    wasm_bindgen_futures::spawn_local(async move {
        let url = config.images_url.clone();
        let paths = match fetch_image_list(&url).await {
            Ok(p) => p,
            Err(e) => {
                log::error!("Failed to load image list {}: {:?}", url, e);
                return;
            }
        };
        if paths.is_empty() {
            log::warn!("Image list {} is empty, grid left unpopulated", url);
            return;
        }
        let picked = grid::fill_grid(&paths, current_viewport(), &config, &mut MathRandom);
        log::info!("Image grid: {} tiles from {} images", picked.len(), paths.len());
        state.grid_images.set(picked);
    });
}
