mod anim;
mod audio;
mod components;
mod image_list;
mod render;
mod session;
mod state;
mod types;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    log::info!("glyphwave v{}", env!("CARGO_PKG_VERSION"));
    leptos::mount::mount_to_body(components::app::App);
}
