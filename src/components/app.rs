use leptos::prelude::*;
use crate::components::heading::Heading;
use crate::components::image_grid::ImageGrid;
use crate::components::start_controls::StartControls;
use crate::components::title::Title;
use crate::image_list;
use crate::state::AppState;
use crate::types::VisualizerRefs;

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();
    provide_context(state);
    let refs = VisualizerRefs::new();
    provide_context(refs);

    // Independent of the heading split; the grid fills in whenever it lands
    image_list::load_grid(state);

    let audio_src = state.config.with_value(|c| c.audio_src.clone());

    view! {
        <div class="app">
            <ImageGrid />
            <div class="main">
                <Title />
                <StartControls />
                <Heading />
                <audio
                    node_ref=refs.audio
                    src=audio_src
                    preload="auto"
                    on:error=move |_| {
                        let detail = refs.audio.get_untracked()
                            .and_then(|a| a.error())
                            .map(|e| format!("media error code {}", e.code()))
                            .unwrap_or_else(|| "unknown error".to_string());
                        log::error!("Audio playback error: {}", detail);
                    }
                />
            </div>
        </div>
    }
}
