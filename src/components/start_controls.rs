use leptos::prelude::*;
use crate::session;
use crate::state::{AppState, SessionPhase};
use crate::types::VisualizerRefs;

#[component]
pub fn StartControls() -> impl IntoView {
    let state = expect_context::<AppState>();
    let refs = expect_context::<VisualizerRefs>();
    let is_running = move || state.phase.get() == SessionPhase::Running;

    view! {
        <div class="start-controls">
            {move || if is_running() {
                view! {
                    <button
                        class="stop-btn"
                        on:click=move |_| session::stop(state)
                        title="Stop playback and animation"
                    >"Stop"</button>
                }.into_any()
            } else {
                view! {
                    <button
                        class="start-btn"
                        on:click=move |_| session::start(state, refs)
                        title="Start the music"
                    >"Start"</button>
                }.into_any()
            }}
        </div>
    }
}
