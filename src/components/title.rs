use leptos::prelude::*;
use crate::state::AppState;

/// Page title; the session's flasher rewrites it while running.
#[component]
pub fn Title() -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <h1 class="title">{move || state.title_text.get()}</h1>
    }
}
