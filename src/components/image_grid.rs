use leptos::prelude::*;
use crate::render::style::{grid_columns, grid_row_height};
use crate::state::AppState;

#[component]
pub fn ImageGrid() -> impl IntoView {
    let state = expect_context::<AppState>();
    let (columns, row_height) = state
        .config
        .with_value(|c| (grid_columns(c), grid_row_height(c)));

    view! {
        <div
            class="image-grid"
            aria-hidden="true"
            style:grid-template-columns=columns
            style:grid-auto-rows=row_height
        >
            {move || state.grid_images.get().into_iter().map(|src| view! {
                <img class="grid-tile" src=src alt="" loading="lazy" />
            }).collect_view()}
        </div>
    }
}
