use leptos::prelude::*;
use crate::render::glyphs::CELL_CLASS;
use crate::state::{AppState, SessionPhase};
use crate::types::VisualizerRefs;

/// The heading, one span per character, grouped into non-breaking words.
/// Hidden until the visualizer starts.
#[component]
pub fn Heading() -> impl IntoView {
    let state = expect_context::<AppState>();
    let refs = expect_context::<VisualizerRefs>();
    let config = state.config.get_value();
    let layout = state.heading.get_value();
    let word_count = layout.words.len();

    let words = layout
        .words
        .iter()
        .enumerate()
        .map(|(wi, word)| {
            let cells = word
                .cells
                .iter()
                .map(|cell| {
                    let color = layout.initial_color(cell, &config).to_css();
                    view! {
                        <span
                            class=CELL_CLASS
                            data-pos=cell.position.to_string()
                            style=format!("color: {}", color)
                        >{cell.ch.to_string()}</span>
                    }
                })
                .collect_view();
            // Literal text node between words, never a cell
            let space = (wi + 1 < word_count).then_some(" ");
            view! {
                <span class="glyph-word">{cells}</span>
                {space}
            }
        })
        .collect_view();

    view! {
        <div
            class="visualizer"
            style:display=move || if state.phase.get() == SessionPhase::Running { "flex" } else { "none" }
        >
            <div class="glyph-block" node_ref=refs.text_block>{words}</div>
        </div>
    }
}
