use leptos::prelude::*;

/// DOM handles the session needs, filled in when the app mounts.
#[derive(Clone, Copy)]
pub struct VisualizerRefs {
    pub audio: NodeRef<leptos::html::Audio>,
    pub text_block: NodeRef<leptos::html::Div>,
}

impl VisualizerRefs {
    pub fn new() -> Self {
        Self {
            audio: NodeRef::new(),
            text_block: NodeRef::new(),
        }
    }
}

/// A rendered character cell and the heading position it was built from.
#[derive(Clone, Debug)]
pub struct GlyphCell {
    pub element: web_sys::HtmlElement,
    pub position: usize,
}
