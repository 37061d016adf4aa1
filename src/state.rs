use glyphwave_core::{HeadingLayout, VisualizerConfig};
use leptos::prelude::*;

/// Id of the optional inline JSON block that overrides [`VisualizerConfig`].
pub const CONFIG_ELEMENT_ID: &str = "glyphwave-config";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// Start button showing, visualizer hidden.
    Idle,
    /// Start pressed: visualizer showing, title flashing. The frame loop runs
    /// once playback has actually begun.
    Running,
}

#[derive(Clone, Copy)]
pub struct AppState {
    pub config: StoredValue<VisualizerConfig>,
    pub heading: StoredValue<HeadingLayout>,
    pub phase: RwSignal<SessionPhase>,
    pub title_text: RwSignal<String>,
    pub grid_images: RwSignal<Vec<String>>,
}

impl AppState {
    pub fn new() -> Self {
        let config = load_page_config();
        let heading = HeadingLayout::split(&config.heading);
        log::debug!(
            "Heading {:?}: {} cells, {} spaces",
            config.heading,
            heading.cell_count(),
            heading.space_count()
        );
        Self {
            title_text: RwSignal::new(config.title.clone()),
            heading: StoredValue::new(heading),
            config: StoredValue::new(config),
            phase: RwSignal::new(SessionPhase::Idle),
            grid_images: RwSignal::new(Vec::new()),
        }
    }
}

/// Read the inline config block, falling back to defaults when it is absent
/// or invalid.
fn load_page_config() -> VisualizerConfig {
    let text = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());

    let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
        return VisualizerConfig::default();
    };

    match VisualizerConfig::from_json(&text) {
        Ok(config) => {
            log::info!("Loaded page config from #{}", CONFIG_ELEMENT_ID);
            config
        }
        Err(e) => {
            log::warn!("Ignoring page config: {}", e);
            VisualizerConfig::default()
        }
    }
}
