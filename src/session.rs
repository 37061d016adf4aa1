//! Start/stop of one visualizer run: title flasher, playback, frame loop.

use crate::anim::frame_loop::FrameLoop;
use crate::anim::interval::IntervalTimer;
use crate::audio::graph;
use crate::render::glyphs;
use crate::state::{AppState, SessionPhase};
use crate::types::{GlyphCell, VisualizerRefs};
use glyphwave_core::title::TitleFlasher;
use glyphwave_core::{Animator, FrequencyBuffer, VisualizerConfig};
use leptos::prelude::*;
use std::cell::{Cell, RefCell};
use web_sys::{HtmlAudioElement, HtmlElement};

struct Session {
    generation: u64,
    audio: HtmlAudioElement,
    text_block: HtmlElement,
    flasher: Option<IntervalTimer>,
    frame_loop: Option<FrameLoop>,
}

thread_local! {
    static SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
    static GENERATION: Cell<u64> = const { Cell::new(0) };
}

fn is_current(generation: u64) -> bool {
    SESSION.with(|s| s.borrow().as_ref().map(|s| s.generation) == Some(generation))
}

fn start_title_flasher(state: AppState, config: &VisualizerConfig) -> Option<IntervalTimer> {
    let mut flasher = TitleFlasher::new(
        &config.title,
        &config.title_marker_left,
        &config.title_marker_right,
    );
    match IntervalTimer::start(config.title_flash_ms, move || {
        state.title_text.set(flasher.tick().to_string());
    }) {
        Ok(timer) => Some(timer),
        Err(e) => {
            log::error!("Failed to start title flasher: {:?}", e);
            None
        }
    }
}

fn start_frame_loop(
    state: AppState,
    text_block: HtmlElement,
    cells: Vec<GlyphCell>,
    mut analyser: graph::WebAnalyser,
    config: VisualizerConfig,
) -> Option<FrameLoop> {
    let total_len = state.heading.with_value(|h| h.total_len);
    let positions = cells.iter().map(|c| c.position).collect();
    let mut animator = Animator::new(config.clone(), positions, total_len);
    animator.start();
    let mut spectrum = FrequencyBuffer::new(config.bin_count());

    let tick = move |now_ms: f64| {
        spectrum.refresh(&mut analyser);
        if let Some(frame) = animator.advance(spectrum.as_slice(), now_ms) {
            glyphs::apply_frame(&text_block, &cells, &frame, &config);
        }
    };

    match FrameLoop::start(tick) {
        Ok(frame_loop) => Some(frame_loop),
        Err(e) => {
            log::error!("Failed to start frame loop: {:?}", e);
            None
        }
    }
}

/// Idle → Running. Shows the visualizer and starts the title flasher
/// immediately; the frame loop follows once playback has begun. A rejected
/// playback is logged and leaves the loop unstarted.
pub fn start(state: AppState, refs: VisualizerRefs) {
    if state.phase.get_untracked() != SessionPhase::Idle {
        return;
    }
    let (Some(audio), Some(text_block)) = (refs.audio.get_untracked(), refs.text_block.get_untracked()) else {
        log::error!("Visualizer elements are not mounted");
        return;
    };
    let text_block: HtmlElement = (*text_block).clone();
    let config = state.config.get_value();

    let generation = GENERATION.with(|g| {
        g.set(g.get() + 1);
        g.get()
    });

    state.phase.set(SessionPhase::Running);
    let flasher = start_title_flasher(state, &config);
    SESSION.with(|s| {
        *s.borrow_mut() = Some(Session {
            generation,
            audio: audio.clone(),
            text_block: text_block.clone(),
            flasher,
            frame_loop: None,
        });
    });
    log::info!("Visualizer session {} started", generation);

    wasm_bindgen_futures::spawn_local(async move {
        let analyser = match graph::connect(&audio, &config) {
            Ok(a) => a,
            Err(e) => {
                log::error!("Failed to build audio graph: {:?}", e);
                return;
            }
        };
        if let Err(e) = graph::start_playback(&audio).await {
            log::error!("Playback failed to start: {:?}", e);
            return;
        }
        // Stopped (or restarted) while waiting on playback
        if !is_current(generation) {
            if SESSION.with(|s| s.borrow().is_none()) {
                graph::pause(&audio);
            }
            return;
        }

        let cells = match glyphs::collect_cells(&text_block) {
            Ok(c) => c,
            Err(e) => {
                log::error!("Failed to collect heading cells: {:?}", e);
                return;
            }
        };
        let frame_loop = start_frame_loop(state, text_block, cells, analyser, config);
        SESSION.with(|s| {
            if let Some(session) = s.borrow_mut().as_mut() {
                if session.generation == generation {
                    session.frame_loop = frame_loop;
                }
            }
        });
    });
}

/// Running → Idle: cancel the frame loop and the flasher, pause audio, restore
/// the title and the static heading.
pub fn stop(state: AppState) {
    let Some(mut session) = SESSION.with(|s| s.borrow_mut().take()) else {
        return;
    };
    if let Some(frame_loop) = session.frame_loop.take() {
        frame_loop.stop();
    }
    if let Some(mut flasher) = session.flasher.take() {
        flasher.stop();
    }
    graph::pause(&session.audio);

    let config = state.config.get_value();
    state.title_text.set(config.title.clone());
    let total_len = state.heading.with_value(|h| h.total_len);
    match glyphs::collect_cells(&session.text_block) {
        Ok(cells) => glyphs::reset(&session.text_block, &cells, total_len, &config),
        Err(e) => log::warn!("Failed to reset heading: {:?}", e),
    }
    state.phase.set(SessionPhase::Idle);
    log::info!("Visualizer session {} stopped", session.generation);
}
