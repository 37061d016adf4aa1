use glyphwave_core::{SpectrumSource, VisualizerConfig};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AnalyserNode, AudioContext, AudioContextState, HtmlAudioElement, MediaElementAudioSourceNode};

/// audio element -> analyser -> speakers
struct AudioGraph {
    ctx: AudioContext,
    _source: MediaElementAudioSourceNode,
    analyser: AnalyserNode,
}

thread_local! {
    // A media element can only be wrapped in one source node, so the graph is
    // built on first start and reused afterwards.
    static GRAPH: RefCell<Option<AudioGraph>> = const { RefCell::new(None) };
}

/// Byte spectrum straight from the platform analyser.
pub struct WebAnalyser {
    node: AnalyserNode,
}

impl SpectrumSource for WebAnalyser {
    fn bin_count(&self) -> usize {
        self.node.frequency_bin_count() as usize
    }

    fn fill_bytes(&mut self, out: &mut [u8]) {
        self.node.get_byte_frequency_data(out);
    }
}

fn configure_analyser(analyser: &AnalyserNode, config: &VisualizerConfig) {
    analyser.set_fft_size(config.fft_size);
    analyser.set_smoothing_time_constant(config.smoothing);
    // The platform rejects min >= max at every step, so order the two writes
    if config.max_db > analyser.min_decibels() {
        analyser.set_max_decibels(config.max_db);
        analyser.set_min_decibels(config.min_db);
    } else {
        analyser.set_min_decibels(config.min_db);
        analyser.set_max_decibels(config.max_db);
    }
}

fn build_graph(audio: &HtmlAudioElement, config: &VisualizerConfig) -> Result<AudioGraph, JsValue> {
    let ctx = AudioContext::new()?;
    let source = ctx.create_media_element_source(audio)?;
    let analyser = ctx.create_analyser()?;
    configure_analyser(&analyser, config);
    source.connect_with_audio_node(&analyser)?;
    analyser.connect_with_audio_node(&ctx.destination())?;
    log::info!(
        "Audio graph ready: {} Hz, {} bins",
        ctx.sample_rate(),
        analyser.frequency_bin_count()
    );
    Ok(AudioGraph {
        ctx,
        _source: source,
        analyser,
    })
}

/// Build the graph on first use and hand out an analyser for the frame loop.
pub fn connect(audio: &HtmlAudioElement, config: &VisualizerConfig) -> Result<WebAnalyser, JsValue> {
    GRAPH.with(|g| {
        let mut slot = g.borrow_mut();
        if slot.is_none() {
            *slot = Some(build_graph(audio, config)?);
        }
        match slot.as_ref() {
            Some(graph) => Ok(WebAnalyser {
                node: graph.analyser.clone(),
            }),
            None => Err(JsValue::from_str("audio graph unavailable")),
        }
    })
}

/// Resume a context the autoplay policy suspended, then start playback.
/// Resolves once the element is actually playing.
pub async fn start_playback(audio: &HtmlAudioElement) -> Result<(), JsValue> {
    let ctx = GRAPH.with(|g| g.borrow().as_ref().map(|graph| graph.ctx.clone()));
    if let Some(ctx) = ctx {
        if ctx.state() == AudioContextState::Suspended {
            log::debug!("Resuming suspended AudioContext");
            JsFuture::from(ctx.resume()?).await?;
        }
    }
    JsFuture::from(audio.play()?).await?;
    log::info!("Playback started");
    Ok(())
}

pub fn pause(audio: &HtmlAudioElement) {
    if let Err(e) = audio.pause() {
        log::warn!("Failed to pause audio: {:?}", e);
    }
}
