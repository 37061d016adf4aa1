//! Per-frame audio-reactive animation state.
//!
//! An `Animator` is built when the visualizer starts and owns everything that
//! changes from frame to frame: the hue offset and the per-cell styles. It is
//! driven by the browser's frame callback but knows nothing about the DOM.

use crate::color::position_hue;
use crate::config::VisualizerConfig;
use crate::response::ScaleFactors;
use crate::spectrum::BandEnergy;
use crate::wave::wave_offset;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimatorPhase {
    Idle,
    Running,
    /// Terminal. Start a new animator to run again.
    Stopped,
}

/// Style of one character cell for the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CellStyle {
    pub hue: f64,
    pub offset_y: f64,
}

/// Everything the DOM layer needs to paint one frame.
#[derive(Debug)]
pub struct FrameStyle<'a> {
    pub bands: BandEnergy,
    pub scale: ScaleFactors,
    pub cells: &'a [CellStyle],
}

#[derive(Clone, Debug)]
pub struct Animator {
    config: VisualizerConfig,
    positions: Vec<usize>,
    total_len: usize,
    hue_offset: f64,
    frames: u64,
    phase: AnimatorPhase,
    styles: Vec<CellStyle>,
}

impl Animator {
    /// `positions` are the heading positions of each cell in display order,
    /// `total_len` the heading's character count.
    pub fn new(config: VisualizerConfig, positions: Vec<usize>, total_len: usize) -> Self {
        let styles = vec![CellStyle::default(); positions.len()];
        Self {
            config,
            positions,
            total_len,
            hue_offset: 0.0,
            frames: 0,
            phase: AnimatorPhase::Idle,
            styles,
        }
    }

    pub fn phase(&self) -> AnimatorPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == AnimatorPhase::Running
    }

    /// Idle → Running. Returns false from any other phase.
    pub fn start(&mut self) -> bool {
        if self.phase != AnimatorPhase::Idle {
            return false;
        }
        self.phase = AnimatorPhase::Running;
        log::debug!("Animator running with {} cells", self.positions.len());
        true
    }

    /// Running or Idle → Stopped.
    pub fn stop(&mut self) {
        if self.phase != AnimatorPhase::Stopped {
            log::debug!("Animator stopped after {} frames", self.frames);
        }
        self.phase = AnimatorPhase::Stopped;
    }

    pub fn hue_offset(&self) -> f64 {
        self.hue_offset
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn cell_count(&self) -> usize {
        self.positions.len()
    }

    /// Compute one frame from the current spectrum and a millisecond clock.
    /// Returns `None` unless running; never fails otherwise.
    pub fn advance(&mut self, spectrum: &[u8], now_ms: f64) -> Option<FrameStyle<'_>> {
        if !self.is_running() {
            return None;
        }

        let bands = BandEnergy::from_bins(spectrum);
        let scale = ScaleFactors::from_bands(bands, &self.config);

        self.hue_offset += self.config.hue_step_deg;
        self.frames += 1;

        for (style, &pos) in self.styles.iter_mut().zip(self.positions.iter()) {
            style.hue = position_hue(pos, self.total_len, self.hue_offset);
            style.offset_y = wave_offset(pos, now_ms, &self.config);
        }

        Some(FrameStyle {
            bands,
            scale,
            cells: &self.styles,
        })
    }
}
