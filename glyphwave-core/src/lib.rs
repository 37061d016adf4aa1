//! Platform-independent core of the glyphwave visualizer.
//!
//! Everything here runs natively: the browser crate feeds it byte spectra and
//! timestamps, and applies the styles it returns to the DOM.

pub mod analyser;
pub mod animator;
pub mod color;
pub mod config;
pub mod grid;
pub mod random;
pub mod response;
pub mod spectrum;
pub mod text;
pub mod title;
pub mod wave;

pub use animator::{Animator, AnimatorPhase, CellStyle, FrameStyle};
pub use config::{ConfigError, VisualizerConfig};
pub use spectrum::{BandEnergy, FrequencyBuffer, SpectrumSource};
pub use text::HeadingLayout;
