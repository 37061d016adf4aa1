//! Splitting a heading into words and per-character cells.

use crate::color::{position_hue, Hsl};
use crate::config::VisualizerConfig;

/// One rendered character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharCell {
    pub ch: char,
    /// Index in the whole heading, counting inter-word spaces.
    pub position: usize,
}

/// A non-breaking group of cells. May be empty when the heading has
/// consecutive spaces.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Word {
    pub cells: Vec<CharCell>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadingLayout {
    pub words: Vec<Word>,
    /// Character count of the heading, spaces included.
    pub total_len: usize,
}

impl HeadingLayout {
    /// Split on single spaces, then into characters. A literal space sits
    /// between every pair of adjacent words and advances the position counter.
    pub fn split(text: &str) -> Self {
        let mut words = Vec::new();
        let mut position = 0usize;
        let mut parts = text.split(' ').peekable();
        while let Some(part) = parts.next() {
            let cells = part
                .chars()
                .map(|ch| {
                    let cell = CharCell { ch, position };
                    position += 1;
                    cell
                })
                .collect();
            words.push(Word { cells });
            if parts.peek().is_some() {
                position += 1;
            }
        }
        Self {
            words,
            total_len: text.chars().count(),
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = &CharCell> + '_ {
        self.words.iter().flat_map(|w| w.cells.iter())
    }

    pub fn cell_count(&self) -> usize {
        self.words.iter().map(|w| w.cells.len()).sum()
    }

    /// Positions of every cell in display order.
    pub fn positions(&self) -> Vec<usize> {
        self.cells().map(|c| c.position).collect()
    }

    /// Number of literal spaces rendered between words.
    pub fn space_count(&self) -> usize {
        self.words.len().saturating_sub(1)
    }

    /// Static rainbow color of a cell before animation starts.
    pub fn initial_color(&self, cell: &CharCell, config: &VisualizerConfig) -> Hsl {
        Hsl::new(
            position_hue(cell.position, self.total_len, 0.0),
            config.saturation,
            config.lightness,
        )
    }
}
