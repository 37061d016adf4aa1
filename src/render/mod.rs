pub mod glyphs;
pub mod style;
