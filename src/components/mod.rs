pub mod app;
pub mod heading;
pub mod image_grid;
pub mod start_controls;
pub mod title;
