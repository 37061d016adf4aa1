//! Sizing and filling the decorative image grid.

use crate::config::VisualizerConfig;
use crate::random::RandomSource;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Height of one grid row: tiles share the width evenly and keep the
/// configured aspect ratio.
pub fn row_height(viewport_width: f64, config: &VisualizerConfig) -> f64 {
    let tile_width = viewport_width / config.images_per_row.max(1) as f64;
    tile_width / config.tile_aspect
}

/// Upper bound on grid tiles, whatever the viewport reports.
pub const MAX_GRID_IMAGES: usize = 4096;

/// Enough images to cover `viewport_cover` viewport heights, never fewer than
/// `min_images` and never more than [`MAX_GRID_IMAGES`].
pub fn target_image_count(viewport: Viewport, config: &VisualizerConfig) -> usize {
    let per_row = config.images_per_row.max(1);
    let row_h = row_height(viewport.width, config);
    if !(row_h > 0.0 && row_h.is_finite()) || !viewport.height.is_finite() {
        return config.min_images;
    }
    let rows = (config.viewport_cover * viewport.height / row_h).ceil();
    let covering = if rows > 0.0 {
        (rows as usize).saturating_mul(per_row).min(MAX_GRID_IMAGES)
    } else {
        0
    };
    covering.max(config.min_images)
}

/// Draw `count` paths uniformly with replacement. Empty input gives an empty
/// grid.
pub fn pick_paths(paths: &[String], count: usize, rng: &mut impl RandomSource) -> Vec<String> {
    if paths.is_empty() {
        return Vec::new();
    }
    (0..count)
        .map(|_| paths[rng.pick_index(paths.len())].clone())
        .collect()
}

/// Target count and selection in one step.
pub fn fill_grid(
    paths: &[String],
    viewport: Viewport,
    config: &VisualizerConfig,
    rng: &mut impl RandomSource,
) -> Vec<String> {
    let count = target_image_count(viewport, config);
    let picked = pick_paths(paths, count, rng);
    log::debug!(
        "Grid: {} images for {:.0}x{:.0} viewport from {} paths",
        picked.len(),
        viewport.width,
        viewport.height,
        paths.len()
    );
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ScriptedRandom, SeededRng};

    fn vp(width: f64, height: f64) -> Viewport {
        Viewport { width, height }
    }

    #[test]
    fn test_small_viewport_hits_minimum() {
        let config = VisualizerConfig::default();
        // 800 wide, 8 per row, square tiles: row height 100. 2*300/100 = 6 rows = 48.
        assert_eq!(target_image_count(vp(800.0, 300.0), &config), 64);
    }

    #[test]
    fn test_tall_viewport_exceeds_minimum() {
        let config = VisualizerConfig::default();
        // Row height 100, 2*1050/100 = 21 rows -> 168 images
        assert_eq!(target_image_count(vp(800.0, 1050.0), &config), 168);
    }

    #[test]
    fn test_aspect_changes_row_height() {
        let config = VisualizerConfig {
            tile_aspect: 2.0,
            ..VisualizerConfig::default()
        };
        assert_eq!(row_height(800.0, &config), 50.0);
        // 2*1000/50 = 40 rows -> 320
        assert_eq!(target_image_count(vp(800.0, 1000.0), &config), 320);
    }

    #[test]
    fn test_degenerate_viewports() {
        let config = VisualizerConfig::default();
        for v in [vp(0.0, 900.0), vp(-5.0, 900.0), vp(800.0, 0.0), vp(800.0, -1.0), vp(f64::NAN, 10.0), vp(800.0, f64::INFINITY)] {
            assert_eq!(target_image_count(v, &config), 64, "{v:?}");
        }
    }

    #[test]
    fn test_extreme_height_is_capped() {
        let config = VisualizerConfig::default();
        assert_eq!(target_image_count(vp(800.0, 1e30), &config), MAX_GRID_IMAGES);
        assert_eq!(target_image_count(vp(1e-300, 1000.0), &config), MAX_GRID_IMAGES);
        // Under the cap: row height 100, 2*25000/100 = 500 rows -> 4000
        assert_eq!(target_image_count(vp(800.0, 25_000.0), &config), 4000);
    }

    #[test]
    fn test_picks_only_from_input() {
        let config = VisualizerConfig::default();
        let paths: Vec<String> = ["a.gif", "b.gif", "c.png"].iter().map(|s| s.to_string()).collect();
        let mut rng = SeededRng::new(3);
        for (w, h) in [(320.0, 480.0), (1920.0, 1080.0), (4000.0, 200.0), (300.0, 3000.0)] {
            let grid = fill_grid(&paths, vp(w, h), &config, &mut rng);
            assert!(grid.len() >= 64);
            assert!(grid.iter().all(|p| paths.contains(p)));
        }
    }

    #[test]
    fn test_with_replacement_single_path() {
        let paths = vec!["only.gif".to_string()];
        let mut rng = SeededRng::new(0);
        let grid = pick_paths(&paths, 70, &mut rng);
        assert_eq!(grid.len(), 70);
        assert!(grid.iter().all(|p| p == "only.gif"));
    }

    #[test]
    fn test_deterministic_selection() {
        let paths: Vec<String> = (0..4).map(|i| format!("{i}.gif")).collect();
        let mut rng = ScriptedRandom::new(vec![0.0, 0.3, 0.6, 0.9]);
        let grid = pick_paths(&paths, 4, &mut rng);
        assert_eq!(grid, vec!["0.gif", "1.gif", "2.gif", "3.gif"]);
    }

    #[test]
    fn test_empty_list_stays_empty() {
        let config = VisualizerConfig::default();
        let mut rng = SeededRng::new(0);
        assert!(fill_grid(&[], vp(800.0, 600.0), &config, &mut rng).is_empty());
    }
}
