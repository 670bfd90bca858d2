pub mod canvas;
pub mod dice;
pub mod grid;
pub mod hex;
pub mod path;
pub mod render;
pub mod tree;

use std::ops::RangeInclusive;

use log::{debug, info, trace};

use crate::color::Color;
use crate::config::{GlowConfig, PathShape};
use crate::glow::canvas::{Blend, Surface};
use crate::glow::dice::Dice;
use crate::glow::grid::Grid;
use crate::glow::path::{build_random_path, process_due, Activation};
use crate::glow::tree::build_tree_path;

/// Animation state: the grid, the queue of pending recolors and the fade and pick
/// deadlines. Times are milliseconds on the caller's clock.
pub struct Glow {
    config: GlowConfig,
    grid: Grid,
    pending: Vec<Activation>,
    next_fade: u64,
    next_pick: u64,
    dice: Dice,
}

impl Glow {
    pub fn new(config: GlowConfig, width: u32, height: u32, now: u64) -> Self {
        Self::with_dice(config, width, height, now, Dice::new())
    }

    pub fn with_dice(
        config: GlowConfig,
        width: u32,
        height: u32,
        now: u64,
        mut dice: Dice,
    ) -> Self {
        let grid = Grid::new(width as f64, height as f64, config.hex_radius, &mut dice);
        info!("grid {}x{} ({} cells) for {width}x{height}", grid.cols(), grid.rows(), grid.len());

        let mut glow = Self {
            config,
            grid,
            pending: Vec::new(),
            next_fade: now,
            next_pick: now,
            dice,
        };
        let lengths = match glow.config.path_shape {
            PathShape::Tree => glow.config.first_tree_length.clone(),
            PathShape::Walk => glow.config.walk_length.clone(),
        };
        glow.pending = glow.pick_path(lengths, now);
        glow
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn pending(&self) -> &[Activation] {
        &self.pending
    }

    pub fn next_pick(&self) -> u64 {
        self.next_pick
    }

    /// Throws the grid away and builds one for the new viewport. Pending entries point
    /// into the old grid, so they go too.
    pub fn resize(&mut self, width: u32, height: u32, now: u64) {
        self.grid = Grid::new(width as f64, height as f64, self.config.hex_radius, &mut self.dice);
        self.pending.clear();
        self.next_fade = now;
        self.next_pick = now;
        info!(
            "resized to {width}x{height}, grid {}x{} ({} cells)",
            self.grid.cols(),
            self.grid.rows(),
            self.grid.len()
        );
    }

    /// Advances the animation to `now` and draws whatever changed. Returns the number
    /// of cells drawn.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S, now: u64) -> usize {
        let applied = process_due(&mut self.grid, &mut self.pending, now);
        trace!("{applied} cells lit, {} pending", self.pending.len());

        if now > self.next_fade {
            self.fade(surface);
            self.next_fade = now + self.config.fade_ms;
        }

        if now > self.next_pick || self.pending.is_empty() {
            let lengths = match self.config.path_shape {
                PathShape::Tree => self.config.tree_length.clone(),
                PathShape::Walk => self.config.walk_length.clone(),
            };
            self.pending = self.pick_path(lengths, now);
            self.next_pick = now + self.pending.len() as u64 * self.config.pick_ms_per_entry;
        }

        render::draw_grid(&mut self.grid, surface, &mut self.dice, self.config.hex_angle)
    }

    /// Lets the existing picture fade towards transparent, then switches to additive
    /// drawing for the strokes that follow.
    fn fade<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let keep = Color::new_hsla(0., 0., 100., self.config.fade_keep);
        let (width, height) = (surface.width() as f64, surface.height() as f64);
        surface.set_blend(Blend::DestinationIn);
        surface.fill_rect(0., 0., width, height, keep);
        surface.set_blend(Blend::Lighter);
    }

    fn pick_path(&mut self, lengths: RangeInclusive<i64>, now: u64) -> Vec<Activation> {
        let length = self.dice.int(*lengths.start(), *lengths.end());
        match self.config.path_shape {
            PathShape::Tree => {
                let tree = build_tree_path(&self.grid, length as i32, now, &mut self.dice);
                debug!(
                    "new tree of length {length}: {} branches, {} cells",
                    tree.branches.len(),
                    tree.len()
                );
                tree.entries
            }
            PathShape::Walk => {
                let length = length.max(0) as usize;
                let walk = build_random_path(&self.grid, length, now, &mut self.dice);
                debug!("new walk of length {length}: {} cells", walk.len());
                walk
            }
        }
    }
}
