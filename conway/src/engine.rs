// engine.rs - Generation engine: toroidal Life step plus stagnation reseeding

use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::grid::GridSize;
use crate::patterns::Pattern;
use crate::rng::RandomSource;

/// Owns both generations of the grid and the stagnation detector.
///
/// The two generations share one allocation of `2 * size` cells; `current`
/// says which half holds the latest generation. A step reads the other half
/// and overwrites it, then the roles flip. Nothing is allocated after
/// construction.
#[derive(Debug)]
pub struct GenerationEngine<R> {
    grid: GridSize,
    cell_size: usize,
    cells: Vec<u8>,
    current: usize,
    live_count: usize,
    // Population the stability check compares against. Only moves when
    // the population changes by at least the delta threshold.
    stability_baseline: usize,
    stable_generations: u32,
    stability_limit: u32,
    stability_delta_threshold: usize,
    generation: u64,
    reseeds: u64,
    rng: R,
}

impl<R: RandomSource> GenerationEngine<R> {
    /// Allocate both generations and seed the first one from `rng`.
    pub fn new(config: EngineConfig, rng: R) -> Result<Self, ConfigError> {
        let grid = config.grid()?;
        let cells = grid
            .size()
            .checked_mul(2)
            .map(|len| vec![0; len])
            .ok_or(ConfigError::GridTooLarge { width: config.width, height: config.height })?;

        let mut engine = Self {
            grid,
            cell_size: config.cell_size,
            cells,
            current: 0,
            live_count: 0,
            stability_baseline: 0,
            stable_generations: 0,
            stability_limit: config.stability_limit,
            stability_delta_threshold: config.stability_delta_threshold,
            generation: 0,
            reseeds: 0,
            rng,
        };
        engine.reseed();
        debug!(
            width = grid.width(),
            height = grid.height(),
            live = engine.live_count,
            "generation engine seeded"
        );
        Ok(engine)
    }

    /// Replace the current generation with independent fair coin flips.
    pub fn reseed(&mut self) {
        let range = self.half(self.current);
        let cells = &mut self.cells[range];
        self.rng.fill_bits(cells);
        let live = cells.iter().map(|&c| usize::from(c)).sum();
        self.reset_population(live);
        self.generation = 0;
    }

    /// Advance one generation and return the cells now alive, row by row.
    pub fn step(&mut self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.advance(|_, _| {});
        self.alive_cells()
    }

    /// Advance one generation, calling `draw(x, y)` for each cell that is
    /// alive in it, in row-major order.
    pub fn step_with(&mut self, draw: impl FnMut(usize, usize)) {
        self.advance(draw);
    }

    fn advance(&mut self, mut emit: impl FnMut(usize, usize)) {
        // Reset if things have gotten too stable
        if self.stable_generations > self.stability_limit {
            info!(limit = self.stability_limit, "reached stable generation limit, reseeding");
            self.reseed();
            self.reseeds += 1;
        }

        self.current ^= 1;

        let grid = self.grid;
        let (front, back) = self.cells.split_at_mut(grid.size());
        let (prev, next): (&[u8], &mut [u8]) =
            if self.current == 0 { (&*back, front) } else { (&*front, back) };

        let mut new_live = 0usize;
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let i = grid.index(x, y);
                let count: u8 = grid.neighbor_indices(i, x, y).iter().map(|&n| prev[n]).sum();

                let state = match count {
                    3 => 1,       // Birth or survival
                    2 => prev[i], // Unchanged
                    _ => 0,       // Under- or overpopulation
                };
                next[i] = state;
                new_live += usize::from(state);

                if state == 1 {
                    emit(x, y);
                }
            }
        }

        self.live_count = new_live;
        self.generation += 1;

        let delta = new_live.abs_diff(self.stability_baseline);
        if delta == 0 || delta < self.stability_delta_threshold {
            self.stable_generations = self.stable_generations.saturating_add(1);
        } else {
            self.stable_generations = 0;
            self.stability_baseline = new_live;
        }
    }
}

impl<R> GenerationEngine<R> {
    pub fn grid(&self) -> GridSize { self.grid }
    pub fn cell_size(&self) -> usize { self.cell_size }

    /// Cells alive in the current generation.
    pub fn live_count(&self) -> usize { self.live_count }

    /// Consecutive generations whose population stayed within the delta threshold.
    pub fn stable_generations(&self) -> u32 { self.stable_generations }

    /// Generations computed since the grid was last seeded, cleared or loaded.
    pub fn generation(&self) -> u64 { self.generation }

    /// Reseeds forced by the stable generation limit.
    pub fn reseeds(&self) -> u64 { self.reseeds }

    /// The current generation, one 0/1 byte per cell in row-major order.
    pub fn cells(&self) -> &[u8] {
        &self.cells[self.half(self.current)]
    }

    /// The generation the current one was computed from.
    pub fn previous_cells(&self) -> &[u8] {
        &self.cells[self.half(self.current ^ 1)]
    }

    pub fn cell(&self, x: usize, y: usize) -> bool {
        self.cells()[self.grid.index(x % self.grid.width(), y % self.grid.height())] == 1
    }

    /// Alive cells of the current generation, row by row.
    pub fn alive_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let grid = self.grid;
        self.cells()
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c == 1)
            .map(move |(i, _)| grid.coords(i))
    }

    /// Set one cell, wrapping coordinates onto the torus. Restarts stagnation tracking.
    pub fn set_cell(&mut self, x: usize, y: usize, alive: bool) {
        let i = self.grid.index(x % self.grid.width(), y % self.grid.height());
        let offset = self.half(self.current).start;
        let cell = &mut self.cells[offset + i];
        let live = self.live_count - usize::from(*cell) + usize::from(alive);
        *cell = u8::from(alive);
        self.reset_population(live);
    }

    /// Kill every cell in the current generation.
    pub fn clear(&mut self) {
        let range = self.half(self.current);
        self.cells[range].fill(0);
        self.reset_population(0);
        self.generation = 0;
    }

    /// Clear the grid and place `pattern` with its top-left corner at `(x, y)`.
    pub fn load_pattern(&mut self, pattern: &Pattern, x: usize, y: usize) {
        self.clear();
        for &(dx, dy) in pattern.cells {
            self.set_cell(x + dx, y + dy, true);
        }
    }

    /// Like [`GenerationEngine::load_pattern`], centred on the grid.
    pub fn load_pattern_centered(&mut self, pattern: &Pattern) {
        let x = self.grid.width().saturating_sub(pattern.width()) / 2;
        let y = self.grid.height().saturating_sub(pattern.height()) / 2;
        self.load_pattern(pattern, x, y);
    }

    fn half(&self, which: usize) -> std::ops::Range<usize> {
        let size = self.grid.size();
        which * size..(which + 1) * size
    }

    fn reset_population(&mut self, live: usize) {
        self.live_count = live;
        self.stability_baseline = live;
        self.stable_generations = 0;
    }
}
