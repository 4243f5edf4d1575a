use std::collections::VecDeque;

use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::*;

/// Overall progress of one play session.
///
/// Valid transitions: `Ready -> Underway` on the first dig,
/// `Underway -> Failed` on a detonation, `Underway -> Succeeded` once
/// every plot is a revealed hole or a correctly spent flag.
/// [`Game::reset`] returns to `Ready` from anywhere.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Progress {
    /// Fresh board, mines planted, nothing dug yet.
    Ready,
    /// Clearing is underway.
    Underway,
    /// A mine was detonated.
    Failed,
    /// The board was cleared.
    Succeeded,
}

impl Progress {
    pub const fn is_underway(self) -> bool {
        matches!(self, Self::Underway)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Failed | Self::Succeeded)
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::Ready
    }
}

/// One play session: a grid of [`Plot`]s plus flag, hole, and tick
/// bookkeeping. Dimensions are fixed for the life of the instance; the
/// game exclusively owns its grid and counters.
///
/// All operations are synchronous and meant to be driven from a single
/// control thread in response to discrete input events. Coordinates
/// passed to the per-plot operations must be in bounds; out-of-range
/// coordinates are a caller bug, asserted in debug builds.
#[derive(Clone, Debug)]
pub struct Game {
    grid: Array2<Plot>,
    mine_count: CellCount,
    flags_remaining: CellCount,
    holes_revealed: CellCount,
    ticks_elapsed: u32,
    progress: Progress,
    rng: SmallRng,
}

impl Game {
    /// New session with an entropy-seeded generator. Mines are placed
    /// immediately and the session starts `Ready`.
    pub fn new(config: GameConfig) -> Self {
        Self::with_seed(config, rand::rng().random())
    }

    /// New session whose mine layout is fully determined by `seed`.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        let mut game = Self {
            grid: Array2::default(config.size.to_nd_index()),
            mine_count: config.mines,
            flags_remaining: 0,
            holes_revealed: 0,
            ticks_elapsed: 0,
            progress: Progress::Ready,
            rng: SmallRng::seed_from_u64(seed),
        };
        game.reset();
        game
    }

    /// New session with mines at exactly the given coordinates, bypassing
    /// randomness. Duplicates collapse into a single mine. Meant for
    /// scripted scenarios; a later [`Game::reset`] re-randomizes the
    /// layout.
    pub fn with_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut grid: Array2<Plot> = Array2::default(size.to_nd_index());
        let mut planted: CellCount = 0;

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            if grid[coords.to_nd_index()].plant_mine() {
                planted += 1;
            }
        }

        let config = GameConfig::new(size, planted)?;
        Ok(Self {
            grid,
            mine_count: config.mines,
            flags_remaining: config.mines,
            holes_revealed: 0,
            ticks_elapsed: 0,
            progress: Progress::Ready,
            rng: SmallRng::seed_from_u64(0),
        })
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn is_finished(&self) -> bool {
        self.progress.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        let (width, height) = self.grid.dim();
        (width as Coord, height as Coord)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    /// Flags still available to plant, counting down from the mine count.
    pub fn flags_remaining(&self) -> CellCount {
        self.flags_remaining
    }

    pub fn holes_revealed(&self) -> CellCount {
        self.holes_revealed
    }

    pub fn ticks_elapsed(&self) -> u32 {
        self.ticks_elapsed
    }

    /// Visible state and mine flag of the plot at `coords`.
    pub fn plot_state(&self, coords: Coord2) -> (PlotState, bool) {
        debug_assert!(self.in_bounds(coords), "coordinates out of bounds: {coords:?}");
        self.grid[coords.to_nd_index()].state()
    }

    /// Number of mined plots in the 8-neighbourhood of `coords`, clamped
    /// to the grid; edge and corner cells simply have fewer neighbours.
    pub fn adjacent_mines(&self, coords: Coord2) -> u8 {
        debug_assert!(self.in_bounds(coords), "coordinates out of bounds: {coords:?}");
        neighbors(coords, self.size())
            .filter(|&pos| self.grid[pos.to_nd_index()].is_mined())
            .count() as u8
    }

    /// Reinitializes the board for a fresh game: every plot undug and
    /// mine-free, then exactly `mine_count` mines placed by rejection
    /// sampling from the owned generator, counters zeroed. Callable from
    /// any state.
    pub fn reset(&mut self) {
        for plot in self.grid.iter_mut() {
            plot.reset();
        }

        let (width, height) = self.size();
        let mut planted = 0;
        while planted < self.mine_count {
            let x = self.rng.random_range(0..width);
            let y = self.rng.random_range(0..height);
            if self.grid[(x, y).to_nd_index()].plant_mine() {
                planted += 1;
            }
        }
        log::debug!("planted {planted} mines on a {width}x{height} board");

        self.flags_remaining = self.mine_count;
        self.holes_revealed = 0;
        self.ticks_elapsed = 0;
        self.progress = Progress::Ready;
    }

    /// Plants or removes a flag at `coords`. Only live while the game is
    /// underway; flags are capped at the mine count. Placing a flag
    /// re-checks the win condition, since flagging the last mine is a
    /// valid way to finish.
    pub fn toggle_flag(&mut self, coords: Coord2) {
        debug_assert!(self.in_bounds(coords), "coordinates out of bounds: {coords:?}");
        if !self.progress.is_underway() {
            return;
        }

        let flag_available = self.flags_remaining > 0;
        match self.grid[coords.to_nd_index()].toggle_flag(flag_available) {
            FlagToggle::Planted => {
                self.flags_remaining -= 1;
                self.check_if_cleared();
            }
            FlagToggle::Removed => self.flags_remaining += 1,
            FlagToggle::NoChange => {}
        }
    }

    /// Digs a hole at `coords`.
    ///
    /// The first dig of a session can never detonate: if the chosen plot
    /// turns out to be mined, the board is silently re-planted until it
    /// is not. After that, digging a mined plot reveals every mine and
    /// fails the game, while digging a safe plot flood-fills the
    /// surrounding zero-adjacency region and re-checks the win condition.
    /// Digs on flagged, already-dug, or exploded plots, or once the game
    /// is decided, are no-ops.
    pub fn dig(&mut self, coords: Coord2) {
        debug_assert!(self.in_bounds(coords), "coordinates out of bounds: {coords:?}");

        match self.progress {
            Progress::Ready => {
                while !self.grid[coords.to_nd_index()].start_dig() {
                    log::debug!("first dig at {coords:?} hit a mine, re-planting");
                    self.reset();
                }
                self.try_dig(coords);
                self.progress = Progress::Underway;
            }
            Progress::Underway => {
                if !self.grid[coords.to_nd_index()].is_undug() {
                    return;
                }
                if self.grid[coords.to_nd_index()].start_dig() {
                    self.try_dig(coords);
                    self.check_if_cleared();
                } else {
                    log::debug!("detonated mine at {coords:?}");
                    self.show_mines();
                    self.progress = Progress::Failed;
                }
            }
            Progress::Failed | Progress::Succeeded => {}
        }
    }

    /// Advances the elapsed-time counter. Driven by an external periodic
    /// timer; only counts while the game is underway.
    pub fn tick(&mut self) {
        if self.progress.is_underway() {
            self.ticks_elapsed += 1;
        }
    }

    /// Worklist flood fill. [`Plot::start_dig`] on the origin only vets
    /// it; this is what actually turns the origin and every cascaded
    /// neighbour into a hole. A plot flips from undug to hole before its
    /// neighbours are enqueued, so revisits are no-ops and the fill
    /// terminates after at most one pass over the grid.
    fn try_dig(&mut self, start: Coord2) {
        let mut to_visit = VecDeque::from([start]);

        while let Some(coords) = to_visit.pop_front() {
            if !self.grid[coords.to_nd_index()].continue_dig() {
                continue;
            }
            self.holes_revealed += 1;

            let adjacent = self.adjacent_mines(coords);
            log::trace!("dug hole at {coords:?}, {adjacent} adjacent mines");
            if adjacent == 0 {
                to_visit.extend(neighbors(coords, self.size()));
            }
        }
    }

    /// Win condition: every plot is either a revealed hole or a correctly
    /// spent flag.
    fn check_if_cleared(&mut self) {
        let total = self.grid.len() as CellCount;
        if self.holes_revealed + self.mine_count - self.flags_remaining == total {
            log::debug!("board cleared after {} ticks", self.ticks_elapsed);
            self.progress = Progress::Succeeded;
        }
    }

    fn show_mines(&mut self) {
        for plot in self.grid.iter_mut() {
            plot.reveal();
        }
    }

    fn in_bounds(&self, coords: Coord2) -> bool {
        let (width, height) = self.size();
        coords.0 < width && coords.1 < height
    }
}
