//! Rules engine for a Minesweeper-style digging game.
//!
//! A [`Game`] owns a rectangular grid of [`Plot`]s, places mines at
//! construction, and advances through `Ready -> Underway -> Failed |
//! Succeeded` as the player digs holes and plants flags. A presentation
//! layer holds one `Game` per session, feeds it discrete actions
//! ([`Game::dig`], [`Game::toggle_flag`], [`Game::tick`],
//! [`Game::reset`]) and redraws itself from the state queries; the
//! engine is the sole source of truth and the only mutator of its grid.

use serde::{Deserialize, Serialize};

pub use error::*;
pub use game::*;
pub use plot::*;
pub use types::*;

mod error;
mod game;
mod plot;
mod types;

/// Board dimensions and mine count for one game session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Validated configuration. Both dimensions must be non-zero and the
    /// mine count must be at least one but leave at least one safe plot,
    /// so the first dig always has somewhere to land.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::ZeroDimension);
        }
        if mines == 0 {
            return Err(GameError::NoMines);
        }
        if mines >= mult(size.0, size.1) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(size, mines))
    }

    pub const fn total_plots(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}
