//! Minesweeper gameplay engine.
//!
//! [`GameEngine`] owns a square [`Grid`] of [`Cell`]s and the win/loss state
//! machine. It is driven by a [`GameConfig`], a stream of player actions
//! (reveal, flag, chord, reset) and an externally scheduled [`GameEngine::tick`];
//! it answers queries through [`Snapshot`]. Mine placement keeps the 2x2
//! center block safe and opens it on every (re)start.

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use snapshot::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod grid;
mod snapshot;
mod types;

pub const MIN_GRID_SIZE: Coord = 10;
pub const MAX_GRID_SIZE: Coord = 60;
pub const MIN_MINES: CellCount = 10;
pub const MAX_MINES: CellCount = 500;

/// Board parameters applied on (re)start.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub grid_size: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(grid_size: Coord, mines: CellCount) -> Self {
        Self { grid_size, mines }
    }

    /// Clamps both parameters into the supported ranges: size 10..=60, mines
    /// at least 10 and at most a quarter of the board, capped at 500.
    pub fn new(grid_size: Coord, mines: CellCount) -> Self {
        let grid_size = grid_size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE);
        let mine_cap = (mult(grid_size, grid_size) / 4).min(MAX_MINES);
        let mines = mines.clamp(MIN_MINES, mine_cap);
        Self::new_unchecked(grid_size, mines)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.grid_size, self.grid_size)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(MIN_GRID_SIZE, MIN_MINES)
    }
}

/// Terminal result reported toward the statistics layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub won: bool,
    pub time_elapsed: u32,
}

/// Outcome of a flag toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Outcome of revealing one or more cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

/// Used to merge outcomes when a chord reveals several cells.
impl core::ops::BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            // hitting a mine has priority
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            // then winning
            (Won, _) => Won,
            (_, Won) => Won,
            // then a plain reveal
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

/// Outcome of a dispatched cell action; which side is produced depends on
/// the active flag mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Revealed(RevealOutcome),
    Marked(MarkOutcome),
}

impl ActionOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Revealed(outcome) => outcome.has_update(),
            Self::Marked(outcome) => outcome.has_update(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_clamps_size_and_mines() {
        let config = GameConfig::new(4, 2);
        assert_eq!(config, GameConfig::new_unchecked(10, 10));

        let config = GameConfig::new(200, 9999);
        assert_eq!(config, GameConfig::new_unchecked(60, 500));
    }

    #[test]
    fn config_mine_cap_is_quarter_of_board() {
        // 10x10 board caps at 25 mines, well below the global cap
        assert_eq!(GameConfig::new(10, 100).mines, 25);
        // 50x50 board would allow 625, the global cap of 500 wins
        assert_eq!(GameConfig::new(50, 1000).mines, 500);
    }

    #[test]
    fn config_does_not_require_even_sizes() {
        assert_eq!(GameConfig::new(11, 10).grid_size, 11);
    }

    #[test]
    fn reveal_outcomes_merge_by_severity() {
        use RevealOutcome::*;

        assert_eq!(NoChange | Revealed, Revealed);
        assert_eq!(Revealed | Won, Won);
        assert_eq!(Won | HitMine, HitMine);
        assert_eq!(NoChange | NoChange, NoChange);
    }
}
