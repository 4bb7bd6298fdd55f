use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What the presentation layer may know about one cell.
///
/// Mines stay `Hidden` until a loss force-reveals them as `Mine`. A flag
/// keeps rendering as `Flagged` even when the cell under it turns out to be
/// a mine, matching the rule that losing leaves flags untouched.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
}

/// Read-only view of the whole game, rebuilt per query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub grid_size: Coord,
    pub status: GameStatus,
    pub mines_left: isize,
    pub time_elapsed: u32,
    pub triggered_mine: Option<Coord2>,
    pub cells: Array2<CellView>,
}

impl Snapshot {
    pub fn from_engine(engine: &GameEngine) -> Self {
        let grid = engine.grid();
        let cells = grid.cells().map(|cell| {
            if cell.is_flagged {
                CellView::Flagged
            } else if !cell.is_revealed {
                CellView::Hidden
            } else if cell.is_mine {
                CellView::Mine
            } else {
                CellView::Revealed(cell.adjacent_mines)
            }
        });

        Self {
            grid_size: grid.size(),
            status: engine.status(),
            mines_left: engine.mines_left(),
            time_elapsed: engine.time_elapsed(),
            triggered_mine: engine.triggered_mine(),
            cells,
        }
    }
}
