use ndarray::Array2;
use std::collections::VecDeque;

use crate::*;

/// Square cell matrix plus the adjacency and flood-fill machinery.
///
/// Owned exclusively by [`GameEngine`]; all mutation goes through the
/// engine's operations, which keep the revealed/flagged counts in sync.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Array2<Cell>,
    mine_count: CellCount,
    revealed_safe: CellCount,
    flagged: CellCount,
}

impl Grid {
    /// Builds a grid from a generated mine mask and precomputes every
    /// non-mine cell's neighbor count.
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mut cells = Array2::<Cell>::default(mine_mask.raw_dim());
        let mut mine_count: CellCount = 0;

        for (index, &is_mine) in mine_mask.indexed_iter() {
            if is_mine {
                cells[index].is_mine = true;
                mine_count += 1;
            }
        }

        let bounds = (
            mine_mask.dim().0.try_into().expect("grid rows exceed Coord"),
            mine_mask.dim().1.try_into().expect("grid cols exceed Coord"),
        );
        for ((row, col), cell) in cells.indexed_iter_mut() {
            if cell.is_mine {
                continue;
            }
            cell.adjacent_mines = neighbors((row as Coord, col as Coord), bounds)
                .filter(|&pos| mine_mask[pos.to_nd_index()])
                .count()
                .try_into()
                .expect("more than 8 neighbors");
        }

        Self {
            cells,
            mine_count,
            revealed_safe: 0,
            flagged: 0,
        }
    }

    /// Deterministic construction from explicit mine positions, for tests
    /// and replays.
    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default([usize::from(size); 2]);

        for &coords in mine_coords {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    /// Places mines with `placer` and builds the grid.
    pub fn generate(config: GameConfig, placer: &mut dyn MinePlacer) -> Result<Self> {
        Ok(Self::from_mine_mask(placer.place(config)?))
    }

    pub fn size(&self) -> Coord {
        self.cells.dim().0.try_into().expect("grid rows exceed Coord")
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len().try_into().expect("cell count exceeds CellCount")
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.revealed_safe
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged
    }

    /// Every safe cell revealed, i.e. the win condition.
    pub fn is_cleared(&self) -> bool {
        self.revealed_safe == self.safe_cell_count()
    }

    pub fn cell(&self, coords: Coord2) -> &Cell {
        &self.cells[coords.to_nd_index()]
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn flagged_neighbor_count(&self, coords: Coord2) -> u8 {
        self.cells
            .iter_neighbors(coords)
            .filter(|&pos| self.cell(pos).is_flagged)
            .count()
            .try_into()
            .expect("more than 8 neighbors")
    }

    /// Inverts the flag on a hidden cell; revealed cells cannot be flagged.
    pub(crate) fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_revealed {
            return MarkOutcome::NoChange;
        }

        cell.is_flagged = !cell.is_flagged;
        if cell.is_flagged {
            self.flagged += 1;
        } else {
            self.flagged -= 1;
        }
        MarkOutcome::Changed
    }

    /// Reveals a hidden non-mine cell and, when it has no mine neighbors,
    /// flood-fills the connected zero region and its numbered border.
    ///
    /// Runs iteratively over a work list; cells are marked revealed as they
    /// are queued, so each position is visited at most once and no separate
    /// visited set is needed. Returns how many cells were opened.
    pub(crate) fn flood_reveal(&mut self, start: Coord2) -> CellCount {
        let size = self.size();
        let mut opened: CellCount = 1;
        self.cells[start.to_nd_index()].is_revealed = true;
        self.revealed_safe += 1;

        let mut to_visit = VecDeque::from([start]);
        while let Some(at) = to_visit.pop_front() {
            if self.cells[at.to_nd_index()].adjacent_mines != 0 {
                continue;
            }

            for next in neighbors(at, (size, size)) {
                let cell = &mut self.cells[next.to_nd_index()];
                // a zero-adjacency cell has no mine neighbors; skip rather
                // than trust a contradictory mask
                if cell.is_mine || cell.is_revealed || cell.is_flagged {
                    continue;
                }

                cell.is_revealed = true;
                self.revealed_safe += 1;
                opened += 1;
                log::trace!("flood opened {:?}, neighbor mines: {}", next, cell.adjacent_mines);
                to_visit.push_back(next);
            }
        }

        opened
    }

    /// Marks every mine revealed so the presentation can show the full field
    /// after a loss. Flags are left as the player placed them.
    pub(crate) fn reveal_all_mines(&mut self) {
        for cell in self.cells.iter_mut() {
            if cell.is_mine {
                cell.is_revealed = true;
            }
        }
    }

    pub(crate) fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }
}
