use ndarray::Array2;
use rand::prelude::*;

use super::*;

/// Default strategy: one shuffle-and-take pass over the non-safe cells,
/// which yields the exact requested mine count in O(cells).
#[derive(Clone, Debug)]
pub struct ShuffledPlacer {
    rng: SmallRng,
}

impl ShuffledPlacer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MinePlacer for ShuffledPlacer {
    fn place(&mut self, config: GameConfig) -> Result<Array2<bool>> {
        if config.mines > placeable_cells(config) {
            return Err(GameError::TooManyMines);
        }

        let size = usize::from(config.grid_size);
        let reserved: Vec<usize> = safe_region(config.grid_size)
            .iter()
            .map(|&(row, col)| usize::from(row) * size + usize::from(col))
            .collect();
        let open: Vec<usize> = (0..size * size)
            .filter(|flat| !reserved.contains(flat))
            .collect();

        let mut mine_mask: Array2<bool> = Array2::default([size; 2]);
        for pick in rand::seq::index::sample(&mut self.rng, open.len(), config.mines.into()) {
            let flat = open[pick];
            mine_mask[[flat / size, flat % size]] = true;
        }
        Ok(mine_mask)
    }
}

/// Attempts per requested mine before [`RejectionPlacer`] gives up.
pub const ATTEMPT_BUDGET_FACTOR: u32 = 10;

/// Rejection-sampling strategy with a bounded attempt budget.
///
/// Kept alongside [`ShuffledPlacer`] for parity with the classic scheme.
/// Dense boards can exhaust the budget, which surfaces as
/// [`GameError::PlacementBudgetExhausted`] instead of a short board.
#[derive(Clone, Debug)]
pub struct RejectionPlacer {
    rng: SmallRng,
}

impl RejectionPlacer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MinePlacer for RejectionPlacer {
    fn place(&mut self, config: GameConfig) -> Result<Array2<bool>> {
        if config.mines > placeable_cells(config) {
            return Err(GameError::TooManyMines);
        }

        let reserved = safe_region(config.grid_size);
        let mut mine_mask: Array2<bool> = Array2::default([usize::from(config.grid_size); 2]);
        let mut placed: CellCount = 0;
        let budget = u32::from(config.mines) * ATTEMPT_BUDGET_FACTOR;

        for _ in 0..budget {
            if placed == config.mines {
                break;
            }
            let coords = (
                self.rng.random_range(0..config.grid_size),
                self.rng.random_range(0..config.grid_size),
            );
            if reserved.contains(&coords) || mine_mask[coords.to_nd_index()] {
                continue;
            }
            mine_mask[coords.to_nd_index()] = true;
            placed += 1;
        }

        if placed < config.mines {
            log::warn!(
                "placement budget exhausted, placed {} of {} mines",
                placed,
                config.mines
            );
            return Err(GameError::PlacementBudgetExhausted);
        }
        Ok(mine_mask)
    }
}
