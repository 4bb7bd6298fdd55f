use ndarray::Array2;

use crate::*;

pub use random::*;

mod random;

/// Produces the mine mask for a fresh game.
///
/// Implementations must place exactly `config.mines` mines, never inside the
/// safe region, or fail; a silently short board is not an acceptable result.
pub trait MinePlacer {
    fn place(&mut self, config: GameConfig) -> Result<Array2<bool>>;
}

/// Cells a placer may mine: everything except the safe region.
pub(crate) fn placeable_cells(config: GameConfig) -> CellCount {
    let reserved: CellCount = safe_region(config.grid_size)
        .iter()
        .collect::<std::collections::BTreeSet<_>>()
        .len()
        .try_into()
        .expect("safe region exceeds CellCount");
    config.total_cells().saturating_sub(reserved)
}
