use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Status of one game instance.
///
/// Every (re)start begins at `Playing`; `Won` and `Lost` are terminal until
/// the next reset.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Playing
    }
}

/// Owns the grid and the game-status state machine.
///
/// All mutation goes through the operations below: the presentation layer
/// drives player input, an external scheduler drives [`tick`], and
/// [`snapshot`] is the read surface. Everything runs synchronously on the
/// caller's thread; there is no internal parallelism.
///
/// [`tick`]: GameEngine::tick
/// [`snapshot`]: GameEngine::snapshot
#[derive(Clone, Debug)]
pub struct GameEngine {
    config: GameConfig,
    grid: Grid,
    status: GameStatus,
    time_elapsed: u32,
    flag_mode: bool,
    triggered_mine: Option<Coord2>,
    last_outcome: Option<GameOutcome>,
    rng: SmallRng,
}

impl GameEngine {
    /// Builds an engine and starts the first game. The seed determines every
    /// mine layout this instance will produce.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let grid = Self::generate_grid(config, &mut rng)?;
        let mut engine = Self {
            config,
            grid,
            status: GameStatus::Playing,
            time_elapsed: 0,
            flag_mode: false,
            triggered_mine: None,
            last_outcome: None,
            rng,
        };
        engine.open_safe_region();
        Ok(engine)
    }

    /// Starts a game over an explicit grid, bypassing placement and the
    /// safe-region reveal. Intended for deterministic layouts (tests,
    /// replays).
    pub fn from_grid(grid: Grid) -> Self {
        Self {
            config: GameConfig::new_unchecked(grid.size(), grid.mine_count()),
            grid,
            status: GameStatus::Playing,
            time_elapsed: 0,
            flag_mode: false,
            triggered_mine: None,
            last_outcome: None,
            rng: SmallRng::seed_from_u64(0),
        }
    }

    /// Applies a new configuration and starts a fresh game. The previous
    /// game is kept intact when placement fails.
    pub fn configure(&mut self, config: GameConfig) -> Result<()> {
        let grid = Self::generate_grid(config, &mut self.rng)?;
        self.config = config;
        self.install(grid);
        Ok(())
    }

    /// Discards the board and starts over with the current configuration.
    pub fn reset(&mut self) -> Result<()> {
        let grid = Self::generate_grid(self.config, &mut self.rng)?;
        self.install(grid);
        Ok(())
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn total_mines(&self) -> CellCount {
        self.grid.mine_count()
    }

    /// Display counter: total mines minus active flags. Not clamped, so
    /// over-flagging drives it negative; it never gates the win condition.
    pub fn mines_left(&self) -> isize {
        (self.grid.mine_count() as isize) - (self.grid.flagged_count() as isize)
    }

    pub fn time_elapsed(&self) -> u32 {
        self.time_elapsed
    }

    pub fn flag_mode(&self) -> bool {
        self.flag_mode
    }

    /// The mine that ended the game, if it ended in a loss.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Result of the most recent terminal transition, for statistics
    /// aggregation. Cleared on reset.
    pub fn last_outcome(&self) -> Option<GameOutcome> {
        self.last_outcome
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_engine(self)
    }

    /// Reveals the cell at `coords`. Taps that are expected in normal play
    /// but change nothing (already revealed, flagged, game over) return
    /// `Ok(NoChange)`; only out-of-bounds coordinates are an error.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        if self.status.is_terminal() {
            return Ok(RevealOutcome::NoChange);
        }
        Ok(self.reveal_cell(coords))
    }

    /// On a revealed numbered cell whose flagged-neighbor count matches its
    /// number, reveals every remaining hidden neighbor in one action. A
    /// misplaced flag can end the game here.
    pub fn chord_reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        if self.status.is_terminal() {
            return Ok(RevealOutcome::NoChange);
        }

        let cell = *self.grid.cell(coords);
        if !cell.is_revealed || cell.is_mine || cell.adjacent_mines == 0 {
            return Ok(RevealOutcome::NoChange);
        }
        if self.grid.flagged_neighbor_count(coords) != cell.adjacent_mines {
            return Ok(RevealOutcome::NoChange);
        }

        let size = self.grid.size();
        let mut outcome = RevealOutcome::NoChange;
        for next in neighbors(coords, (size, size)) {
            if self.status.is_terminal() {
                break;
            }
            outcome = outcome | self.reveal_cell(next);
        }
        Ok(outcome)
    }

    /// Inverts the flag at `coords` while the game is running. Flagging a
    /// revealed cell is a no-op.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        if self.status.is_terminal() {
            return Ok(MarkOutcome::NoChange);
        }
        Ok(self.grid.toggle_flag(coords))
    }

    /// Flips how [`cell_action`] dispatches. Pure UI state: survives resets
    /// and does not touch the grid.
    ///
    /// [`cell_action`]: GameEngine::cell_action
    pub fn toggle_flag_mode(&mut self) {
        self.flag_mode = !self.flag_mode;
    }

    /// Generic "cell tapped" input from the presentation layer: flags when
    /// flag mode is on, reveals otherwise.
    pub fn cell_action(&mut self, coords: Coord2) -> Result<ActionOutcome> {
        if self.flag_mode {
            Ok(ActionOutcome::Marked(self.toggle_flag(coords)?))
        } else {
            Ok(ActionOutcome::Revealed(self.reveal(coords)?))
        }
    }

    /// Advances elapsed time by one second. Called by the external clock
    /// driver; stray ticks delivered after the game ended are ignored.
    pub fn tick(&mut self) {
        if matches!(self.status, GameStatus::Playing) {
            self.time_elapsed += 1;
        }
    }

    fn generate_grid(config: GameConfig, rng: &mut SmallRng) -> Result<Grid> {
        let mut placer = ShuffledPlacer::new(rng.random());
        Grid::generate(config, &mut placer)
    }

    fn install(&mut self, grid: Grid) {
        self.grid = grid;
        self.status = GameStatus::Playing;
        self.time_elapsed = 0;
        self.triggered_mine = None;
        self.last_outcome = None;
        self.open_safe_region();
        log::debug!(
            "new game: size {}, mines {}",
            self.config.grid_size,
            self.config.mines
        );
    }

    /// Force-reveals the 2x2 center block. Placement never mines these
    /// cells, so each one is a plain flood entry point; a zero-adjacent one
    /// opens its whole region.
    fn open_safe_region(&mut self) {
        for coords in safe_region(self.grid.size()) {
            let cell = *self.grid.cell(coords);
            if cell.is_hidden() && !cell.is_mine {
                self.grid.flood_reveal(coords);
            }
        }
        if self.grid.is_cleared() {
            self.end_game(true);
        }
    }

    fn reveal_cell(&mut self, coords: Coord2) -> RevealOutcome {
        let cell = *self.grid.cell(coords);
        if cell.is_revealed || cell.is_flagged {
            return RevealOutcome::NoChange;
        }

        if cell.is_mine {
            self.triggered_mine = Some(coords);
            self.grid.reveal_all_mines();
            self.end_game(false);
            return RevealOutcome::HitMine;
        }

        let opened = self.grid.flood_reveal(coords);
        log::debug!("opened {} cells from {:?}", opened, coords);

        if self.grid.is_cleared() {
            self.end_game(true);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.status.is_terminal() {
            return;
        }
        self.status = if won { GameStatus::Won } else { GameStatus::Lost };
        self.last_outcome = Some(GameOutcome {
            won,
            time_elapsed: self.time_elapsed,
        });
        log::debug!("game ended after {}s, won: {}", self.time_elapsed, won);
    }
}
