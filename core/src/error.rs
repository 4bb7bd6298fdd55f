use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("coordinates outside the grid")]
    InvalidCoords,
    #[error("mine count does not fit the board")]
    TooManyMines,
    #[error("placement attempt budget exhausted before reaching the mine count")]
    PlacementBudgetExhausted,
}

pub type Result<T> = core::result::Result<T, GameError>;
