use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board must have at least one row and one column")]
    InvalidDimensions,
    #[error("Mine count must be lower than the number of cells")]
    InvalidMineCount,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Game progress does not match its board")]
    InconsistentState,
    #[error("Coordinates are outside of the board")]
    OutOfBoundsCoordinate,
    #[error("Game already ended, no new moves are accepted")]
    InvalidMoveOnTerminalState,
    #[error("No safe starting cell found after {attempts} attempts")]
    NoSafeStart { attempts: u32 },
}

pub type Result<T> = core::result::Result<T, GameError>;
