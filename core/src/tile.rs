use serde::{Deserialize, Serialize};

/// Player-visible state of a single cell, owned by the game state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellStatus {
    Hidden,
    /// Safe cell, with the number of mines among its neighbors.
    Revealed(u8),
    MineRevealed,
}

impl CellStatus {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }
}

impl Default for CellStatus {
    fn default() -> Self {
        Self::Hidden
    }
}

/// What a renderer should draw for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayValue {
    Hidden,
    MineMarker,
    Count(u8),
}

impl From<CellStatus> for DisplayValue {
    fn from(status: CellStatus) -> Self {
        match status {
            CellStatus::Hidden => Self::Hidden,
            CellStatus::Revealed(count) => Self::Count(count),
            CellStatus::MineRevealed => Self::MineMarker,
        }
    }
}
