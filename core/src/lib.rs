#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::str::FromStr;
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// `(rows, cols)`
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new((rows, cols): Coord2, mines: CellCount) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidDimensions);
        }
        if mines >= mult(rows, cols) {
            return Err(GameError::InvalidMineCount);
        }
        Ok(Self::new_unchecked((rows, cols), mines))
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn cols(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Smallest number of mine-free cells a zero-count start needs: the cell
    /// itself plus its neighbors, taken at the least connected position.
    pub const fn min_clear_area(&self) -> CellCount {
        match self.size {
            (1, 1) => 1,
            (1, _) | (_, 1) => 2,
            _ => 4,
        }
    }

    /// Whether a safe cell with no adjacent mines can exist at this density.
    pub const fn admits_safe_start(&self) -> bool {
        self.mines <= self.total_cells().saturating_sub(self.min_clear_area())
    }
}

/// Standard board presets, indexed from easiest to hardest.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Beginner, Self::Intermediate, Self::Expert];

    pub const fn config(self) -> GameConfig {
        use Difficulty::*;
        match self {
            Beginner => GameConfig::new_unchecked((8, 8), 10),
            Intermediate => GameConfig::new_unchecked((16, 16), 40),
            Expert => GameConfig::new_unchecked((24, 24), 99),
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub const fn name(self) -> &'static str {
        use Difficulty::*;
        match self {
            Beginner => "beginner",
            Intermediate => "intermediate",
            Expert => "expert",
        }
    }
}

impl FromStr for Difficulty {
    type Err = ();

    /// Accepts either the preset index or its name.
    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(index) = s.parse::<usize>() {
            return Self::from_index(index).ok_or(());
        }
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// Dimensions and mine positions of a game. Never changes once built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr")]
pub struct Board {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

/// Wire form of [`Board`]; the mine count is always recomputed from the mask.
#[derive(Deserialize)]
struct BoardRepr {
    mine_mask: Array2<bool>,
}

impl TryFrom<BoardRepr> for Board {
    type Error = GameError;

    fn try_from(repr: BoardRepr) -> Result<Self> {
        let (rows, cols) = repr.mine_mask.dim();
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidDimensions);
        }
        let max = usize::from(Coord::MAX);
        if rows > max || cols > max {
            return Err(GameError::InvalidBoardShape);
        }

        let board = Self::from_mine_mask(repr.mine_mask);
        if board.mine_count >= board.total_cells() {
            return Err(GameError::InvalidMineCount);
        }
        Ok(board)
    }
}

impl Board {
    /// Places `config.mines` mines uniformly at random.
    pub fn random<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Self {
        Self::from_mine_mask(sample_mines(config, rng))
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidDimensions);
        }

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::OutOfBoundsCoordinate);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        let board = Self::from_mine_mask(mine_mask);
        if board.mine_count >= board.total_cells() {
            return Err(GameError::InvalidMineCount);
        }
        Ok(board)
    }

    pub(crate) fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBoundsCoordinate)
        }
    }

    /// `(rows, cols)`
    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mine_mask.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    /// Out of bounds coordinates never hold a mine.
    pub fn is_mine(&self, coords: Coord2) -> bool {
        self.mine_mask
            .get(coords.to_nd_index())
            .copied()
            .unwrap_or(false)
    }

    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    pub fn count_neighbor_mines(&self, coords: Coord2) -> u8 {
        self.neighbors(coords).filter(|&pos| self.is_mine(pos)).count() as u8
    }

    /// Mine positions in row-major order.
    pub fn mine_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    /// Safe cells with no adjacent mines, in row-major order.
    pub fn safe_start_candidates(&self) -> Vec<Coord2> {
        let (rows, cols) = self.size();
        (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .filter(|&coords| !self.is_mine(coords) && self.count_neighbor_mines(coords) == 0)
            .collect()
    }
}

/// Result of a single reveal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Continue,
    Win,
    Loss,
}

impl Outcome {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Win | Self::Loss)
    }
}
