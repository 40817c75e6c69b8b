use alloc::vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

/// Per-cell progress of a single game played on a [`Board`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GameStateRepr")]
pub struct GameState {
    board: Board,
    cells: Array2<CellStatus>,
    revealed_safe_count: CellCount,
    status: GameStatus,
    triggered_mine: Option<Coord2>,
}

/// Wire form of [`GameState`], checked against its board before use.
#[derive(Deserialize)]
struct GameStateRepr {
    board: Board,
    cells: Array2<CellStatus>,
    revealed_safe_count: CellCount,
    status: GameStatus,
    triggered_mine: Option<Coord2>,
}

impl TryFrom<GameStateRepr> for GameState {
    type Error = GameError;

    fn try_from(repr: GameStateRepr) -> Result<Self> {
        let GameStateRepr {
            board,
            cells,
            revealed_safe_count,
            status,
            triggered_mine,
        } = repr;

        let (rows, cols) = board.size();
        if cells.dim() != (usize::from(rows), usize::from(cols)) {
            return Err(GameError::InvalidBoardShape);
        }

        let mut revealed: CellCount = 0;
        let mut exploded = None;
        for ((row, col), &cell) in cells.indexed_iter() {
            let coords = (row as Coord, col as Coord);
            match cell {
                CellStatus::Hidden => {}
                CellStatus::Revealed(count) => {
                    if board.is_mine(coords) || count != board.count_neighbor_mines(coords) {
                        return Err(GameError::InconsistentState);
                    }
                    revealed += 1;
                }
                CellStatus::MineRevealed => {
                    if !board.is_mine(coords) || exploded.replace(coords).is_some() {
                        return Err(GameError::InconsistentState);
                    }
                }
            }
        }

        let complete = revealed == board.safe_cell_count();
        let consistent = revealed == revealed_safe_count
            && triggered_mine == exploded
            && match status {
                GameStatus::InProgress => !complete && exploded.is_none(),
                GameStatus::Won => complete && exploded.is_none(),
                GameStatus::Lost => exploded.is_some(),
            };
        if !consistent {
            return Err(GameError::InconsistentState);
        }

        Ok(Self {
            board,
            cells,
            revealed_safe_count,
            status,
            triggered_mine,
        })
    }
}

impl GameState {
    pub fn new(board: Board) -> Self {
        let size = board.size();
        Self {
            board,
            cells: Array2::default(size.to_nd_index()),
            revealed_safe_count: 0,
            status: Default::default(),
            triggered_mine: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.revealed_safe_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.board.safe_cell_count()
    }

    /// The mine that ended the game, if it was lost.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<CellStatus> {
        let coords = self.board.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    pub fn cell_display_value(&self, coords: Coord2) -> Result<DisplayValue> {
        self.cell_at(coords).map(DisplayValue::from)
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<Outcome> {
        let coords = self.board.validate_coords(coords)?;
        self.check_in_progress()?;

        if self.board.is_mine(coords) {
            log::debug!("Stepped on mine at {:?}", coords);
            self.cells[coords.to_nd_index()] = CellStatus::MineRevealed;
            self.triggered_mine = Some(coords);
            self.end_game(GameStatus::Lost);
            return Ok(Outcome::Loss);
        }

        let opened = self.flood_reveal(coords);
        log::debug!("Reveal at {:?} opened {} cell(s)", coords, opened);

        if self.revealed_safe_count == self.board.safe_cell_count() {
            self.end_game(GameStatus::Won);
            Ok(Outcome::Win)
        } else {
            Ok(Outcome::Continue)
        }
    }

    /// Depth-first cascade from `start` over hidden safe cells, stopping at
    /// cells with adjacent mines. Returns how many cells were opened.
    fn flood_reveal(&mut self, start: Coord2) -> CellCount {
        let mut opened = 0;
        let mut to_visit = vec![start];

        while let Some(coords) = to_visit.pop() {
            if !self.cells[coords.to_nd_index()].is_hidden() || self.board.is_mine(coords) {
                continue;
            }

            let count = self.board.count_neighbor_mines(coords);
            self.cells[coords.to_nd_index()] = CellStatus::Revealed(count);
            self.revealed_safe_count += 1;
            opened += 1;
            log::trace!("Opened {:?}, adjacent mines: {}", coords, count);

            if count == 0 {
                let cells = &self.cells;
                to_visit.extend(
                    self.board
                        .neighbors(coords)
                        .filter(|&pos| cells[pos.to_nd_index()].is_hidden()),
                );
            }
        }

        opened
    }

    fn end_game(&mut self, status: GameStatus) {
        if self.status.is_finished() {
            return;
        }
        log::debug!(
            "Game ended {:?} with {}/{} safe cells revealed",
            status,
            self.revealed_safe_count,
            self.board.safe_cell_count()
        );
        self.status = status;
    }

    fn check_in_progress(&self) -> Result<()> {
        if self.status.is_finished() {
            Err(GameError::InvalidMoveOnTerminalState)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(size: Coord2, mines: &[Coord2]) -> GameState {
        GameState::new(Board::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn corner_reveal_cascades_to_win() {
        let mut game = game((3, 3), &[(0, 0)]);

        assert_eq!(game.reveal((2, 2)), Ok(Outcome::Win));
        assert_eq!(game.status(), GameStatus::Won);
        assert_eq!(game.revealed_safe_count(), 8);
        assert_eq!(game.cell_at((0, 0)), Ok(CellStatus::Hidden));
        assert_eq!(game.cell_at((1, 1)), Ok(CellStatus::Revealed(1)));
        assert_eq!(game.cell_at((2, 2)), Ok(CellStatus::Revealed(0)));
    }

    #[test]
    fn mine_reveal_loses_and_marks_only_that_cell() {
        let mut game = game((3, 3), &[(0, 0)]);

        assert_eq!(game.reveal((0, 0)), Ok(Outcome::Loss));
        assert_eq!(game.status(), GameStatus::Lost);
        assert_eq!(game.triggered_mine(), Some((0, 0)));
        assert_eq!(game.cell_display_value((0, 0)), Ok(DisplayValue::MineMarker));
        assert_eq!(game.revealed_safe_count(), 0);
        for row in 0..3 {
            for col in 0..3 {
                if (row, col) != (0, 0) {
                    assert_eq!(game.cell_at((row, col)), Ok(CellStatus::Hidden));
                }
            }
        }
    }

    #[test]
    fn numbered_cell_does_not_cascade() {
        let mut game = game((3, 3), &[(0, 0)]);

        assert_eq!(game.reveal((1, 1)), Ok(Outcome::Continue));
        assert_eq!(game.revealed_safe_count(), 1);
        assert_eq!(game.cell_display_value((1, 1)), Ok(DisplayValue::Count(1)));
        assert_eq!(game.cell_display_value((2, 2)), Ok(DisplayValue::Hidden));
    }

    #[test]
    fn cascade_stops_at_numbered_border() {
        // mines fence off the right column
        let mut game = game((3, 4), &[(0, 2), (2, 2)]);

        assert_eq!(game.reveal((1, 0)), Ok(Outcome::Continue));
        assert_eq!(game.cell_at((1, 1)), Ok(CellStatus::Revealed(2)));
        assert_eq!(game.cell_at((0, 1)), Ok(CellStatus::Revealed(1)));
        assert_eq!(game.cell_at((1, 3)), Ok(CellStatus::Hidden));
        assert_eq!(game.revealed_safe_count(), 6);
    }

    #[test]
    fn revealing_twice_is_a_no_op() {
        let mut game = game((3, 3), &[(0, 0)]);

        game.reveal((1, 1)).unwrap();
        assert_eq!(game.reveal((1, 1)), Ok(Outcome::Continue));
        assert_eq!(game.revealed_safe_count(), 1);
    }

    #[test]
    fn win_on_completing_reveal() {
        let mut game = game((1, 3), &[(0, 0)]);

        assert_eq!(game.reveal((0, 1)), Ok(Outcome::Continue));
        assert_eq!(game.reveal((0, 2)), Ok(Outcome::Win));
        assert!(game.is_finished());
    }

    #[test]
    fn terminal_state_rejects_moves() {
        let mut game = game((3, 3), &[(0, 0)]);
        game.reveal((0, 0)).unwrap();
        let snapshot = game.clone();

        assert_eq!(
            game.reveal((2, 2)),
            Err(GameError::InvalidMoveOnTerminalState)
        );
        assert_eq!(game, snapshot);
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        let mut game = game((3, 3), &[(0, 0)]);

        assert_eq!(game.reveal((3, 0)), Err(GameError::OutOfBoundsCoordinate));
        assert_eq!(game.reveal((0, 3)), Err(GameError::OutOfBoundsCoordinate));
        assert_eq!(game.cell_at((5, 5)), Err(GameError::OutOfBoundsCoordinate));
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn mine_free_board_is_won_in_one_reveal() {
        let mut game = game((4, 5), &[]);

        assert_eq!(game.reveal((3, 4)), Ok(Outcome::Win));
        assert_eq!(game.revealed_safe_count(), 20);
    }

    #[test]
    fn large_cascade_does_not_overflow_stack() {
        let mut game = game((Coord::MAX, Coord::MAX), &[(0, 0)]);

        assert_eq!(game.reveal((254, 254)), Ok(Outcome::Win));
        assert_eq!(game.revealed_safe_count(), 65024);
    }

    #[test]
    fn snapshot_with_foreign_cells_is_rejected() {
        let mut small = game((2, 2), &[(0, 0)]);
        small.reveal((1, 1)).unwrap();
        let mut small_value = serde_json::to_value(&small).unwrap();
        let mut value = serde_json::to_value(game((3, 3), &[(0, 0)])).unwrap();
        value["cells"] = small_value["cells"].take();

        assert!(serde_json::from_value::<GameState>(value).is_err());
    }

    #[test]
    fn snapshot_with_wrong_counter_is_rejected() {
        let mut game = game((3, 3), &[(0, 0)]);
        game.reveal((1, 1)).unwrap();
        let mut value = serde_json::to_value(&game).unwrap();
        value["revealed_safe_count"] = serde_json::Value::from(7);

        assert!(serde_json::from_value::<GameState>(value).is_err());
    }

    #[test]
    fn snapshot_with_unfinished_win_is_rejected() {
        let mut game = game((3, 3), &[(0, 0)]);
        game.reveal((2, 2)).unwrap();
        let mut value = serde_json::to_value(&game).unwrap();
        value["status"] = serde_json::to_value(GameStatus::InProgress).unwrap();

        assert!(serde_json::from_value::<GameState>(value).is_err());
    }

    #[test]
    fn lost_game_round_trips_through_serde() {
        let mut game = game((3, 3), &[(0, 0)]);
        game.reveal((1, 1)).unwrap();
        game.reveal((0, 0)).unwrap();

        let json = serde_json::to_string(&game).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, game);
    }

    #[test]
    fn state_round_trips_through_serde() {
        let mut game = game((3, 3), &[(0, 0)]);
        game.reveal((1, 1)).unwrap();

        let json = serde_json::to_string(&game).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, game);
    }
}
