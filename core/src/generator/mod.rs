use alloc::vec::Vec;
use ndarray::Array2;
use rand::Rng;

use crate::*;
pub use random::*;

mod random;

/// How many fresh boards to draw before giving up on a zero-count start.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// A board together with the opening move picked for it.
#[derive(Clone, Debug, PartialEq)]
pub struct SafeStart {
    pub board: Board,
    pub start: Coord2,
    /// Number of boards drawn, including the accepted one.
    pub attempts: u32,
}

pub trait BoardGenerator {
    fn generate(&mut self, config: GameConfig) -> Board;

    /// Picks the opening move among the zero-count safe cells of a board.
    fn choose_start(&mut self, candidates: &[Coord2]) -> Option<Coord2>;

    /// Draws boards until one has a safe cell with no adjacent mines, at most
    /// `max_attempts` times. Configurations where such a cell cannot exist
    /// are rejected without drawing.
    fn generate_with_safe_start(
        &mut self,
        config: GameConfig,
        max_attempts: u32,
    ) -> Result<SafeStart> {
        if !config.admits_safe_start() {
            log::warn!(
                "No zero-count start can exist with {} mines on a {}x{} board",
                config.mines,
                config.rows(),
                config.cols()
            );
            return Err(GameError::NoSafeStart { attempts: 0 });
        }

        for attempt in 1..=max_attempts {
            let board = self.generate(config);
            let candidates = board.safe_start_candidates();
            if let Some(start) = self.choose_start(&candidates) {
                log::debug!(
                    "Picked start {:?} among {} candidates after {} attempt(s)",
                    start,
                    candidates.len(),
                    attempt
                );
                return Ok(SafeStart {
                    board,
                    start,
                    attempts: attempt,
                });
            }
            log::warn!("Board has no zero-count safe cell, regenerating mines");
        }

        Err(GameError::NoSafeStart {
            attempts: max_attempts,
        })
    }
}

/// Uniform sampling without replacement: each pick removes the chosen
/// coordinate from the pool by swapping it with the last one.
pub fn sample_mines<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Array2<bool> {
    let (rows, cols) = config.size;
    let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
    let mut pool: Vec<Coord2> = (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (row, col)))
        .collect();

    for _ in 0..config.mines {
        if pool.is_empty() {
            log::warn!(
                "Board already full, requested {} mines but only fits {}",
                config.mines,
                config.total_cells()
            );
            break;
        }
        let pick = rng.random_range(0..pool.len());
        let coords = pool.swap_remove(pick);
        mine_mask[coords.to_nd_index()] = true;
    }

    mine_mask
}
