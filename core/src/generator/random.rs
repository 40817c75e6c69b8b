use super::*;
use rand::prelude::*;
use rand::rngs::SmallRng;

/// Purely random generation from a seed, so a game can be replayed.
#[derive(Clone, Debug)]
pub struct RandomBoardGenerator {
    rng: SmallRng,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(&mut self, config: GameConfig) -> Board {
        let board = Board::random(config, &mut self.rng);
        log::debug!(
            "Generated {}x{} board with {} mines",
            config.rows(),
            config.cols(),
            board.mine_count()
        );
        board
    }

    fn choose_start(&mut self, candidates: &[Coord2]) -> Option<Coord2> {
        candidates.choose(&mut self.rng).copied()
    }
}
