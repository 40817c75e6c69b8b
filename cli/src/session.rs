use minefield_core::{BoardGenerator, Difficulty, GameConfig, GameError, GameState, Outcome};

use crate::input::{InputError, InputSource};
use crate::render::Renderer;

/// Game loop composing the engine with an input source and a renderer.
pub struct Session<I, R> {
    input: I,
    renderer: R,
    max_attempts: u32,
}

impl<I: InputSource, R: Renderer> Session<I, R> {
    pub fn new(input: I, renderer: R, max_attempts: u32) -> Self {
        Self {
            input,
            renderer,
            max_attempts,
        }
    }

    /// Asks until a valid preset is given.
    pub fn choose_difficulty(&mut self) -> anyhow::Result<Difficulty> {
        let mut retry = false;
        loop {
            match self.input.read_difficulty(retry) {
                Ok(difficulty) => return Ok(difficulty),
                Err(InputError::Malformed(answer)) => {
                    log::debug!("Rejected difficulty {:?}", answer);
                    retry = true;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Plays one game to its end, opening on a generated safe start.
    pub fn play<G: BoardGenerator + ?Sized>(
        &mut self,
        config: GameConfig,
        generator: &mut G,
    ) -> anyhow::Result<Outcome> {
        self.renderer.start(&config)?;

        let safe_start = generator.generate_with_safe_start(config, self.max_attempts)?;
        log::info!(
            "Opening at {:?} after {} board draw(s)",
            safe_start.start,
            safe_start.attempts
        );
        let mut game = GameState::new(safe_start.board);
        let mut outcome = game.reveal(safe_start.start)?;
        self.renderer.draw(&game)?;

        let mut retry = false;
        while !outcome.is_terminal() {
            let coords = match self.input.read_coords(retry) {
                Ok(coords) => coords,
                Err(InputError::Malformed(answer)) => {
                    log::debug!("Rejected coordinates {:?}", answer);
                    retry = true;
                    continue;
                }
                Err(err) => return Err(err.into()),
            };

            outcome = match game.reveal(coords) {
                Ok(outcome) => outcome,
                Err(GameError::OutOfBoundsCoordinate) => {
                    log::debug!("Rejected out of bounds {:?}", coords);
                    retry = true;
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            retry = false;
            self.renderer.draw(&game)?;
        }

        self.renderer.finish(&game)?;
        Ok(outcome)
    }
}
