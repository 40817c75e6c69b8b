use minefield_core::{Coord2, DisplayValue, GameConfig, GameState, GameStatus};
use std::io::{self, Write};

const CELL_WIDTH: usize = 5;
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Projects game state onto some output; the engine itself never prints.
pub trait Renderer {
    fn start(&mut self, config: &GameConfig) -> io::Result<()>;

    fn draw(&mut self, game: &GameState) -> io::Result<()>;

    /// Called once the game reached a terminal status.
    fn finish(&mut self, game: &GameState) -> io::Result<()>;
}

pub fn display_char(value: DisplayValue) -> char {
    match value {
        DisplayValue::Hidden => '.',
        DisplayValue::MineMarker => 'X',
        DisplayValue::Count(count) => char::from_digit(count.into(), 10).unwrap_or('?'),
    }
}

/// Fixed-width text grid with row and column indices.
pub struct TextRenderer<W> {
    out: W,
    clear: bool,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, clear: bool) -> Self {
        Self { out, clear }
    }

    fn write_grid(
        &mut self,
        game: &GameState,
        cell: impl Fn(&GameState, Coord2) -> char,
    ) -> io::Result<()> {
        let (rows, cols) = game.size();
        let label_width = rows.saturating_sub(1).to_string().len();

        write!(self.out, "{:label_width$}", "")?;
        for col in 0..cols {
            write!(self.out, "{col:>CELL_WIDTH$}")?;
        }
        writeln!(self.out)?;

        for row in 0..rows {
            write!(self.out, "{row:>label_width$}")?;
            for col in 0..cols {
                write!(self.out, "{:>CELL_WIDTH$}", cell(game, (row, col)))?;
            }
            writeln!(self.out)?;
        }
        Ok(())
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn start(&mut self, config: &GameConfig) -> io::Result<()> {
        writeln!(
            self.out,
            "Initializing game with {} rows, {} columns, and {} mines",
            config.rows(),
            config.cols(),
            config.mines
        )
    }

    fn draw(&mut self, game: &GameState) -> io::Result<()> {
        if self.clear {
            write!(self.out, "{CLEAR_SCREEN}")?;
        }
        self.write_grid(game, |game, coords| {
            game.cell_display_value(coords)
                .map(display_char)
                .unwrap_or('?')
        })?;
        self.out.flush()
    }

    fn finish(&mut self, game: &GameState) -> io::Result<()> {
        match game.status() {
            GameStatus::Won => writeln!(self.out, "Success: we evaded all mines!")?,
            GameStatus::Lost => {
                writeln!(self.out, "Failure: we stepped on a mine!")?;
                // remaining mines as '*', the one that went off as 'X'
                self.write_grid(game, |game, coords| {
                    if game.triggered_mine() == Some(coords) {
                        'X'
                    } else if game.board().is_mine(coords) {
                        '*'
                    } else {
                        game.cell_display_value(coords)
                            .map(display_char)
                            .unwrap_or('?')
                    }
                })?;
            }
            GameStatus::InProgress => {}
        }
        self.out.flush()
    }
}
