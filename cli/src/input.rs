use minefield_core::{Coord, Coord2, Difficulty};
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Input closed")]
    Eof,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Could not understand {0:?}")]
    Malformed(String),
}

/// Where the driver gets the player's choices from.
pub trait InputSource {
    /// `retry` is set when the previous answer was rejected.
    fn read_difficulty(&mut self, retry: bool) -> Result<Difficulty, InputError>;

    fn read_coords(&mut self, retry: bool) -> Result<Coord2, InputError>;
}

/// Parses `ROW COLUMN`.
pub fn parse_coords(line: &str) -> Result<Coord2, InputError> {
    let malformed = || InputError::Malformed(line.trim().to_owned());
    let mut parts = line.split_whitespace();
    let (Some(row), Some(col), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(malformed());
    };
    let row: Coord = row.parse().map_err(|_| malformed())?;
    let col: Coord = col.parse().map_err(|_| malformed())?;
    Ok((row, col))
}

pub fn parse_difficulty(line: &str) -> Result<Difficulty, InputError> {
    line.parse()
        .map_err(|()| InputError::Malformed(line.trim().to_owned()))
}

/// Line-oriented prompts, e.g. over stdin/stdout.
pub struct LineInput<B, W> {
    reader: B,
    prompt: W,
}

impl<B: BufRead, W: Write> LineInput<B, W> {
    pub fn new(reader: B, prompt: W) -> Self {
        Self { reader, prompt }
    }

    fn ask(&mut self, question: &str) -> Result<String, InputError> {
        write!(self.prompt, "{question}")?;
        self.prompt.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(InputError::Eof);
        }
        Ok(line)
    }
}

impl<B: BufRead, W: Write> InputSource for LineInput<B, W> {
    fn read_difficulty(&mut self, retry: bool) -> Result<Difficulty, InputError> {
        let last = Difficulty::ALL.len() - 1;
        let question = if retry {
            format!("Invalid input. Please select a number between 0 and {last}: ")
        } else {
            format!("Choose settings by entering a difficulty between 0 and {last}: ")
        };
        let line = self.ask(&question)?;
        parse_difficulty(&line)
    }

    fn read_coords(&mut self, retry: bool) -> Result<Coord2, InputError> {
        let question = if retry {
            "Invalid coordinates. Try again. (r c): "
        } else {
            "select square to sweep (ROW COLUMN): "
        };
        let line = self.ask(question)?;
        parse_coords(&line)
    }
}
