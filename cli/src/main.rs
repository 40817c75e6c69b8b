use clap::Parser;
use minefield_core::{
    CellCount, Coord, DEFAULT_MAX_ATTEMPTS, Difficulty, GameConfig, RandomBoardGenerator,
};
use std::io;

use crate::input::LineInput;
use crate::render::TextRenderer;
use crate::session::Session;

mod input;
mod logging;
mod render;
mod session;

#[derive(Parser, Debug)]
#[command(version, about = "Sweep a minefield from the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board preset, by index (0-2) or name; asked for when omitted
    #[arg(short, long, value_parser = difficulty_arg, conflicts_with = "rows")]
    difficulty: Option<Difficulty>,

    /// Custom number of rows
    #[arg(long, requires_all = ["cols", "mines"])]
    rows: Option<Coord>,

    /// Custom number of columns
    #[arg(long, requires_all = ["rows", "mines"])]
    cols: Option<Coord>,

    /// Custom number of mines
    #[arg(long, requires_all = ["rows", "cols"])]
    mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// How many boards to draw while looking for a safe opening
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,

    /// Keep previous frames on screen instead of clearing it
    #[arg(long)]
    no_clear: bool,
}

impl Args {
    fn custom_config(&self) -> anyhow::Result<Option<GameConfig>> {
        match (self.rows, self.cols, self.mines) {
            (Some(rows), Some(cols), Some(mines)) => {
                Ok(Some(GameConfig::new((rows, cols), mines)?))
            }
            _ => Ok(None),
        }
    }
}

fn difficulty_arg(s: &str) -> Result<Difficulty, String> {
    s.parse().map_err(|()| {
        let names: Vec<_> = Difficulty::ALL.iter().map(|d| d.name()).collect();
        format!(
            "expected 0-{} or one of {}",
            Difficulty::ALL.len() - 1,
            names.join(", ")
        )
    })
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.verbose.log_level_filter())?;

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let input = LineInput::new(io::stdin().lock(), io::stdout());
    let renderer = TextRenderer::new(io::stdout(), !args.no_clear);
    let mut session = Session::new(input, renderer, args.max_attempts);

    let config = match (args.custom_config()?, args.difficulty) {
        (Some(config), _) => config,
        (None, Some(difficulty)) => difficulty.config(),
        (None, None) => session.choose_difficulty()?.config(),
    };
    log::debug!("config: {:?}", config);

    let outcome = session.play(config, &mut RandomBoardGenerator::new(seed))?;
    log::debug!("outcome: {:?}", outcome);
    Ok(())
}
