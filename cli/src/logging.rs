use log::{LevelFilter, SetLoggerError};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Only our own crates, so dependency chatter stays out of the game screen.
const CRATE_PREFIX: &str = "minefield";

/// Sends records to stderr so they never interleave with the board on stdout.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    let config = ConfigBuilder::new()
        .add_filter_allow_str(CRATE_PREFIX)
        .set_time_level(LevelFilter::Off)
        .build();
    TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn installs_once() {
        assert!(init(LevelFilter::Debug).is_ok());
        assert_eq!(log::max_level(), LevelFilter::Debug);
        assert!(init(LevelFilter::Trace).is_err());
    }
}
