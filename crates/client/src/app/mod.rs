//! The console shell: main menu plus the setup, play and credits screens.
//!
//! The shell owns the game state between matches and the record of past
//! winners. Every rule decision is delegated to `otherside-core`.

mod map_menu;
mod play;
mod screens;
mod setup;

use std::io::{BufRead, Write};

use otherside_core::{GameError, GameState, MatchRecord, PcgRng};

use crate::config::ClientConfig;
use crate::console::{Console, ConsoleResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MainChoice {
    Setup,
    Play,
    Terminate,
    Credits,
}

/// Console application state.
pub struct App<R, W> {
    console: Console<R, W>,
    config: ClientConfig,
    state: GameState,
    record: MatchRecord,
    rng: PcgRng,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(console: Console<R, W>, config: ClientConfig, seed: u64) -> Self {
        Self {
            console,
            config,
            state: GameState::new(),
            record: MatchRecord::new(),
            rng: PcgRng::seeded(seed),
        }
    }

    /// Shows the banner and serves the main menu until the user terminates.
    pub fn run(&mut self) -> ConsoleResult<()> {
        screens::banner(&mut self.console, self.config.banner_delay)?;

        loop {
            let choice = self.console.choose(
                "\n=== MAIN MENU ===",
                1,
                &[
                    ("Set up the game".to_owned(), MainChoice::Setup),
                    ("Play".to_owned(), MainChoice::Play),
                    ("Quit".to_owned(), MainChoice::Terminate),
                    ("Credits".to_owned(), MainChoice::Credits),
                ],
            )?;
            tracing::debug!(?choice, "main menu");

            match choice {
                MainChoice::Setup => self.setup()?,
                MainChoice::Play => self.play()?,
                MainChoice::Credits => screens::credits(&mut self.console, &self.record)?,
                MainChoice::Terminate => {
                    self.terminate()?;
                    return Ok(());
                }
            }
        }
    }

    fn terminate(&mut self) -> ConsoleResult<()> {
        self.state.teardown();
        tracing::info!(games = self.record.games_played(), "game terminated");
        self.console.say("The gate closes behind you. Goodbye!")
    }

    #[cfg(test)]
    fn into_console(self) -> Console<R, W> {
        self.console
    }
}

/// Screen text for a refused request: the message followed by its error code.
///
/// Every refusal is also logged with its severity.
fn refusal(err: &impl GameError) -> String {
    tracing::warn!(code = err.error_code(), severity = ?err.severity(), %err, "request refused");
    format!("{err} [{}]", err.error_code())
}
