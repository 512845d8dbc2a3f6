//! Game setup: the roster first, then the map submenu.

use std::io::{BufRead, Write};

use otherside_core::{GameConfig, PlayerDraft, Roster, Tradeoff};

use crate::console::ConsoleResult;

use super::{App, refusal};

impl<R: BufRead, W: Write> App<R, W> {
    /// Discards the previous game and builds a new one.
    pub(super) fn setup(&mut self) -> ConsoleResult<()> {
        self.state.teardown();
        self.console.say("\n=== GAME SETUP ===")?;

        let prompt = format!("Number of players (1-{}): ", GameConfig::MAX_PLAYERS);
        let count = self
            .console
            .read_int(&prompt, 1..=GameConfig::MAX_PLAYERS as i64)?;
        let count = Roster::check_count(count).unwrap_or(1);

        for index in 1..=count {
            self.enlist_player(index)?;
        }
        tracing::info!(players = self.state.roster.len(), "roster ready");

        self.map_menu()?;
        self.console.say("Setup complete. The gate is open.")
    }

    fn enlist_player(&mut self, index: usize) -> ConsoleResult<()> {
        let name = self.console.read_bounded(
            &format!("\nName of player {index}: "),
            GameConfig::MAX_NAME_LEN,
        )?;
        let draft = PlayerDraft::roll(&name, &mut self.rng);
        let base = draft.base_roll();
        self.console.say(format!(
            "{} rolls a {base}: attack={base} defense={base} luck={base}",
            draft.name()
        ))?;

        let tradeoff = self.console.choose(
            "Pick a trade-off:",
            1,
            &[
                (
                    format!("+{0} attack, -{0} defense", GameConfig::TRADEOFF_DELTA),
                    Tradeoff::Offensive,
                ),
                (
                    format!("+{0} defense, -{0} attack", GameConfig::TRADEOFF_DELTA),
                    Tradeoff::Defensive,
                ),
                ("no change".to_owned(), Tradeoff::Balanced),
            ],
        )?;

        let special = if self.state.roster.special_available() {
            self.console.choose(
                &format!(
                    "Become {}? (+{} attack, +{} defense, -{} luck)",
                    GameConfig::SPECIAL_VARIANT_PREFIX.trim_end_matches('_'),
                    GameConfig::SPECIAL_ATTACK_BONUS,
                    GameConfig::SPECIAL_DEFENSE_BONUS,
                    GameConfig::SPECIAL_LUCK_PENALTY,
                ),
                1,
                &[("yes".to_owned(), true), ("no".to_owned(), false)],
            )?
        } else {
            false
        };

        match self.state.roster.enlist(&draft, tradeoff, special) {
            Ok(id) => {
                if let Some(player) = self.state.roster.get(id) {
                    let line = format!("{} joins as {id}: {}", player.name, player.stats);
                    tracing::info!(player = %player.name, %id, special, "player enlisted");
                    self.console.say(line)?;
                }
            }
            Err(err) => {
                self.console
                    .say(format!("Could not add the player: {}.", refusal(&err)))?;
            }
        }
        Ok(())
    }
}
