//! Cosmetic screens.

use std::io::{BufRead, Write};
use std::time::Duration;

use otherside_core::MatchRecord;
use otherside_core::state::NO_WINNER;

use crate::console::{Console, ConsoleResult};

const BANNER: &str = r"
   ___  _____ _   _ _____ ____  ____ ___ ____  _____
  / _ \|_   _| | | | ____|  _ \/ ___|_ _|  _ \| ____|
 | | | | | | | |_| |  _| | |_) \___ \| || | | |  _|
 | |_| | | | |  _  | |___|  _ < ___) | || |_| | |___
  \___/  |_| |_| |_|_____|_| \_\____/___|____/|_____|

        Two worlds. One gate. Find the mind tyrant.
";

pub fn banner<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    delay: Duration,
) -> ConsoleResult<()> {
    console.type_out(BANNER, delay)
}

/// Games played and the most recent winners, newest first.
pub fn credits<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    record: &MatchRecord,
) -> ConsoleResult<()> {
    console.say("\n=== CREDITS ===")?;
    console.say("Made by the otherside developers.")?;
    console.say(format!("Games played: {}", record.games_played()))?;
    console.say("Last winners:")?;

    let winners = record.recent_winners();
    if winners.is_empty() {
        return console.say(format!("- {NO_WINNER}"));
    }
    for winner in winners.iter().rev() {
        console.say(format!("- {winner}"))?;
    }
    Ok(())
}
