//! Playing a match from the console.

use std::io::{BufRead, Write};

use otherside_core::state::item_label;
use otherside_core::{
    ActionEffect, ActionReport, CombatAction, CombatDecider, Encounter, Exchange,
    MatchController, MatchEngine, MatchOutcome, Player, PlayerId, TurnAction, TurnError,
    TurnView,
};

use crate::console::{Console, ConsoleError, ConsoleResult};

use super::{App, refusal};

impl<R: BufRead, W: Write> App<R, W> {
    /// Runs a match over the current setup and records its winner.
    pub(super) fn play(&mut self) -> ConsoleResult<()> {
        let engine = match MatchEngine::start(&mut self.state, &mut self.rng) {
            Ok(engine) => engine,
            Err(err) => {
                return self
                    .console
                    .say(format!("Cannot play yet: {}.", refusal(&err)));
            }
        };
        tracing::info!("match started");

        let mut controller = ConsoleController::new(&mut self.console);
        let outcome = engine.run(&mut controller);
        if let Some(err) = controller.into_error() {
            tracing::warn!(%err, "match abandoned");
            return Err(err);
        }

        self.console.say(format!("\n*** {outcome} ***"))?;
        if outcome != MatchOutcome::Abandoned {
            self.record.record(outcome.winner_name());
            tracing::info!(%outcome, games = self.record.games_played(), "match recorded");
        }
        Ok(())
    }
}

/// Menu entries of the turn prompt, in display order.
const TURN_MENU: [&str; 9] = [
    "Advance",
    "Retreat",
    "Switch world",
    "Fight",
    "Show player",
    "Show zone",
    "Collect item",
    "Use item",
    "End turn",
];

/// Asks the player at the keyboard for every decision.
///
/// The trait callbacks cannot fail, so the first console error is kept and
/// reported as abandonment; a fight in progress is broken off and the engine
/// stops at the next action.
struct ConsoleController<'c, R, W> {
    console: &'c mut Console<R, W>,
    error: Option<ConsoleError>,
}

impl<'c, R: BufRead, W: Write> ConsoleController<'c, R, W> {
    fn new(console: &'c mut Console<R, W>) -> Self {
        Self {
            console,
            error: None,
        }
    }

    fn into_error(self) -> Option<ConsoleError> {
        self.error
    }

    fn keep<T>(&mut self, result: ConsoleResult<T>) -> Option<T> {
        if self.error.is_some() {
            return None;
        }
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.error = Some(err);
                None
            }
        }
    }

    fn emit(&mut self, text: impl AsRef<str>) {
        if self.error.is_none() {
            let result = self.console.say(text);
            self.keep(result);
        }
    }

    fn ask(&mut self, prompt: &str, max: i64) -> Option<i64> {
        if self.error.is_some() {
            return None;
        }
        let result = self.console.read_int(prompt, 1..=max);
        self.keep(result)
    }

    /// Lists the inventory and asks for a slot. An empty inventory skips the
    /// question; the engine reports it.
    fn ask_slot(&mut self, player: &Player) -> usize {
        if player.inventory.is_empty() {
            return 1;
        }
        let slots = player.inventory.slots();
        for (index, slot) in slots.iter().enumerate() {
            self.emit(format!("  {}) {}", index + 1, item_label(*slot)));
        }
        self.ask("Slot: ", slots.len() as i64)
            .and_then(|slot| usize::try_from(slot).ok())
            .unwrap_or(1)
    }
}

impl<R: BufRead, W: Write> CombatDecider for ConsoleController<'_, R, W> {
    fn choose_combat_action(&mut self, encounter: &Encounter, player: &Player) -> CombatAction {
        let enemy = encounter
            .enemy()
            .map(|enemy| enemy.to_string())
            .unwrap_or_default();
        self.emit(format!(
            "[{}] HP {} vs {enemy} HP {}",
            player.name,
            encounter.player_hp(),
            encounter.enemy_hp()
        ));
        self.emit("  1) Attack\n  2) Use item");
        match self.ask("> ", 2) {
            Some(2) => CombatAction::UseItem {
                slot: self.ask_slot(player),
            },
            _ => CombatAction::Attack,
        }
    }

    fn observe_exchange(&mut self, exchange: &Exchange) {
        self.emit(exchange.to_string());
    }

    fn abandoned(&self) -> bool {
        self.error.is_some()
    }
}

impl<R: BufRead, W: Write> MatchController for ConsoleController<'_, R, W> {
    fn choose_turn_action(&mut self, view: &TurnView<'_>) -> TurnAction {
        let moved = if view.turn.has_moved() { ", moved" } else { "" };
        self.emit(format!(
            "\n--- {} ({}){moved} ---",
            view.player.name, view.player_id
        ));
        for (index, label) in TURN_MENU.iter().enumerate() {
            self.emit(format!("  {}) {label}", index + 1));
        }

        match self.ask("> ", TURN_MENU.len() as i64) {
            Some(1) => TurnAction::Advance,
            Some(2) => TurnAction::Retreat,
            Some(3) => TurnAction::SwitchWorld,
            Some(4) => TurnAction::Fight,
            Some(5) => TurnAction::ShowPlayer,
            Some(6) => TurnAction::ShowZone,
            Some(7) => TurnAction::CollectItem,
            Some(8) => TurnAction::UseItem {
                slot: self.ask_slot(view.player),
            },
            _ => TurnAction::EndTurn,
        }
    }

    fn round_started(&mut self, round: u32, order: &[PlayerId]) {
        let order = order
            .iter()
            .map(PlayerId::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        self.emit(format!("\n===== ROUND {round} ===== turn order: {order}"));
    }

    fn action_resolved(
        &mut self,
        player: &Player,
        action: TurnAction,
        result: &Result<ActionReport, TurnError>,
    ) {
        tracing::debug!(player = %player.name, ?action, ?result, "turn action");
        match result {
            Ok(report) => {
                if let Some(combat) = report.combat {
                    self.emit(combat.to_string());
                }
                if report.effect != ActionEffect::None {
                    self.emit(report.effect.to_string());
                }
                if !player.is_active() {
                    self.emit(format!("{} has been eliminated.", player.name));
                }
            }
            Err(err) => self.emit(format!("Not allowed: {}.", refusal(err))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::time::Duration;

    use otherside_core::{
        EnemyKind, GameConfig, GameState, MapBuilder, PlayerDraft, ScriptedRng, Tradeoff, World,
    };

    use super::*;

    /// One player on a closed map whose first Real World zone holds `enemy`.
    fn ready_state(enemy: Option<EnemyKind>) -> GameState {
        let mut state = GameState::new();
        let mut rng = ScriptedRng::constant(0);
        let mut builder = MapBuilder::new(&mut state.map);
        for position in 1..=GameConfig::GENERATED_PAIRS {
            let real = (position == 1).then_some(enemy).flatten();
            let upside = (position == GameConfig::GENERATED_PAIRS).then_some(EnemyKind::Strongest);
            builder.insert(position, real, None, upside, &mut rng).unwrap();
        }
        builder.close().unwrap();
        let draft = PlayerDraft::with_base("Robin", 10);
        state.roster.enlist(&draft, Tradeoff::Balanced, false).unwrap();
        state
    }

    fn play_with(state: &mut GameState, input: &str) -> (MatchOutcome, String) {
        let mut rng = ScriptedRng::new([]);
        let mut console = Console::new(
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
            Duration::ZERO,
        );
        let mut controller = ConsoleController::new(&mut console);
        let engine = MatchEngine::start(state, &mut rng).unwrap();
        let outcome = engine.run(&mut controller);
        let out = String::from_utf8(console.into_output()).unwrap();
        (outcome, out)
    }

    #[test]
    fn refused_actions_show_their_error_code() {
        let mut state = ready_state(None);
        // Advance twice; the second move of the turn is refused.
        let (outcome, out) = play_with(&mut state, "1\n1\n");

        assert_eq!(outcome, MatchOutcome::Abandoned);
        assert!(out.contains("You are now in the Real World, zone 2."));
        assert!(out.contains("Not allowed: you already moved this turn [ALREADY_MOVED]."));
    }

    #[test]
    fn closed_input_breaks_off_a_fight() {
        let mut state = ready_state(Some(EnemyKind::Weak));
        // Fight, then the input runs dry at the combat prompt.
        let (outcome, out) = play_with(&mut state, "4\n");

        assert_eq!(outcome, MatchOutcome::Abandoned);
        assert!(out.contains("[Robin] HP 20 vs stalker HP 12"));
        assert!(!out.contains("You attack"));
        let head = state.map.store().head(World::Real).unwrap();
        assert_eq!(state.map.store().real(head).unwrap().enemy, Some(EnemyKind::Weak));
        assert_eq!(state.roster.active_count(), 1);
    }

    #[test]
    fn closed_input_abandons_the_match() {
        let mut state = GameState::new();
        let mut rng = ScriptedRng::constant(1);
        let mut builder = MapBuilder::new(&mut state.map);
        builder.generate(&mut rng).unwrap();
        builder.close().unwrap();
        let draft = PlayerDraft::with_base("Robin", 10);
        state.roster.enlist(&draft, Tradeoff::Balanced, false).unwrap();

        // Show player, end turn, then the input runs dry in round 2.
        let input = Cursor::new(b"5\n9\n".to_vec());
        let mut console = Console::new(input, Vec::new(), Duration::ZERO);
        let mut controller = ConsoleController::new(&mut console);
        let engine = MatchEngine::start(&mut state, &mut rng).unwrap();
        let outcome = engine.run(&mut controller);

        assert_eq!(outcome, MatchOutcome::Abandoned);
        assert!(matches!(controller.into_error(), Some(ConsoleError::Closed)));
        let out = String::from_utf8(console.into_output()).unwrap();
        assert!(out.contains("Player: Robin"));
        assert!(out.contains("Turn ended."));
        assert!(out.contains("ROUND 2"));
    }
}
