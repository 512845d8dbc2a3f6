//! End-to-end scenarios driven by scripted dice and scripted decisions.

use std::collections::VecDeque;

use otherside_core::{
    ActionEffect, ActionReport, CombatAction, CombatDecider, CombatOutcome, Encounter, EnemyKind,
    GameConfig, GameState, InventoryError, ItemEffect, ItemKind, MapBuilder, MatchController,
    MatchEngine, MatchOutcome, MatchRecord, Player, PlayerDraft, PlayerId, ScriptedRng, Tradeoff,
    TurnAction, TurnError, TurnState, TurnView, World,
};

type ZoneSpec = (Option<EnemyKind>, Option<ItemKind>, Option<EnemyKind>);

/// A closed 15-pair map of forests with the given zone overrides.
fn closed_state(overrides: &[(usize, ZoneSpec)], strongest_at: usize, players: &[(&str, i32)]) -> GameState {
    let mut state = GameState::new();
    let mut rng = ScriptedRng::constant(0);
    let mut builder = MapBuilder::new(&mut state.map);
    for position in 1..=GameConfig::GENERATED_PAIRS {
        let (real, item, mut upside) = overrides
            .iter()
            .find(|(at, _)| *at == position)
            .map(|(_, spec)| *spec)
            .unwrap_or_default();
        if position == strongest_at {
            upside = Some(EnemyKind::Strongest);
        }
        builder.insert(position, real, item, upside, &mut rng).unwrap();
    }
    builder.close().unwrap();

    for (name, base) in players {
        let draft = PlayerDraft::with_base(name, *base);
        state.roster.enlist(&draft, Tradeoff::Balanced, false).unwrap();
    }
    state
}

#[derive(Default)]
struct Script {
    actions: VecDeque<TurnAction>,
    resolved: Vec<(TurnAction, Result<ActionReport, TurnError>)>,
    /// Whose turn it was each time an action was asked for.
    asked: Vec<PlayerId>,
    rounds: u32,
}

impl Script {
    fn new(actions: impl IntoIterator<Item = TurnAction>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl CombatDecider for Script {
    fn choose_combat_action(&mut self, _: &Encounter, _: &Player) -> CombatAction {
        CombatAction::Attack
    }
}

impl MatchController for Script {
    fn choose_turn_action(&mut self, view: &TurnView<'_>) -> TurnAction {
        self.asked.push(view.player_id);
        self.actions.pop_front().unwrap_or(TurnAction::EndTurn)
    }

    fn round_started(&mut self, _: u32, _: &[PlayerId]) {
        self.rounds += 1;
    }

    fn action_resolved(
        &mut self,
        _: &Player,
        action: TurnAction,
        result: &Result<ActionReport, TurnError>,
    ) {
        self.resolved.push((action, result.clone()));
    }
}

#[test]
fn switch_world_needs_a_roll_strictly_below_luck() {
    let mut state = closed_state(&[], 15, &[("Joyce", 15)]);
    let mut rng = ScriptedRng::new([20, 1]);
    let mut engine = MatchEngine::start(&mut state, &mut rng).unwrap();
    let mut turn = TurnState::new(PlayerId(0));
    let mut script = Script::default();

    let failed = engine
        .perform(&mut turn, TurnAction::SwitchWorld, &mut script)
        .unwrap();
    assert_eq!(failed.combat, Some(CombatOutcome::NoEnemy));
    assert_eq!(failed.effect, ActionEffect::SwitchFailed { roll: 20, luck: 15 });
    assert!(!turn.has_moved());

    let switched = engine
        .perform(&mut turn, TurnAction::SwitchWorld, &mut script)
        .unwrap();
    assert_eq!(
        switched.effect,
        ActionEffect::Moved {
            world: World::UpsideDown,
            ordinal: 1
        }
    );
    assert!(turn.has_moved());

    // Coming back is free and does not need the move.
    let back = engine
        .perform(&mut turn, TurnAction::SwitchWorld, &mut script)
        .unwrap();
    assert_eq!(
        back.effect,
        ActionEffect::Moved {
            world: World::Real,
            ordinal: 1
        }
    );
    assert_eq!(
        engine.perform(&mut turn, TurnAction::SwitchWorld, &mut script),
        Err(TurnError::AlreadyMoved)
    );
}

#[test]
fn one_move_per_turn_and_blocked_ends() {
    let mut state = closed_state(&[], 15, &[("Bob", 10)]);
    let mut rng = ScriptedRng::new([]);
    let mut engine = MatchEngine::start(&mut state, &mut rng).unwrap();
    let mut script = Script::default();

    let mut turn = TurnState::new(PlayerId(0));
    assert_eq!(
        engine
            .perform(&mut turn, TurnAction::Retreat, &mut script)
            .unwrap()
            .effect,
        ActionEffect::Blocked(TurnError::AtHead)
    );
    assert!(!turn.has_moved());

    let advanced = engine
        .perform(&mut turn, TurnAction::Advance, &mut script)
        .unwrap();
    assert_eq!(
        advanced.effect,
        ActionEffect::Moved {
            world: World::Real,
            ordinal: 2
        }
    );
    assert_eq!(
        engine.perform(&mut turn, TurnAction::Advance, &mut script),
        Err(TurnError::AlreadyMoved)
    );
    assert_eq!(
        engine.perform(&mut turn, TurnAction::Retreat, &mut script),
        Err(TurnError::AlreadyMoved)
    );

    let ended = engine
        .perform(&mut turn, TurnAction::EndTurn, &mut script)
        .unwrap();
    assert!(ended.turn_over);
    assert_eq!(
        engine.perform(&mut turn, TurnAction::ShowZone, &mut script),
        Err(TurnError::TurnOver)
    );
}

#[test]
fn advance_fights_the_current_enemy_first() {
    let mut state = closed_state(&[(1, (Some(EnemyKind::Weak), None, None))], 15, &[("Max", 20)]);
    // Two lucky hits of 9 beat the weak enemy; it misses once in between;
    // the despawn roll of 80 keeps it in the zone.
    let mut rng = ScriptedRng::new([20, 1, 1, 1, 20, 20, 1, 1, 80]);
    let mut engine = MatchEngine::start(&mut state, &mut rng).unwrap();
    let mut turn = TurnState::new(PlayerId(0));

    let report = engine
        .perform(&mut turn, TurnAction::Advance, &mut Script::default())
        .unwrap();
    assert_eq!(
        report.combat,
        Some(CombatOutcome::EnemyDefeated {
            enemy: EnemyKind::Weak,
            despawned: false
        })
    );
    assert_eq!(
        report.effect,
        ActionEffect::Moved {
            world: World::Real,
            ordinal: 2
        }
    );

    let head = state.map.store().head(World::Real).unwrap();
    assert_eq!(state.map.store().real(head).unwrap().enemy, Some(EnemyKind::Weak));
}

#[test]
fn dying_in_a_forced_fight_ends_the_turn_where_it_stands() {
    for action in [TurnAction::Advance, TurnAction::Retreat, TurnAction::SwitchWorld] {
        let mut state = closed_state(&[(1, (Some(EnemyKind::Medium), None, None))], 15, &[("Barb", 1)]);
        // Each exchange: the player misses, the medium enemy hits for 4.
        let mut rng = ScriptedRng::new([1, 20, 20, 1, 20].repeat(3));
        let mut engine = MatchEngine::start(&mut state, &mut rng).unwrap();
        let mut turn = TurnState::new(PlayerId(0));

        let report = engine
            .perform(&mut turn, action, &mut Script::default())
            .unwrap();
        assert_eq!(
            report,
            ActionReport {
                combat: Some(CombatOutcome::PlayerDefeated {
                    enemy: EnemyKind::Medium
                }),
                effect: ActionEffect::None,
                turn_over: true,
            },
            "{action:?}"
        );
        assert!(!turn.has_moved());
        assert!(turn.is_over());
        assert_eq!(
            engine.perform(&mut turn, TurnAction::ShowZone, &mut Script::default()),
            Err(TurnError::TurnOver)
        );

        // No switch roll was taken after the fight.
        assert_eq!(rng.remaining(), 0);
        let barb = state.roster.get(PlayerId(0)).unwrap();
        assert!(!barb.is_active());
        assert_eq!(barb.world, World::Real);
    }
}

#[test]
fn items_are_collected_and_used_in_the_real_world_only() {
    let mut state = closed_state(&[(1, (None, Some(ItemKind::LuckCharm), None))], 15, &[("Will", 10)]);
    let mut rng = ScriptedRng::new([1]);
    let mut engine = MatchEngine::start(&mut state, &mut rng).unwrap();
    let mut turn = TurnState::new(PlayerId(0));
    let mut script = Script::default();

    assert_eq!(
        engine
            .perform(&mut turn, TurnAction::CollectItem, &mut script)
            .unwrap()
            .effect,
        ActionEffect::ItemCollected(ItemKind::LuckCharm)
    );
    assert_eq!(
        engine.perform(&mut turn, TurnAction::CollectItem, &mut script),
        Err(TurnError::Inventory(InventoryError::NoItem))
    );

    engine
        .perform(&mut turn, TurnAction::SwitchWorld, &mut script)
        .unwrap();
    assert_eq!(
        engine.perform(&mut turn, TurnAction::CollectItem, &mut script),
        Err(TurnError::Inventory(InventoryError::NotInRealWorld))
    );

    assert_eq!(
        engine
            .perform(&mut turn, TurnAction::UseItem { slot: 1 }, &mut script)
            .unwrap()
            .effect,
        ActionEffect::ItemUsed(ItemEffect::LuckRaised { luck: 12 })
    );
    assert_eq!(
        engine.perform(&mut turn, TurnAction::UseItem { slot: 1 }, &mut script),
        Err(TurnError::Inventory(InventoryError::EmptyInventory))
    );
}

#[test]
fn defeating_the_strongest_enemy_wins_the_match() {
    let mut state = closed_state(&[], 2, &[("Hopper", 20)]);
    let mut rng = ScriptedRng::new([
        1, // switch roll, below luck 20
        20, 1, 1, // lucky hit for 9
        1, 20, // enemy deflected
        20, 1, 1, //
        1, 20, //
        20, 1, 1, // 27 damage in total
    ]);
    let engine = MatchEngine::start(&mut state, &mut rng).unwrap();
    let mut script = Script::new([
        TurnAction::SwitchWorld,
        TurnAction::Advance,
        TurnAction::EndTurn,
        TurnAction::Advance,
        TurnAction::Fight,
    ]);

    let outcome = engine.run(&mut script);
    assert_eq!(
        outcome,
        MatchOutcome::Winner {
            player: PlayerId(0),
            name: "Hopper".to_owned()
        }
    );
    assert_eq!(script.rounds, 2);
    assert_eq!(script.resolved[1].1, Err(TurnError::AlreadyMoved));
    let (action, last) = script.resolved.last().unwrap();
    assert_eq!(*action, TurnAction::Fight);
    assert!(last.as_ref().unwrap().turn_over);

    let mut record = MatchRecord::new();
    record.record(outcome.winner_name());
    assert_eq!(record.recent_winners(), ["Hopper"]);
}

#[test]
fn a_win_ends_the_match_before_the_rest_of_the_round() {
    let mut state = closed_state(&[], 1, &[("Dustin", 10), ("Eddie", 20)]);
    let mut rng = ScriptedRng::new([
        0, // turn order: Eddie, then Dustin
        1, // switch roll, below luck 20
        20, 1, 1, // lucky hit for 9
        1, 20, // enemy deflected
        20, 1, 1, //
        1, 20, //
        20, 1, 1, // 27 damage in total
    ]);
    let engine = MatchEngine::start(&mut state, &mut rng).unwrap();
    let mut script = Script::new([TurnAction::SwitchWorld, TurnAction::Fight]);

    let outcome = engine.run(&mut script);
    assert_eq!(
        outcome,
        MatchOutcome::Winner {
            player: PlayerId(1),
            name: "Eddie".to_owned()
        }
    );
    assert_eq!(script.rounds, 1);
    // Dustin never got a turn.
    assert_eq!(script.asked, [PlayerId(1), PlayerId(1)]);
    assert_eq!(state.roster.active_count(), 2);
}

#[test]
fn a_round_without_survivors_ends_with_no_winner() {
    let mut state = closed_state(&[(1, (Some(EnemyKind::Medium), None, None))], 15, &[("Barb", 1)]);
    // Each exchange: the player misses, the medium enemy hits for 4.
    let mut rng = ScriptedRng::new([1, 20, 20, 1, 20].repeat(3));
    let engine = MatchEngine::start(&mut state, &mut rng).unwrap();
    let mut script = Script::new([TurnAction::Fight]);

    let outcome = engine.run(&mut script);
    assert_eq!(outcome, MatchOutcome::NoWinner);
    assert_eq!(outcome.winner_name(), None);
    assert_eq!(
        script.resolved[0].1.as_ref().unwrap().combat,
        Some(CombatOutcome::PlayerDefeated {
            enemy: EnemyKind::Medium
        })
    );
    assert_eq!(state.roster.active_count(), 0);
}

#[test]
fn deleting_an_occupied_pair_moves_the_player_to_the_head() {
    let mut state = GameState::new();
    let mut rng = ScriptedRng::constant(0);
    for position in 1..=4 {
        MapBuilder::new(&mut state.map)
            .insert(position, None, None, None, &mut rng)
            .unwrap();
    }
    let draft = PlayerDraft::with_base("Erica", 10);
    let id = state.roster.enlist(&draft, Tradeoff::Balanced, false).unwrap();
    let third = state.map.store().at(World::Real, 3);
    state.roster.get_mut(id).unwrap().place(third);

    MapBuilder::new(&mut state.map)
        .delete(3, &mut state.roster)
        .unwrap();
    let head = state.map.store().head(World::Real);
    assert_eq!(state.roster.get(id).unwrap().position, head);

    MapBuilder::new(&mut state.map)
        .delete(1, &mut state.roster)
        .unwrap();
    let new_head = state.map.store().head(World::Real);
    assert_ne!(new_head, head);
    assert_eq!(state.roster.get(id).unwrap().position, new_head);
    assert!(state.map.store().is_consistent());
}

/// Ends every turn and gives up once the second round begins.
struct GivesUp {
    rounds: u32,
}

impl CombatDecider for GivesUp {
    fn choose_combat_action(&mut self, _: &Encounter, _: &Player) -> CombatAction {
        CombatAction::Attack
    }

    fn abandoned(&self) -> bool {
        self.rounds >= 2
    }
}

impl MatchController for GivesUp {
    fn choose_turn_action(&mut self, _: &TurnView<'_>) -> TurnAction {
        TurnAction::EndTurn
    }

    fn round_started(&mut self, round: u32, _: &[PlayerId]) {
        self.rounds = round;
    }
}

#[test]
fn an_abandoned_match_has_no_result_and_keeps_the_survivors() {
    let mut state = closed_state(&[], 15, &[("Steve", 10), ("Robin", 10)]);
    let mut rng = ScriptedRng::constant(0);
    let engine = MatchEngine::start(&mut state, &mut rng).unwrap();
    let mut controller = GivesUp { rounds: 0 };

    let outcome = engine.run(&mut controller);
    assert_eq!(outcome, MatchOutcome::Abandoned);
    assert_eq!(outcome.winner_name(), None);
    assert_eq!(controller.rounds, 2);
    assert_eq!(state.roster.active_count(), 2);
}
