#![no_main]

//! Full game turn fuzzer.
//!
//! This fuzz target drives whole sessions on a generated level:
//! 1. Generate a level from a fuzzed seed and size
//! 2. Apply fuzzed commands with fuzzed answers to every prompt
//! 3. Check invariants after each turn
//!
//! This catches integration bugs that individual component fuzzers miss.

use arbitrary::Arbitrary;
use delve::game::{
    check_invariants, CombatAction, Command, Controller, Coord, Creature, Direction, GameConfig,
    GameEvent, GameState, Offer, Player, Resource, SeededDice, ShopChoice, Status, TurnOutcome,
};
use libfuzzer_sys::fuzz_target;

/// A fuzzer-generated command.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzCommand {
    Up,
    Down,
    Left,
    Right,
    Quit,
    /// Start the next level once the boss is down.
    NextLevel,
}

/// Structured input for full game turn fuzzing.
#[derive(Arbitrary, Debug)]
struct GameTurnInput {
    /// Level seed.
    seed: u64,
    /// Grid size, reduced to 1..=24.
    width: u8,
    height: u8,
    /// Commands to apply in order.
    commands: Vec<FuzzCommand>,
    /// Answer bytes consumed by every prompt.
    answers: Vec<u8>,
}

/// Answers prompts from fuzzed bytes; exits shops and attacks once they run out.
struct Answers {
    bytes: std::vec::IntoIter<u8>,
}

impl Controller for Answers {
    fn engage(&mut self, _creature: &Creature, _player: &Player) -> bool {
        self.bytes.next().is_some_and(|b| b % 2 == 0)
    }

    fn combat_action(&mut self, _creature: &Creature, _player: &Player) -> Option<CombatAction> {
        match self.bytes.next().map(|b| b % 3) {
            None | Some(0) => Some(CombatAction::Attack),
            Some(1) => Some(CombatAction::Flee),
            Some(_) => None,
        }
    }

    fn harvest(&mut self, _resource: &Resource) -> bool {
        self.bytes.next().is_some_and(|b| b % 2 == 0)
    }

    fn shop_choice(&mut self, offers: &[Offer], _player: &Player) -> ShopChoice {
        match self.bytes.next() {
            None | Some(0) => ShopChoice::Exit,
            Some(255) => ShopChoice::Unrecognized,
            Some(b) => ShopChoice::Buy(usize::from(b - 1) % (offers.len() + 2)),
        }
    }
}

fuzz_target!(|input: GameTurnInput| {
    let config = GameConfig {
        width: u16::from(input.width % 24) + 1,
        height: u16::from(input.height % 24) + 1,
        ..GameConfig::default()
    };

    // 1x1 grids are rejected; that is the only failure mode
    let Ok(mut state) = GameState::new(config, Box::new(SeededDice::new(input.seed))) else {
        assert!(config.validate().is_err());
        return;
    };

    let violations = check_invariants(&state);
    assert!(violations.is_empty(), "Invariants violated at start: {violations:?}");

    let answers: Vec<u8> = input.answers.into_iter().take(4096).collect();
    let mut controller = Answers {
        bytes: answers.into_iter(),
    };

    for command in input.commands.into_iter().take(512) {
        let before = state.player().clone();
        let turn = state.turn();

        let command = match command {
            FuzzCommand::Up => Command::Move(Direction::Up),
            FuzzCommand::Down => Command::Move(Direction::Down),
            FuzzCommand::Left => Command::Move(Direction::Left),
            FuzzCommand::Right => Command::Move(Direction::Right),
            FuzzCommand::Quit => Command::Quit,
            FuzzCommand::NextLevel => {
                if state.status() == Status::Won {
                    let event = state.reinitialize_level().expect("level size was valid before");
                    assert_eq!(event, GameEvent::LevelStarted { level: state.level() });
                    assert_eq!(state.player().position, Coord::ORIGIN);
                    assert!(state.player().inventory().eq(before.inventory()));
                }
                continue;
            }
        };

        let report = state.take_turn(command, &mut controller);
        assert_eq!(report.status, state.status());

        match report.outcome {
            TurnOutcome::Ignored => {
                assert_eq!(state.turn(), turn);
                assert_eq!(state.player(), &before);
            }
            TurnOutcome::OutOfBounds | TurnOutcome::Stayed | TurnOutcome::Quit => {
                assert_eq!(state.turn(), turn + 1);
                assert_eq!(state.player().position, before.position);
            }
            TurnOutcome::Moved(to) => {
                assert_eq!(state.player().position, to);
                assert_eq!(to.distance(before.position), 1);
            }
        }

        let violations = check_invariants(&state);
        assert!(
            violations.is_empty(),
            "Invariants violated after turn {}: {violations:?}",
            state.turn()
        );
    }
});
