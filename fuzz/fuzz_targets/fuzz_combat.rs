#![no_main]

use arbitrary::Arbitrary;
use delve::game::{
    resolve_encounter, CombatAction, Controller, Creature, CreatureKind, Encounter, GameEvent,
    Offer, Player, Resource, ScriptedDice, ShopChoice,
};
use libfuzzer_sys::fuzz_target;

/// Structured input for combat fuzzing.
#[derive(Arbitrary, Debug)]
struct CombatInput {
    /// Creature health.
    creature_health: i16,
    /// Creature damage.
    creature_damage: i16,
    /// Whether the creature fights without asking.
    hostile: bool,
    /// Player stats.
    health: i16,
    strength: i16,
    agility: i16,
    /// Answer to the hunt prompt.
    engage: bool,
    /// Combat answers: 0 attacks, 1 flees, anything else is unrecognized.
    answers: Vec<u8>,
    /// Rolls for `below` draws.
    rolls: Vec<u32>,
}

/// Replays fuzzed answers, then attacks forever.
struct Answers {
    engage: bool,
    answers: std::vec::IntoIter<u8>,
}

impl Controller for Answers {
    fn engage(&mut self, _creature: &Creature, _player: &Player) -> bool {
        self.engage
    }

    fn combat_action(&mut self, _creature: &Creature, _player: &Player) -> Option<CombatAction> {
        match self.answers.next() {
            None | Some(0) => Some(CombatAction::Attack),
            Some(1) => Some(CombatAction::Flee),
            Some(_) => None,
        }
    }

    fn harvest(&mut self, _resource: &Resource) -> bool {
        false
    }

    fn shop_choice(&mut self, _offers: &[Offer], _player: &Player) -> ShopChoice {
        ShopChoice::Exit
    }
}

fuzz_target!(|input: CombatInput| {
    // Keep strength positive so the fallback attack loop always ends
    let strength = i32::from(input.strength).max(1);
    let mut creature = Creature::new(
        CreatureKind::Monster,
        "Fuzz",
        i32::from(input.creature_health),
        i32::from(input.creature_damage),
        input.hostile,
    );
    let mut player = Player::default();
    player.health = i32::from(input.health);
    player.strength = strength;
    player.agility = i32::from(input.agility);

    let mut dice = ScriptedDice::new().with_below(input.rolls.into_iter().take(256));
    let answers: Vec<u8> = input.answers.into_iter().take(256).collect();
    let mut controller = Answers {
        engage: input.engage,
        answers: answers.into_iter(),
    };
    let mut events = Vec::new();
    let start_health = creature.health;
    let player_alive = !player.is_dead();

    let mut encounter = Encounter::new(&mut player, &mut dice, &mut controller, &mut events);
    let may_move = resolve_encounter(&mut creature, &mut encounter);

    // A refused move means the player died in this encounter
    if !may_move {
        assert!(player.is_dead(), "move refused but player alive");
        assert!(events.contains(&GameEvent::PlayerDied));
    }
    // Only a fight can defeat the creature
    if creature.consumed {
        assert!(creature.is_defeated());
        assert!(start_health > 0 && player_alive, "defeated without a fight");
    }
    assert!(creature.health <= start_health, "creature healed");
    assert!(!(creature.consumed && !may_move), "creature and player both died");
});
