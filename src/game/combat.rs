//! Combat resolution.
//!
//! An encounter is a loop of player choices that runs while both sides are
//! alive. Attacking deals `strength + d5` damage (a roll in `[0, 5)`); a
//! surviving creature then strikes back for its full damage. Fleeing succeeds
//! when a roll in `[0, 100)` lands below `agility x 5`, so agility 20 or more
//! always escapes. A failed escape draws the same retaliation as a failed
//! attack.

use tracing::{debug, info};

use crate::game::{CombatAction, Creature, Dice, Encounter, GameEvent, Player};

/// Exclusive upper bound of the random attack bonus.
pub const ATTACK_ROLL: u32 = 5;

/// Escape chance per point of agility, in percent.
pub const ESCAPE_PER_AGILITY: i64 = 5;

/// Outcome of a single attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackResult {
    /// The creature was defeated.
    Defeated,
    /// The creature survived and struck back; the player survived too.
    Traded,
    /// The creature survived and its retaliation killed the player.
    PlayerKilled,
}

/// Roll the player's attack damage.
pub fn attack_damage(player: &Player, dice: &mut dyn Dice) -> i32 {
    let bonus = i32::try_from(dice.below(ATTACK_ROLL)).unwrap_or(0);
    player.strength.saturating_add(bonus)
}

/// Roll an escape attempt.
pub fn escape_succeeds(player: &Player, dice: &mut dyn Dice) -> bool {
    let roll = i64::from(dice.below(100));
    roll < i64::from(player.agility) * ESCAPE_PER_AGILITY
}

/// The creature strikes the player. Returns `true` if the player died.
fn retaliate(creature: &Creature, encounter: &mut Encounter<'_>) -> bool {
    encounter.player.take_damage(creature.damage);
    encounter.emit(GameEvent::Retaliated {
        damage: creature.damage,
    });

    if encounter.player.is_dead() {
        info!(creature = %creature.name, "player killed");
        encounter.emit(GameEvent::PlayerDied);
        true
    } else {
        false
    }
}

/// Resolve one attack: damage, defeat and loot, or retaliation.
pub fn process_attack(creature: &mut Creature, encounter: &mut Encounter<'_>) -> AttackResult {
    let damage = attack_damage(encounter.player, encounter.dice);
    creature.health -= damage;
    encounter.emit(GameEvent::Attacked { damage });

    if creature.is_defeated() {
        creature.consumed = true;
        encounter.emit(GameEvent::CreatureDefeated {
            name: creature.name.clone(),
            kind: creature.kind,
        });
        if let Some((item, amount)) = creature.loot() {
            encounter.player.add(item, amount);
            encounter.emit(GameEvent::LootGained {
                item: item.to_string(),
                amount,
            });
        }
        return AttackResult::Defeated;
    }

    if retaliate(creature, encounter) {
        AttackResult::PlayerKilled
    } else {
        AttackResult::Traded
    }
}

/// Run a full encounter with `creature`.
///
/// Returns whether the player may move onto the creature's tile. `false`
/// means the player died.
pub fn resolve_encounter(creature: &mut Creature, encounter: &mut Encounter<'_>) -> bool {
    encounter.emit(GameEvent::Encounter {
        name: creature.name.clone(),
        kind: creature.kind,
        health: creature.health,
        damage: creature.damage,
    });

    if !creature.hostile && !encounter.controller.engage(creature, encounter.player) {
        encounter.emit(GameEvent::HuntSkipped);
        return true;
    }

    while creature.health > 0 && encounter.player.health > 0 {
        match encounter.controller.combat_action(creature, encounter.player) {
            Some(CombatAction::Attack) => match process_attack(creature, encounter) {
                AttackResult::Defeated => {
                    debug!(creature = %creature.name, "creature defeated");
                    return true;
                }
                AttackResult::PlayerKilled => return false,
                AttackResult::Traded => {}
            },
            Some(CombatAction::Flee) => {
                if escape_succeeds(encounter.player, encounter.dice) {
                    encounter.emit(GameEvent::Escaped);
                    return true;
                }
                encounter.emit(GameEvent::EscapeFailed);
                if retaliate(creature, encounter) {
                    return false;
                }
            }
            None => encounter.emit(GameEvent::InvalidChoice),
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::interact::testing::ScriptedController;
    use crate::game::{CreatureKind, ScriptedDice, GOLD, MEAT};

    fn run(
        creature: &mut Creature,
        player: &mut Player,
        dice: &mut ScriptedDice,
        controller: &mut ScriptedController,
    ) -> (bool, Vec<GameEvent>) {
        let mut events = Vec::new();
        let mut encounter = Encounter::new(player, dice, controller, &mut events);
        let allowed = resolve_encounter(creature, &mut encounter);
        (allowed, events)
    }

    #[test]
    fn test_monster_fight_fixed_roll() {
        // strength 10 + roll 3 = 13 per hit; 40 hp needs 4 hits, 3 retaliations
        let mut creature = Creature::monster();
        let mut player = Player::default();
        let mut dice = ScriptedDice::new().with_fallback(3, 0.0);
        let mut controller = ScriptedController::default();

        let (allowed, events) = run(&mut creature, &mut player, &mut dice, &mut controller);

        assert!(allowed);
        assert!(creature.consumed);
        assert_eq!(player.health, 70);
        assert_eq!(player.quantity(GOLD), 10);
        let hits = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Attacked { .. }))
            .count();
        assert_eq!(hits, 4);
        assert_eq!(controller.prompts, 4);
    }

    #[test]
    fn test_animal_declined() {
        let mut creature = Creature::animal();
        let mut player = Player::default();
        let mut dice = ScriptedDice::new();
        let mut controller = ScriptedController::default();
        controller.engage.push_back(false);

        let (allowed, events) = run(&mut creature, &mut player, &mut dice, &mut controller);

        assert!(allowed);
        assert!(!creature.consumed);
        assert_eq!(creature.health, 30);
        assert_eq!(player.health, 100);
        assert_eq!(events.last(), Some(&GameEvent::HuntSkipped));
    }

    #[test]
    fn test_animal_hunted_gives_meat() {
        // 10 + 4 = 14 per hit: 30 hp needs 3 hits, 2 retaliations of 5
        let mut creature = Creature::animal();
        let mut player = Player::default();
        let mut dice = ScriptedDice::new().with_fallback(4, 0.0);
        let mut controller = ScriptedController::default();
        controller.engage.push_back(true);

        let (allowed, _) = run(&mut creature, &mut player, &mut dice, &mut controller);

        assert!(allowed);
        assert!(creature.consumed);
        assert_eq!(player.health, 90);
        assert_eq!(player.quantity(MEAT), 5);
        assert_eq!(player.quantity(GOLD), 0);
    }

    #[test]
    fn test_boss_gives_no_loot() {
        let mut creature = Creature::new(CreatureKind::Boss, "Dragon", 5, 30, true);
        let mut player = Player::default();
        let mut dice = ScriptedDice::new();
        let mut controller = ScriptedController::default();

        let (allowed, _) = run(&mut creature, &mut player, &mut dice, &mut controller);

        assert!(allowed);
        assert!(creature.consumed);
        assert_eq!(player.inventory().count(), 0);
    }

    #[test]
    fn test_player_killed_blocks_move() {
        let mut creature = Creature::boss();
        let mut player = Player::default();
        player.health = 30;
        let mut dice = ScriptedDice::new();
        let mut controller = ScriptedController::default();

        let (allowed, events) = run(&mut creature, &mut player, &mut dice, &mut controller);

        assert!(!allowed);
        assert!(!creature.consumed);
        assert_eq!(player.health, 0);
        assert_eq!(creature.health, 140);
        assert_eq!(events.last(), Some(&GameEvent::PlayerDied));
    }

    #[test]
    fn test_flee_success_keeps_creature() {
        // roll 49 < 10 * 5
        let mut creature = Creature::monster();
        let mut player = Player::default();
        let mut dice = ScriptedDice::new().with_below([49]);
        let mut controller = ScriptedController::default();
        controller.combat.push_back(Some(CombatAction::Flee));

        let (allowed, events) = run(&mut creature, &mut player, &mut dice, &mut controller);

        assert!(allowed);
        assert!(!creature.consumed);
        assert_eq!(creature.health, 40);
        assert_eq!(player.health, 100);
        assert_eq!(events.last(), Some(&GameEvent::Escaped));
    }

    #[test]
    fn test_flee_failure_retaliates() {
        // roll 50 is not below 50: retaliation, then flee again with roll 0
        let mut creature = Creature::monster();
        let mut player = Player::default();
        let mut dice = ScriptedDice::new().with_below([50, 0]);
        let mut controller = ScriptedController::default();
        controller.combat.extend([Some(CombatAction::Flee), Some(CombatAction::Flee)]);

        let (allowed, events) = run(&mut creature, &mut player, &mut dice, &mut controller);

        assert!(allowed);
        assert_eq!(player.health, 90);
        assert!(events.contains(&GameEvent::EscapeFailed));
        assert_eq!(events.last(), Some(&GameEvent::Escaped));
    }

    #[test]
    fn test_flee_failure_can_kill() {
        let mut creature = Creature::monster();
        let mut player = Player::default();
        player.health = 10;
        player.agility = 0;
        let mut dice = ScriptedDice::new();
        let mut controller = ScriptedController::default();
        controller.combat.push_back(Some(CombatAction::Flee));

        let (allowed, _) = run(&mut creature, &mut player, &mut dice, &mut controller);

        assert!(!allowed);
        assert!(player.is_dead());
    }

    #[test]
    fn test_invalid_choice_reprompts() {
        let mut creature = Creature::new(CreatureKind::Monster, "Rat", 1, 1, true);
        let mut player = Player::default();
        let mut dice = ScriptedDice::new();
        let mut controller = ScriptedController::default();
        controller.combat.extend([None, None, Some(CombatAction::Attack)]);

        let (allowed, events) = run(&mut creature, &mut player, &mut dice, &mut controller);

        assert!(allowed);
        assert_eq!(controller.prompts, 3);
        let invalid = events
            .iter()
            .filter(|e| **e == GameEvent::InvalidChoice)
            .count();
        assert_eq!(invalid, 2);
        // Invalid choices change nothing
        assert_eq!(player.health, 100);
    }

    #[test]
    fn test_escape_boundary_agility_20() {
        let mut player = Player::default();
        player.agility = 20;
        let mut dice = ScriptedDice::new().with_below([99]);
        assert!(escape_succeeds(&player, &mut dice));

        player.agility = 19;
        let mut dice = ScriptedDice::new().with_below([95]);
        assert!(!escape_succeeds(&player, &mut dice));
    }

    #[test]
    fn test_attack_damage_range() {
        let player = Player::default();
        let mut dice = ScriptedDice::new().with_below([0, 4, 9]);
        assert_eq!(attack_damage(&player, &mut dice), 10);
        assert_eq!(attack_damage(&player, &mut dice), 14);
        // Clamped into [0, 5)
        assert_eq!(attack_damage(&player, &mut dice), 14);
    }
}
