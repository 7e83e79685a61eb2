//! A deterministic built-in player.
//!
//! The autopilot answers every prompt and picks moves on its own, so whole
//! sessions can run headless. It gathers loot until it expects to survive the
//! boss fight, then heads for the boss.

use crate::game::{
    can_afford, CombatAction, Command, Controller, Coord, Creature, CreatureKind, Direction,
    GameState, Offer, Player, Resource, ShopChoice, Stat, TileContent,
};

/// Heuristic player usable as a [`Controller`] and a move source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Autopilot {
    /// Hunt passive creatures only above this health.
    hunt_above: i32,
    /// Prefer potions at or below this health.
    heal_below: i32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            hunt_above: 50,
            heal_below: 60,
        }
    }
}

impl Autopilot {
    /// Create an autopilot with the default thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose the next command for `state`.
    ///
    /// Returns [`Command::Quit`] when there is nothing left to walk to.
    #[must_use]
    pub fn next_command(&self, state: &GameState) -> Command {
        let Some(target) = self.target(state) else {
            return Command::Quit;
        };
        let here = state.player().position;

        let direction = if target.row < here.row {
            Direction::Up
        } else if target.row > here.row {
            Direction::Down
        } else if target.col < here.col {
            Direction::Left
        } else {
            Direction::Right
        };
        Command::Move(direction)
    }

    /// The boss when the fight looks winnable, otherwise the nearest other
    /// occupied cell.
    fn target(&self, state: &GameState) -> Option<Coord> {
        let grid = state.grid();
        let player = state.player();
        let here = player.position;

        if let Some(boss_at) = grid.boss_position()
            && let Some(TileContent::Creature(boss)) = grid.content(boss_at)
            && expect_to_win(player, boss)
        {
            return Some(boss_at);
        }

        let nearest = grid
            .occupied()
            .filter(|(coord, content)| *coord != here && self.worth_visiting(player, content))
            .min_by_key(|(coord, _)| (here.distance(*coord), *coord))
            .map(|(coord, _)| coord);

        // Nothing else left: fight the boss anyway.
        nearest.or_else(|| grid.boss_position())
    }

    /// Skip cells that would be visited without changing anything, so the
    /// autopilot never shuttles between two of them.
    fn worth_visiting(&self, player: &Player, content: &TileContent) -> bool {
        match content {
            TileContent::Creature(creature) => match creature.kind {
                CreatureKind::Boss => false,
                CreatureKind::Monster => player.health > creature.damage,
                CreatureKind::Animal => player.health > self.hunt_above,
            },
            TileContent::Resource(_) => true,
            TileContent::Shop(shop) => shop.offers.iter().any(|offer| can_afford(player, offer)),
        }
    }
}

/// Whether the player outlasts the creature assuming minimum attack rolls.
fn expect_to_win(player: &Player, creature: &Creature) -> bool {
    if player.strength <= 0 {
        return false;
    }
    let hits = (creature.health + player.strength - 1) / player.strength;
    let taken = (hits - 1).max(0).saturating_mul(creature.damage);
    taken < player.health
}

impl Controller for Autopilot {
    fn engage(&mut self, _creature: &Creature, player: &Player) -> bool {
        player.health > self.hunt_above
    }

    fn combat_action(&mut self, creature: &Creature, player: &Player) -> Option<CombatAction> {
        let finishes = creature.health <= player.strength;
        if !finishes && player.health <= creature.damage && creature.kind != CreatureKind::Boss {
            Some(CombatAction::Flee)
        } else {
            Some(CombatAction::Attack)
        }
    }

    fn harvest(&mut self, _resource: &Resource) -> bool {
        true
    }

    fn shop_choice(&mut self, offers: &[Offer], player: &Player) -> ShopChoice {
        let wanted = if player.health <= self.heal_below {
            Stat::Health
        } else {
            Stat::Strength
        };

        let pick = offers
            .iter()
            .position(|offer| offer.boost.stat == wanted && can_afford(player, offer))
            .or_else(|| offers.iter().position(|offer| can_afford(player, offer)));

        pick.map_or(ShopChoice::Exit, ShopChoice::Buy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Grid, Shop, ScriptedDice, SeededDice, Status, GameConfig, GOLD};

    #[test]
    fn test_heads_for_nearest_loot() {
        let mut grid = Grid::new(5, 5).unwrap();
        grid.place(Coord::new(4, 4), TileContent::Creature(Creature::boss()));
        grid.place(Coord::new(0, 2), TileContent::Resource(Resource::coin()));
        grid.place(Coord::new(3, 0), TileContent::Resource(Resource::tree()));
        let state = GameState::from_grid(grid, Player::default(), Box::new(ScriptedDice::new()));

        let autopilot = Autopilot::new();
        assert_eq!(
            autopilot.next_command(&state),
            Command::Move(Direction::Right)
        );
    }

    #[test]
    fn test_strong_player_targets_boss() {
        let mut grid = Grid::new(5, 5).unwrap();
        grid.place(Coord::new(4, 0), TileContent::Creature(Creature::boss()));
        grid.place(Coord::new(0, 1), TileContent::Resource(Resource::coin()));
        let mut player = Player::default();
        player.strength = 80;
        let state = GameState::from_grid(grid, player, Box::new(ScriptedDice::new()));

        assert_eq!(
            Autopilot::new().next_command(&state),
            Command::Move(Direction::Down)
        );
    }

    #[test]
    fn test_skips_shop_it_cannot_use() {
        let mut grid = Grid::new(5, 5).unwrap();
        grid.place(Coord::new(4, 4), TileContent::Creature(Creature::boss()));
        grid.place(Coord::new(0, 1), TileContent::Shop(Shop::standard()));
        grid.place(Coord::new(2, 0), TileContent::Resource(Resource::bush()));
        let mut player = Player::default();
        let state = GameState::from_grid(grid.clone(), player.clone(), Box::new(ScriptedDice::new()));
        assert_eq!(
            Autopilot::new().next_command(&state),
            Command::Move(Direction::Down)
        );

        player.add(GOLD, 10);
        let state = GameState::from_grid(grid, player, Box::new(ScriptedDice::new()));
        assert_eq!(
            Autopilot::new().next_command(&state),
            Command::Move(Direction::Right)
        );
    }

    #[test]
    fn test_expect_to_win() {
        let player = Player::default();
        assert!(expect_to_win(&player, &Creature::monster()));
        // 15 hits against the boss, 14 retaliations of 30
        assert!(!expect_to_win(&player, &Creature::boss()));
    }

    #[test]
    fn test_shop_prefers_potion_when_hurt() {
        let shop = Shop::standard();
        let mut autopilot = Autopilot::new();
        let mut player = Player::default();
        player.add(GOLD, 10);

        assert_eq!(autopilot.shop_choice(&shop.offers, &player), ShopChoice::Buy(1));
        player.health = 40;
        assert_eq!(autopilot.shop_choice(&shop.offers, &player), ShopChoice::Buy(1));
        player.remove(GOLD, 10);
        assert_eq!(autopilot.shop_choice(&shop.offers, &player), ShopChoice::Exit);
    }

    #[test]
    fn test_flees_only_when_next_hit_kills() {
        let mut autopilot = Autopilot::new();
        let mut player = Player::default();
        let goblin = Creature::monster();

        assert_eq!(
            autopilot.combat_action(&goblin, &player),
            Some(CombatAction::Attack)
        );
        player.health = 10;
        assert_eq!(
            autopilot.combat_action(&goblin, &player),
            Some(CombatAction::Flee)
        );
    }

    #[test]
    fn test_drives_a_session_to_the_end() {
        let config = GameConfig {
            width: 10,
            height: 10,
            ..GameConfig::default()
        };
        let mut state = GameState::new(config, Box::new(SeededDice::new(11))).unwrap();
        let mut autopilot = Autopilot::new();

        for _ in 0..5000 {
            if state.is_over() {
                break;
            }
            let command = autopilot.next_command(&state);
            state.take_turn(command, &mut autopilot);
        }
        assert_ne!(state.status(), Status::Playing);
    }
}
