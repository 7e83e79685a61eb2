//! Game layer for Delve.
//!
//! Implements the rules of a single-player grid crawl:
//! - Grid of optional tile contents (creatures, resources, shops)
//! - Player stats and inventory
//! - Interaction dispatch when the player steps onto an occupied cell
//! - Combat, harvesting and shop resolution
//! - Level generation and turn orchestration

mod autopilot;
mod combat;
mod dice;
mod economy;
mod entity;
mod events;
mod grid;
mod harvest;
mod interact;
mod invariants;
mod levelgen;
mod player;
mod state;

pub use autopilot::Autopilot;
pub use combat::{
    attack_damage, escape_succeeds, process_attack, resolve_encounter, AttackResult, ATTACK_ROLL,
    ESCAPE_PER_AGILITY,
};
pub use dice::{Dice, ScriptedDice, SeededDice};
pub use economy::{can_afford, purchase, visit_shop, PurchaseResult};
pub use entity::{
    Creature, CreatureKind, Offer, Resource, ResourceCategory, Shop, Stat, StatBoost, TileContent,
    ANIMAL_LOOT, GOLD, MEAT, MONSTER_LOOT, WOOD,
};
pub use events::GameEvent;
pub use grid::{Coord, Direction, Grid};
pub use harvest::{harvest, harvest_step};
pub use interact::{enter, CombatAction, Controller, Encounter, ShopChoice};
pub use invariants::{check_invariants, InvariantViolation};
pub use levelgen::{
    generate_level, roll_content, LevelGenError, ANIMAL_CHANCE, MONSTER_CHANCE, RESOURCE_CHANCE,
    SHOP_CHANCE,
};
pub use player::{Player, PlayerStats};
pub use state::{
    Command, GameConfig, GameState, Status, TurnOutcome, TurnReport, DEFAULT_HEIGHT,
    DEFAULT_WIDTH,
};
