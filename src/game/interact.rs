//! Tile interaction dispatch.
//!
//! Stepping onto an occupied cell runs that content's interaction with the
//! player. Interactions may ask the [`Controller`] for decisions (hunt, attack
//! or flee, harvest, what to buy) and report what happened as [`GameEvent`]s.

use tracing::debug;

use crate::game::{
    harvest, resolve_encounter, visit_shop, Creature, Dice, GameEvent, Offer, Player, Resource,
    TileContent,
};

/// A choice during combat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatAction {
    /// Strike the creature.
    Attack,
    /// Try to run away.
    Flee,
}

/// A choice at the shop menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopChoice {
    /// Buy the offer at this zero-based index.
    Buy(usize),
    /// Leave the shop.
    Exit,
    /// Input that is not a menu entry.
    Unrecognized,
}

/// Source of player decisions during an interaction.
///
/// This is the input side of the presentation layer. Every call blocks until
/// the player has answered.
pub trait Controller {
    /// Whether to hunt a passive creature.
    fn engage(&mut self, creature: &Creature, player: &Player) -> bool;

    /// Next combat action, or `None` for unrecognized input.
    fn combat_action(&mut self, creature: &Creature, player: &Player) -> Option<CombatAction>;

    /// Whether to take a harvest step.
    fn harvest(&mut self, resource: &Resource) -> bool;

    /// Next shop menu choice.
    fn shop_choice(&mut self, offers: &[Offer], player: &Player) -> ShopChoice;

    /// Called for every event as it happens.
    fn notify(&mut self, _event: &GameEvent) {}
}

/// Everything an interaction can touch besides the tile itself.
pub struct Encounter<'a> {
    /// The player stepping onto the tile.
    pub player: &'a mut Player,
    /// Shared randomness stream.
    pub dice: &'a mut dyn Dice,
    /// Source of player decisions.
    pub controller: &'a mut dyn Controller,
    events: &'a mut Vec<GameEvent>,
}

impl std::fmt::Debug for Encounter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Encounter")
            .field("player", &self.player)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

impl<'a> Encounter<'a> {
    /// Bundle the interaction context. Events are appended to `events`.
    pub fn new(
        player: &'a mut Player,
        dice: &'a mut dyn Dice,
        controller: &'a mut dyn Controller,
        events: &'a mut Vec<GameEvent>,
    ) -> Self {
        Self {
            player,
            dice,
            controller,
            events,
        }
    }

    /// Record an event and forward it to the controller.
    pub fn emit(&mut self, event: GameEvent) {
        debug!(%event, "game event");
        self.controller.notify(&event);
        self.events.push(event);
    }
}

/// Run the interaction for `content`.
///
/// Returns whether the player may move onto the tile. Afterwards
/// [`TileContent::is_consumed`] tells whether the tile should be cleared.
pub fn enter(content: &mut TileContent, encounter: &mut Encounter<'_>) -> bool {
    match content {
        TileContent::Creature(creature) => resolve_encounter(creature, encounter),
        TileContent::Resource(resource) => harvest(resource, encounter),
        TileContent::Shop(shop) => visit_shop(shop, encounter),
    }
}
