//! Player state management.

use std::collections::BTreeMap;

use crate::game::{Coord, Stat, StatBoost};

/// Starting stats for a new player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerStats {
    /// Starting health.
    pub health: i32,
    /// Starting strength (base attack damage).
    pub strength: i32,
    /// Starting agility (escape chance is agility x 5 percent).
    pub agility: i32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            health: 100,
            strength: 10,
            agility: 10,
        }
    }
}

/// The player character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Current cell.
    pub position: Coord,
    /// Current health. The player is dead at or below zero.
    pub health: i32,
    /// Base attack damage.
    pub strength: i32,
    /// Escape skill.
    pub agility: i32,
    /// Item name to quantity. A missing key means zero.
    inventory: BTreeMap<String, u32>,
}

impl Player {
    /// Create a player at the origin with the given stats and an empty inventory.
    #[must_use]
    pub fn new(stats: PlayerStats) -> Self {
        Self {
            position: Coord::ORIGIN,
            health: stats.health,
            strength: stats.strength,
            agility: stats.agility,
            inventory: BTreeMap::new(),
        }
    }

    /// Whether the player has died.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Quantity of `item` held.
    #[must_use]
    pub fn quantity(&self, item: &str) -> u32 {
        self.inventory.get(item).copied().unwrap_or(0)
    }

    /// Add `amount` of `item` to the inventory.
    pub fn add(&mut self, item: &str, amount: u32) {
        let entry = self.inventory.entry(item.to_string()).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Remove `amount` of `item`.
    ///
    /// Returns `false` and leaves the inventory untouched if not enough is held.
    /// An entry drained to zero stays in the inventory.
    pub fn remove(&mut self, item: &str, amount: u32) -> bool {
        match self.inventory.get_mut(item) {
            Some(held) if *held >= amount => {
                *held -= amount;
                true
            }
            None if amount == 0 => true,
            _ => false,
        }
    }

    /// Iterate over inventory entries in name order.
    pub fn inventory(&self) -> impl Iterator<Item = (&str, u32)> {
        self.inventory
            .iter()
            .map(|(item, quantity)| (item.as_str(), *quantity))
    }

    /// Apply a stat boost.
    pub fn apply_boost(&mut self, boost: StatBoost) {
        match boost.stat {
            Stat::Strength => self.strength += boost.amount,
            Stat::Health => self.health += boost.amount,
        }
    }

    /// Take damage. Health may go below zero.
    pub fn take_damage(&mut self, amount: i32) {
        self.health -= amount;
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PlayerStats::default())
    }
}
