//! Tile contents: creatures, resources and shops.

use std::fmt;

/// Inventory key for gold looted from monsters and spent in shops.
pub const GOLD: &str = "Gold";
/// Inventory key for wood spent in shops.
pub const WOOD: &str = "Wood";
/// Inventory key for meat hunted from animals.
pub const MEAT: &str = "Meat";

/// Gold granted for defeating a monster.
pub const MONSTER_LOOT: u32 = 10;
/// Meat granted for defeating an animal.
pub const ANIMAL_LOOT: u32 = 5;

/// What kind of creature occupies a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CreatureKind {
    /// The unique boss. Defeating it wins the game.
    Boss,
    /// A hostile monster that drops gold.
    Monster,
    /// A passive animal that drops meat when hunted.
    Animal,
}

impl fmt::Display for CreatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreatureKind::Boss => write!(f, "BigBoss"),
            CreatureKind::Monster => write!(f, "Monster"),
            CreatureKind::Animal => write!(f, "Animal"),
        }
    }
}

/// A creature standing on a tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creature {
    /// Kind of creature.
    pub kind: CreatureKind,
    /// Display name.
    pub name: String,
    /// Remaining health. At or below zero the creature is defeated.
    pub health: i32,
    /// Damage dealt to the player on each retaliation.
    pub damage: i32,
    /// Hostile creatures fight immediately; others ask first.
    pub hostile: bool,
    /// Set once the creature is defeated.
    pub consumed: bool,
}

impl Creature {
    /// Create a creature.
    #[must_use]
    pub fn new(
        kind: CreatureKind,
        name: impl Into<String>,
        health: i32,
        damage: i32,
        hostile: bool,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            health,
            damage,
            hostile,
            consumed: false,
        }
    }

    /// The level boss.
    #[must_use]
    pub fn boss() -> Self {
        Self::new(CreatureKind::Boss, "Dragon", 150, 30, true)
    }

    /// A standard hostile monster.
    #[must_use]
    pub fn monster() -> Self {
        Self::new(CreatureKind::Monster, "Goblin", 40, 10, true)
    }

    /// A standard passive animal.
    #[must_use]
    pub fn animal() -> Self {
        Self::new(CreatureKind::Animal, "Wolf", 30, 5, false)
    }

    /// Whether the creature has been beaten.
    #[must_use]
    pub const fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// Loot granted when this creature is defeated, as (item, quantity).
    #[must_use]
    pub const fn loot(&self) -> Option<(&'static str, u32)> {
        match self.kind {
            CreatureKind::Monster => Some((GOLD, MONSTER_LOOT)),
            CreatureKind::Animal => Some((MEAT, ANIMAL_LOOT)),
            CreatureKind::Boss => None,
        }
    }
}

/// Broad category of a harvestable resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceCategory {
    /// Coins and nuggets.
    Gold,
    /// Bushes and trees.
    Wood,
    /// Diamonds.
    Treasure,
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceCategory::Gold => write!(f, "Gold"),
            ResourceCategory::Wood => write!(f, "Wood"),
            ResourceCategory::Treasure => write!(f, "Treasure"),
        }
    }
}

/// A harvestable resource that takes several steps to deplete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Category, used for display.
    pub category: ResourceCategory,
    /// Type name. Harvesting grants this name as an inventory item.
    pub name: String,
    /// Harvest steps needed before the yield is granted (at least 1).
    pub steps_required: u32,
    /// Harvest steps taken so far.
    pub steps_done: u32,
    /// Quantity granted when fully harvested.
    pub yield_amount: u32,
    /// Set once the yield has been granted.
    pub consumed: bool,
}

impl Resource {
    /// Create a resource. `steps_required` is raised to 1 if zero.
    #[must_use]
    pub fn new(
        category: ResourceCategory,
        name: impl Into<String>,
        steps_required: u32,
        yield_amount: u32,
    ) -> Self {
        Self {
            category,
            name: name.into(),
            steps_required: steps_required.max(1),
            steps_done: 0,
            yield_amount,
            consumed: false,
        }
    }

    /// One-step gold coin.
    #[must_use]
    pub fn coin() -> Self {
        Self::new(ResourceCategory::Gold, "Coin", 1, 1)
    }

    /// Two-step gold nugget.
    #[must_use]
    pub fn nugget() -> Self {
        Self::new(ResourceCategory::Gold, "Nugget", 2, 3)
    }

    /// Two-step bush.
    #[must_use]
    pub fn bush() -> Self {
        Self::new(ResourceCategory::Wood, "Bush", 2, 2)
    }

    /// Three-step tree.
    #[must_use]
    pub fn tree() -> Self {
        Self::new(ResourceCategory::Wood, "Tree", 3, 5)
    }

    /// Three-step diamond.
    #[must_use]
    pub fn diamond() -> Self {
        Self::new(ResourceCategory::Treasure, "Diamond", 3, 1)
    }

    /// Steps still needed before the yield is granted.
    #[must_use]
    pub const fn steps_remaining(&self) -> u32 {
        self.steps_required.saturating_sub(self.steps_done)
    }
}

/// A player stat that shop offers can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    /// Attack strength.
    Strength,
    /// Current health.
    Health,
}

/// A single stat increase granted by a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatBoost {
    /// Which stat is raised.
    pub stat: Stat,
    /// How much it is raised by.
    pub amount: i32,
}

/// A purchasable shop item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offer {
    /// Item name.
    pub name: String,
    /// Ordered price: (inventory item, quantity) pairs.
    pub cost: Vec<(String, u32)>,
    /// Effect of buying the item.
    pub boost: StatBoost,
}

impl Offer {
    /// Create an offer.
    #[must_use]
    pub fn new(name: impl Into<String>, cost: &[(&str, u32)], stat: Stat, amount: i32) -> Self {
        Self {
            name: name.into(),
            cost: cost
                .iter()
                .map(|(item, quantity)| ((*item).to_string(), *quantity))
                .collect(),
            boost: StatBoost { stat, amount },
        }
    }

    /// Price as `"20Gold,5Wood"`.
    #[must_use]
    pub fn price_label(&self) -> String {
        self.cost
            .iter()
            .map(|(item, quantity)| format!("{quantity}{item}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// A shop with a fixed list of offers. Shops are never consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shop {
    /// Offers in menu order.
    pub offers: Vec<Offer>,
}

impl Shop {
    /// The standard shop: a sword and a potion.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            offers: vec![
                Offer::new("Sword", &[(GOLD, 20), (WOOD, 5)], Stat::Strength, 5),
                Offer::new("Potion", &[(GOLD, 10)], Stat::Health, 20),
            ],
        }
    }
}

/// The occupant of a grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileContent {
    /// A creature to fight or hunt.
    Creature(Creature),
    /// A resource to harvest.
    Resource(Resource),
    /// A shop to trade in.
    Shop(Shop),
}

impl TileContent {
    /// Single-character display symbol.
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self {
            TileContent::Creature(creature) => match creature.kind {
                CreatureKind::Boss => 'B',
                CreatureKind::Monster => 'M',
                CreatureKind::Animal => 'A',
            },
            TileContent::Resource(resource) => match resource.category {
                ResourceCategory::Gold => 'G',
                ResourceCategory::Wood => 'W',
                ResourceCategory::Treasure => 'T',
            },
            TileContent::Shop(_) => 'S',
        }
    }

    /// Whether the content should be cleared from the grid.
    #[must_use]
    pub const fn is_consumed(&self) -> bool {
        match self {
            TileContent::Creature(creature) => creature.consumed,
            TileContent::Resource(resource) => resource.consumed,
            TileContent::Shop(_) => false,
        }
    }

    /// Whether this is the boss creature.
    #[must_use]
    pub const fn is_boss(&self) -> bool {
        matches!(self, TileContent::Creature(c) if matches!(c.kind, CreatureKind::Boss))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_creatures() {
        let boss = Creature::boss();
        assert_eq!((boss.health, boss.damage, boss.hostile), (150, 30, true));

        let monster = Creature::monster();
        assert_eq!((monster.health, monster.damage, monster.hostile), (40, 10, true));

        let animal = Creature::animal();
        assert_eq!((animal.health, animal.damage, animal.hostile), (30, 5, false));
    }

    #[test]
    fn test_creature_loot() {
        assert_eq!(Creature::monster().loot(), Some((GOLD, 10)));
        assert_eq!(Creature::animal().loot(), Some((MEAT, 5)));
        assert_eq!(Creature::boss().loot(), None);
    }

    #[test]
    fn test_resource_table() {
        let table = [
            (Resource::coin(), 1, 1),
            (Resource::nugget(), 2, 3),
            (Resource::bush(), 2, 2),
            (Resource::tree(), 3, 5),
            (Resource::diamond(), 3, 1),
        ];
        for (resource, steps, amount) in table {
            assert_eq!(resource.steps_required, steps, "{}", resource.name);
            assert_eq!(resource.yield_amount, amount, "{}", resource.name);
            assert_eq!(resource.steps_done, 0);
            assert!(!resource.consumed);
        }
    }

    #[test]
    fn test_resource_min_steps() {
        let resource = Resource::new(ResourceCategory::Gold, "Dust", 0, 1);
        assert_eq!(resource.steps_required, 1);
        assert_eq!(resource.steps_remaining(), 1);
    }

    #[test]
    fn test_standard_shop() {
        let shop = Shop::standard();
        assert_eq!(shop.offers.len(), 2);
        assert_eq!(shop.offers[0].name, "Sword");
        assert_eq!(shop.offers[0].price_label(), "20Gold,5Wood");
        assert_eq!(shop.offers[0].boost, StatBoost { stat: Stat::Strength, amount: 5 });
        assert_eq!(shop.offers[1].name, "Potion");
        assert_eq!(shop.offers[1].price_label(), "10Gold");
        assert_eq!(shop.offers[1].boost, StatBoost { stat: Stat::Health, amount: 20 });
    }

    #[test]
    fn test_symbols() {
        assert_eq!(TileContent::Creature(Creature::boss()).symbol(), 'B');
        assert_eq!(TileContent::Creature(Creature::monster()).symbol(), 'M');
        assert_eq!(TileContent::Creature(Creature::animal()).symbol(), 'A');
        assert_eq!(TileContent::Resource(Resource::coin()).symbol(), 'G');
        assert_eq!(TileContent::Resource(Resource::tree()).symbol(), 'W');
        assert_eq!(TileContent::Resource(Resource::diamond()).symbol(), 'T');
        assert_eq!(TileContent::Shop(Shop::standard()).symbol(), 'S');
    }

    #[test]
    fn test_shop_never_consumed() {
        assert!(!TileContent::Shop(Shop::standard()).is_consumed());
        assert!(TileContent::Creature(Creature::boss()).is_boss());
        assert!(!TileContent::Creature(Creature::monster()).is_boss());
    }
}
