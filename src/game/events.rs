//! Game events reported to the presentation layer.
//!
//! Every failure during play (a blocked move, a refused purchase, a death) is
//! an expected event rather than an error, so turns report what happened as a
//! list of these values.

use std::fmt;

use crate::game::{CreatureKind, ResourceCategory};

/// Something that happened during a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The player stepped onto a creature.
    Encounter {
        /// Creature name.
        name: String,
        /// Creature kind.
        kind: CreatureKind,
        /// Creature health at the start of the encounter.
        health: i32,
        /// Creature damage.
        damage: i32,
    },
    /// The player chose not to hunt a passive creature.
    HuntSkipped,
    /// The player struck the creature.
    Attacked {
        /// Damage dealt.
        damage: i32,
    },
    /// The creature struck back.
    Retaliated {
        /// Damage taken by the player.
        damage: i32,
    },
    /// The creature was defeated.
    CreatureDefeated {
        /// Creature name.
        name: String,
        /// Creature kind.
        kind: CreatureKind,
    },
    /// Items were added to the inventory.
    LootGained {
        /// Inventory item.
        item: String,
        /// Quantity gained.
        amount: u32,
    },
    /// The player fled.
    Escaped,
    /// The player tried to flee and failed.
    EscapeFailed,
    /// The player's health reached zero.
    PlayerDied,
    /// The player stepped onto a resource.
    ResourceFound {
        /// Resource type name.
        name: String,
        /// Resource category.
        category: ResourceCategory,
        /// Steps done before this visit.
        steps_done: u32,
        /// Steps required in total.
        steps_required: u32,
    },
    /// One harvest step was taken.
    Harvested {
        /// Steps done after this step.
        steps_done: u32,
        /// Steps required in total.
        steps_required: u32,
    },
    /// The resource was fully harvested.
    HarvestComplete {
        /// Resource type name.
        name: String,
    },
    /// The player left a resource alone.
    HarvestDeclined,
    /// The player entered a shop.
    ShopOpened,
    /// An offer was bought.
    Purchased {
        /// Offer name.
        item: String,
    },
    /// An offer could not be afforded.
    InsufficientFunds {
        /// Offer name.
        item: String,
    },
    /// The player left the shop.
    ShopClosed,
    /// A prompt answer was not one of the accepted choices.
    InvalidChoice,
    /// The move would leave the grid.
    OutOfBounds,
    /// The boss is gone.
    BossDefeated,
    /// The player died and the session is lost.
    GameOver,
    /// A fresh level was generated.
    LevelStarted {
        /// Level number, starting at 1.
        level: u32,
    },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::Encounter {
                name,
                kind,
                health,
                damage,
            } => write!(f, "{name} ({kind}) HP:{health} DMG:{damage}"),
            GameEvent::HuntSkipped => write!(f, "Skip"),
            GameEvent::Attacked { damage } => write!(f, "Hit {damage}"),
            GameEvent::Retaliated { damage } => write!(f, "Enemy hits {damage}"),
            GameEvent::CreatureDefeated { .. } => write!(f, "Enemy defeated"),
            GameEvent::LootGained { item, amount } => write!(f, "+{amount} {item}"),
            GameEvent::Escaped => write!(f, "Escaped"),
            GameEvent::EscapeFailed => write!(f, "Failed to escape"),
            GameEvent::PlayerDied => write!(f, "You died"),
            GameEvent::ResourceFound {
                name,
                category,
                steps_done,
                steps_required,
            } => write!(f, "{name} ({category}) [{steps_done}/{steps_required}]"),
            GameEvent::Harvested {
                steps_done,
                steps_required,
            } => write!(f, "Harvesting [{steps_done}/{steps_required}]"),
            GameEvent::HarvestComplete { .. } => write!(f, "Harvest complete"),
            GameEvent::HarvestDeclined => write!(f, "Left it alone"),
            GameEvent::ShopOpened => write!(f, "Shop"),
            GameEvent::Purchased { item } => write!(f, "Bought {item}"),
            GameEvent::InsufficientFunds { .. } => write!(f, "Not enough"),
            GameEvent::ShopClosed => write!(f, "Left the shop"),
            GameEvent::InvalidChoice => write!(f, "Invalid choice."),
            GameEvent::OutOfBounds => write!(f, "Out of bounds!"),
            GameEvent::BossDefeated => write!(f, "Boss defeated! You Win!"),
            GameEvent::GameOver => write!(f, "Game Over!"),
            GameEvent::LevelStarted { level } => write!(f, "Level {level}"),
        }
    }
}
